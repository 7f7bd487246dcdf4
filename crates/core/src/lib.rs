//! Domain crate for the slangdex content lifecycle.
//!
//! Holds everything that does not perform I/O on its own: the error
//! taxonomy, the content status machine, field validation, pagination
//! maths, vote tallies, roles, the read-retry policy, the store traits and
//! the services built on top of them. Persistence lives in `slangdex-db`.

pub mod catalog;
pub mod content;
pub mod duplicate_check;
pub mod error;
pub mod memory;
pub mod pagination;
pub mod retry;
pub mod review_queue;
pub mod roles;
pub mod store;
pub mod types;
pub mod vote;
pub mod vote_ledger;
