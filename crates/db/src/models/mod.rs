//! Row structs for the slangdex tables.
//!
//! Rows carry statuses and vote types as the raw text stored in the
//! database. Converting them into `slangdex-core` types reports an
//! unknown value as an internal error instead of panicking.

pub mod content;
pub mod vote;
