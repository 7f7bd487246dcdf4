//! Request handlers, grouped by the service they front.

pub mod content;
pub mod review;
pub mod votes;
