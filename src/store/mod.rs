//! SQL adapters for the two tables.
//!
//! Every function borrows a connection instead of owning a pool, so the calling
//! service decides whether a sequence of calls runs inside one transaction.

pub mod tasks;
pub mod users;
