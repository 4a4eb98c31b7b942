//! Read-only graph traversals.

pub mod recommend;
