//! SeaORM entities mirroring the `accounts` and `posts` tables.

pub mod account;
pub mod post;
