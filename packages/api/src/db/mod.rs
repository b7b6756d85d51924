//! # Database module: PostgreSQL connection pool and migrations
//!
//! The pool is only needed when `DATABASE_URL` is configured; without it the
//! service runs on in-memory stores.
//!
//! - [`connect`]: opens a pool with up to 5 connections.
//! - [`migrate`]: applies the embedded migrations from `migrations/`.

mod pool;

pub use pool::{connect, migrate};
