//! Remote document store client.
//!
//! The store is a hosted Postgres fronted by a PostgREST API (Supabase).
//! One build performs one query: all published public rows for the site
//! owner, newest first. There is no retry or backoff — a failed fetch
//! aborts the build and the operator re-runs it.

#![warn(missing_docs)]

mod client;
mod config;
mod error;

pub use client::DocumentStore;
pub use config::StoreConfig;
pub use error::StoreError;
