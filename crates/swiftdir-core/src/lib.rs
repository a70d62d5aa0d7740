//! Core types and services for the SWIFT code directory.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! storage backend plugs in through [`store::DirectoryStore`]; the parser and
//! the HTTP layer both depend on this crate, never the other way round.

pub mod code;
pub mod error;
pub mod ingest;
pub mod lookup;
pub mod model;
pub mod mutation;
pub mod row;
pub mod store;
pub mod view;

pub use error::{Error, Result};
