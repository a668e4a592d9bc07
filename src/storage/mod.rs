//! Storage layer for sp-listings
//!
//! Profile configuration lives in a TOML file; the access token only ever
//! comes from the command line or the environment.

use crate::error::StorageError;

pub mod config;
pub mod credentials;

type Result<T> = std::result::Result<T, StorageError>;
