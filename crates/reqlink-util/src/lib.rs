#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Shared utilities for reqlink.
//!
//! Pure helpers with no logging/tracing dependencies; the core and CLI
//! crates own logging.

pub mod fs;
pub mod hash;
