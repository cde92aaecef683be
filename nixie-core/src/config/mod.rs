//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware build validates
//! `clock.toml` against these and embeds them as postcard binary data.

pub mod types;

pub use types::*;
