//! API-facing models
//!
//! Ids are plain record keys and timestamps are RFC 3339 strings.
//! Field names are camelCase on the wire.

pub mod booking;
pub mod product;

pub use booking::*;
pub use product::*;
