//! Database Models
//!
//! Records as stored in SurrealDB: snake_case fields, `i64` Unix-millis
//! timestamps and a [`Thing`](surrealdb::sql::Thing) id. `api::convert`
//! turns them into the camelCase `shared::models` types.

pub mod booking;
pub mod product;

pub use booking::*;
pub use product::*;
