//! Layered settings: struct defaults, an optional TOML file and
//! `CADENZA__`-prefixed environment variables.

mod load;
mod schema;

pub use schema::*;
