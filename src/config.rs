//! Settings schema and loading.
//!
//! The schema lives in `config::schema`; `config::load` resolves the config
//! file location and merges file and environment sources.

mod load;
mod schema;

pub use load::InvalidSetting;
pub use schema::*;

#[cfg(test)]
mod tests;
