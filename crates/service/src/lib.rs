//! Service layer providing the time entry CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses entity definitions and payloads from the `models` crate.
//! - Lookups by id report `Lookup::NotFound` instead of an error.

pub mod errors;
pub mod lookup;
pub mod db;
pub mod time_entry;
#[cfg(test)]
pub mod test_support;

pub use lookup::Lookup;
