pub mod errors;
pub mod db;
pub mod time_entry;
