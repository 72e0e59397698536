pub mod time_entry_service;
