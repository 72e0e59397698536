pub mod repository;
pub mod service;

pub use repository::{SeaOrmTimeEntryRepository, TimeEntryRepository};
pub use service::TimeEntryService;
