use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::time_entry::{SeaOrmTimeEntryRepository, TimeEntryService};

/// Handles shared by every request; cloned per handler by axum.
#[derive(Clone)]
pub struct ServerState {
    pub time_entries: TimeEntryService,
}

impl ServerState {
    pub fn new(time_entries: TimeEntryService) -> Self {
        Self { time_entries }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(TimeEntryService::new(Arc::new(SeaOrmTimeEntryRepository { db })))
    }
}
