use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("time entry {0} not found")]
    NotFound(i32),
    #[error("database error: {0}")]
    Db(String),
}
