use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("value out of range for column {column}: {value}")]
    OutOfRange { column: &'static str, value: String },
}
