//! Unified application error type.
//! All modules (store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Record checks
    // ---------------------------
    #[error("Invalid record: {0}")]
    Validation(String),

    #[error("Cannot parse value: {0}")]
    Parse(String),

    #[error("No game with id {0}")]
    RecordNotFound(u64),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Store boundary
    // ---------------------------
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store rejected the data: {0}")]
    StoreRejected(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
