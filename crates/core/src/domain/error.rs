// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid life expectancy: {0} (must be a positive number of years)")]
    InvalidLifeExpectancy(f64),

    #[error("Instant out of range: {0} ms since epoch")]
    InstantOutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, DomainError>;
