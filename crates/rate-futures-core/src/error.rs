use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateFuturesError {
    #[error("Invalid coupon schedule: last coupon {last_coupon} and next coupon {next_coupon} leave a zero-day accrual period")]
    InvalidSchedule {
        last_coupon: NaiveDate,
        next_coupon: NaiveDate,
    },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Underlying not found with id {0}")]
    UnderlyingNotFound(u64),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for RateFuturesError {
    fn from(e: serde_json::Error) -> Self {
        RateFuturesError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for RateFuturesError {
    fn from(e: serde_yaml::Error) -> Self {
        RateFuturesError::ConfigError(e.to_string())
    }
}
