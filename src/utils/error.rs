use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid calendar month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid time label '{label}': {reason}")]
    InvalidTimeLabel { label: String, reason: String },

    #[error("Booking is incomplete: missing {missing}")]
    IncompleteBooking { missing: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {message}")]
    HttpError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Calendar,
    Booking,
    Configuration,
    System,
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::InvalidMonth { .. }
            | BookingError::InvalidTimeLabel { .. } => ErrorCategory::Calendar,
            BookingError::IncompleteBooking { .. } => ErrorCategory::Booking,
            BookingError::ConfigError { .. }
            | BookingError::ConfigValidationError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BookingError::IoError(_) | BookingError::HttpError { .. } => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BookingError::InvalidMonth { .. } => "Use a month between 1 and 12",
            BookingError::InvalidTimeLabel { .. } => {
                "Use a slot label such as 10:00am or 10:00"
            }
            BookingError::IncompleteBooking { .. } => {
                "Pick a date and a time, then fill in name and email"
            }
            BookingError::ConfigError { .. }
            | BookingError::ConfigValidationError { .. }
            | BookingError::InvalidConfigValueError { .. }
            | BookingError::MissingConfigError { .. } => {
                "Check the configuration file and environment variables"
            }
            BookingError::IoError(_) => "Check that the file exists and is readable",
            BookingError::HttpError { .. } => "Check the webhook URL and network connectivity",
        }
    }
}

#[cfg(feature = "webhook")]
impl From<reqwest::Error> for BookingError {
    fn from(e: reqwest::Error) -> Self {
        BookingError::HttpError {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
