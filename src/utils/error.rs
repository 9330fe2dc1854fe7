use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("API returned {status}: {message}")]
    ApiStatus { status: u16, message: String },

    #[error("Not signed in or session expired")]
    Unauthenticated,

    #[error("Reservation {id}: {action} is not available ({reason})")]
    InvalidReservationAction {
        id: i64,
        action: String,
        reason: String,
    },

    #[error("Invalid time slot: '{0}'")]
    InvalidTimeSlot(String),

    #[error("Schedule index {index} out of range (list length {len})")]
    ScheduleIndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Remote,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 命令列結束碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0, // 警告，但成功
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl BookingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::HttpError(_) => ErrorCategory::Network,
            BookingError::ConfigError { .. }
            | BookingError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BookingError::ValidationError { .. }
            | BookingError::InvalidReservationAction { .. }
            | BookingError::InvalidTimeSlot(_)
            | BookingError::ScheduleIndexOutOfRange { .. } => ErrorCategory::Input,
            BookingError::ApiStatus { .. } | BookingError::Unauthenticated => {
                ErrorCategory::Remote
            }
            BookingError::IoError(_)
            | BookingError::SerializationError(_)
            | BookingError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BookingError::InvalidReservationAction { .. }
            | BookingError::ScheduleIndexOutOfRange { .. } => ErrorSeverity::Low,
            BookingError::HttpError(_) | BookingError::Unauthenticated => ErrorSeverity::Medium,
            BookingError::ApiStatus { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            BookingError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::HttpError(_) => "Could not reach the booking service".to_string(),
            BookingError::Unauthenticated => "You need to log in first".to_string(),
            BookingError::ApiStatus { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and api.base_url",
            ErrorCategory::Configuration => "Review the config file or command line flags",
            ErrorCategory::Input => "Check the values you entered and try again",
            ErrorCategory::Remote => match self {
                BookingError::Unauthenticated => "Run `booking login` to start a new session",
                _ => "Try again later or contact the activity host",
            },
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
