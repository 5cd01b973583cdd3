//! Domain error types.

/// Top-level error type for stocklens.
#[derive(Debug, thiserror::Error)]
pub enum StocklensError {
    #[error("invalid parameter for {indicator}: {reason}")]
    InvalidParameter { indicator: String, reason: String },

    #[error("insufficient data for {indicator}: have {have} points, need {need}")]
    InsufficientData {
        indicator: String,
        have: usize,
        need: usize,
    },

    #[error("invalid price series: {reason}")]
    InvalidSeries { reason: String },

    #[error("fetch failed: {reason}")]
    Fetch { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StocklensError {
    pub fn invalid_parameter(indicator: &str, reason: impl Into<String>) -> Self {
        StocklensError::InvalidParameter {
            indicator: indicator.to_string(),
            reason: reason.into(),
        }
    }

    pub fn insufficient_data(indicator: &str, have: usize, need: usize) -> Self {
        StocklensError::InsufficientData {
            indicator: indicator.to_string(),
            have,
            need,
        }
    }
}

impl From<&StocklensError> for std::process::ExitCode {
    fn from(err: &StocklensError) -> Self {
        let code: u8 = match err {
            StocklensError::Io(_) => 1,
            StocklensError::ConfigParse { .. }
            | StocklensError::ConfigMissing { .. }
            | StocklensError::ConfigInvalid { .. } => 2,
            StocklensError::Fetch { .. } => 3,
            StocklensError::InvalidParameter { .. } => 4,
            StocklensError::InsufficientData { .. } | StocklensError::InvalidSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
