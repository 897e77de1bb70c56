//! Domain error types.

/// Top-level error type for macross.
#[derive(Debug, thiserror::Error)]
pub enum MacrossError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("insufficient data: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("invalid price series: {reason}")]
    InvalidSeries { reason: String },

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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MacrossError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        MacrossError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(
            self,
            MacrossError::ConfigParse { .. }
                | MacrossError::ConfigMissing { .. }
                | MacrossError::ConfigInvalid { .. }
        )
    }
}

impl From<&MacrossError> for std::process::ExitCode {
    fn from(err: &MacrossError) -> Self {
        let code: u8 = match err {
            MacrossError::Io(_) => 1,
            MacrossError::ConfigParse { .. }
            | MacrossError::ConfigMissing { .. }
            | MacrossError::ConfigInvalid { .. } => 2,
            MacrossError::EmptySeries
            | MacrossError::InsufficientData { .. }
            | MacrossError::InvalidSeries { .. }
            | MacrossError::Data { .. } => 3,
            MacrossError::Report { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_invalid_message() {
        let err = MacrossError::invalid("strategy", "long_window", "must exceed short_window");
        assert_eq!(
            err.to_string(),
            "invalid config value [strategy] long_window: must exceed short_window"
        );
        assert!(err.is_config());
    }

    #[test]
    fn empty_series_is_not_config() {
        assert!(!MacrossError::EmptySeries.is_config());
        assert_eq!(MacrossError::EmptySeries.to_string(), "price series is empty");
    }

    #[test]
    fn insufficient_data_message() {
        let err = MacrossError::InsufficientData { bars: 0, minimum: 1 };
        assert_eq!(err.to_string(), "insufficient data: have 0 bars, need 1");
    }
}
