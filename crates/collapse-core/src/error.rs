use thiserror::Error;

/// Errors raised by the ambient surfaces of the crate.
///
/// The collapse engine itself never fails on its own account: failures from
/// adjacency contracts, sources or consumers reach the caller untranslated.
#[derive(Error, Debug)]
pub enum CollapseError {
    #[error("Invalid setting '{setting}': {message}")]
    InvalidSetting { setting: String, message: String },

    #[error("Cannot parse token '{token}' at position {position}: {message}")]
    Parse {
        token: String,
        position: usize,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, CollapseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        let err = CollapseError::InvalidSetting {
            setting: "min_split_len".to_string(),
            message: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'min_split_len': must be at least 1"
        );
    }

    #[test]
    fn error_parse_formats_correctly() {
        let err = CollapseError::Parse {
            token: "x7".to_string(),
            position: 3,
            message: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot parse token 'x7' at position 3: invalid digit found in string"
        );
    }
}
