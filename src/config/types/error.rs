use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid playpen.toml")]
    Toml(#[from] toml::de::Error),

    /// Section name plus what is wrong with it.
    #[error("[{0}] {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_names_the_section() {
        let err = ConfigError::Invalid("preview", "settle_ms = 20000 exceeds the maximum".into());
        assert_eq!(
            err.to_string(),
            "[preview] settle_ms = 20000 exceeds the maximum"
        );
    }

    #[test]
    fn test_toml_error_keeps_source() {
        let err: ConfigError = toml::from_str::<toml::Value>("[serve")
            .unwrap_err()
            .into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
