/// Application environment detection.
///
/// Read from `BOOKSTORE_APP_ENV`; anything unrecognized falls back to
/// development so a bare checkout runs without ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

/// Environment variable that selects the application environment
pub const APP_ENV_VAR: &str = "BOOKSTORE_APP_ENV";

impl Environment {
    /// Detects the environment from the process environment.
    pub fn from_env() -> Self {
        match std::env::var(APP_ENV_VAR) {
            Ok(value) => Self::from_str_lossy(&value),
            Err(_) => Environment::Development,
        }
    }

    fn from_str_lossy(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "test" => Environment::Test,
            _ => Environment::Development,
        }
    }

    /// Name used for the `{environment}.toml` configuration layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_names() {
        assert_eq!(Environment::from_str_lossy("production"), Environment::Production);
        assert_eq!(Environment::from_str_lossy("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_lossy("test"), Environment::Test);
        assert_eq!(Environment::from_str_lossy("development"), Environment::Development);
    }

    #[test]
    fn unknown_names_fall_back_to_development() {
        assert_eq!(Environment::from_str_lossy("staging"), Environment::Development);
        assert_eq!(Environment::from_str_lossy(""), Environment::Development);
    }
}
