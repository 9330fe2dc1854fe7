use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "https://sp-globalnomad-api.vercel.app";
pub const DEFAULT_SESSION_PATH: &str = ".booking/session.json";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub team_id: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_session_path() -> String {
    DEFAULT_SESSION_PATH.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: default_base_url(),
                team_id: String::new(),
                timeout_seconds: None,
            },
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BookingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOOKING_TEAM_ID})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("Invalid env pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl ConfigProvider for ClientConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn team_id(&self) -> &str {
        &self.api.team_id
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn session_path(&self) -> &str {
        &self.session.path
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_non_empty_string("api.team_id", &self.api.team_id)?;
        validate_positive_number("api.timeout_seconds", self.timeout_seconds(), 1)?;
        validate_path("session.path", &self.session.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com"
team_id = "4-14"
timeout_seconds = 3

[session]
path = "/tmp/booking/session.json"

[logging]
verbose = true
json = true
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_base_url(), "https://api.example.com");
        assert_eq!(config.team_id(), "4-14");
        assert_eq!(config.timeout_seconds(), 3);
        assert_eq!(config.session_path(), "/tmp/booking/session.json");
        assert!(config.verbose());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = ClientConfig::from_toml_str("[api]\nteam_id = \"1-01\"\n").unwrap();

        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.session_path(), DEFAULT_SESSION_PATH);
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOOKING_TEST_TEAM_ID", "9-99");

        let config =
            ClientConfig::from_toml_str("[api]\nteam_id = \"${BOOKING_TEST_TEAM_ID}\"\n").unwrap();
        assert_eq!(config.team_id(), "9-99");

        std::env::remove_var("BOOKING_TEST_TEAM_ID");
    }

    #[test]
    fn test_config_validation() {
        let missing_team = ClientConfig::default();
        assert!(missing_team.validate().is_err());

        let bad_url = ClientConfig::from_toml_str(
            "[api]\nbase_url = \"invalid-url\"\nteam_id = \"4-14\"\n",
        )
        .unwrap();
        assert!(bad_url.validate().is_err());

        let zero_timeout =
            ClientConfig::from_toml_str("[api]\nteam_id = \"4-14\"\ntimeout_seconds = 0\n")
                .unwrap();
        assert!(zero_timeout.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nteam_id = \"file-team\"\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.team_id(), "file-team");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = ClientConfig::from_toml_str("[api\nteam_id = 1");
        assert!(matches!(result, Err(BookingError::ConfigError { .. })));
    }
}
