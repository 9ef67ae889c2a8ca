//! Runtime settings, resolved once at startup and passed down explicitly.

use reqwest::Url;

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";
pub const API_URL_ENV: &str = "LOAN_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the prediction service, without a trailing slash.
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Resolve settings from the CLI flag, then the environment (`.env` included).
    pub fn resolve(cli_api_url: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let env_api_url = std::env::var(API_URL_ENV).ok();
        Self::from_sources(cli_api_url, env_api_url.as_deref())
    }

    /// Precedence: CLI flag, environment, built-in default.
    pub fn from_sources(cli_api_url: Option<&str>, env_api_url: Option<&str>) -> Result<Self, AppError> {
        let raw = [cli_api_url, env_api_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);

        Ok(Self {
            api_base_url: normalize_base_url(raw)?,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| AppError::new(2, format!("Invalid API base URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::new(
            2,
            format!("API base URL must use http or https (got '{}').", url.scheme()),
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_service() {
        let settings = Settings::from_sources(None, None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_base_url, "http://localhost:8001");
    }

    #[test]
    fn cli_flag_wins_over_environment() {
        let settings =
            Settings::from_sources(Some("http://cli:9000"), Some("http://env:9000")).unwrap();
        assert_eq!(settings.api_base_url, "http://cli:9000");

        let settings = Settings::from_sources(None, Some("http://env:9000")).unwrap();
        assert_eq!(settings.api_base_url, "http://env:9000");
    }

    #[test]
    fn blank_values_fall_back_to_default() {
        let settings = Settings::from_sources(Some("  "), None).unwrap();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);

        let settings = Settings::from_sources(Some(""), Some("http://env:9000")).unwrap();
        assert_eq!(settings.api_base_url, "http://env:9000");
    }

    #[test]
    fn trailing_slash_is_removed() {
        let settings = Settings::from_sources(Some("https://loans.example.com/api/"), None).unwrap();
        assert_eq!(settings.api_base_url, "https://loans.example.com/api");
    }

    #[test]
    fn rejects_non_http_urls() {
        let err = Settings::from_sources(Some("ftp://loans.example.com"), None).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let err = Settings::from_sources(Some("not a url"), None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
