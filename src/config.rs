use anyhow::Context;
use std::env;
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// REST base URL without a trailing slash, e.g. `https://host/api`.
    pub api_base_url: String,
    /// Used when the session carries no company id.
    pub default_company_id: String,
    pub page_size: usize,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "http://localhost:8080/api".to_string(),
            default_company_id: "1".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Reads `BACKOFFICE_*` variables, loading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();

        let api_base_url = env::var("BACKOFFICE_API_BASE_URL")
            .unwrap_or(defaults.api_base_url)
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("BACKOFFICE_API_BASE_URL must be an http(s) URL, got {:?}", api_base_url);
        }

        let page_size = env::var("BACKOFFICE_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let timeout_secs: u64 = match env::var("BACKOFFICE_HTTP_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("BACKOFFICE_HTTP_TIMEOUT_SECS is not a number: {:?}", v))?,
            Err(_) => 30,
        };

        Ok(Self {
            api_base_url,
            default_company_id: env::var("BACKOFFICE_DEFAULT_COMPANY_ID")
                .unwrap_or(defaults.default_company_id),
            page_size,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
