use std::{fmt::Display, path::Path, str::FromStr};

use miette::{bail, Context, IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// language of localized endpoints. sent as the `lang` query parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
    Es,
    Zh,
}

impl Language {
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::Zh => "zh",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            "de" => Language::De,
            "fr" => Language::Fr,
            "es" => Language::Es,
            "zh" => Language::Zh,
            other => bail!("unknown language {other:?}. expected one of en, de, fr, es, zh"),
        })
    }
}

/// Settings used to build a [`crate::Client`].
/// Missing fields in a config file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: Url,
    pub language: Language,
    pub api_key: Option<String>,
    /// schema version sent as `v`. `None` lets the api pick
    pub schema: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(crate::API_BASE_URL).expect("api base url is a valid url"),
            language: Language::default(),
            api_key: None,
            schema: None,
            user_agent: concat!("gw2api/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub const ENV_BASE_URL: &'static str = "GW2API_BASE_URL";
    pub const ENV_LANG: &'static str = "GW2API_LANG";
    pub const ENV_KEY: &'static str = "GW2API_KEY";
    pub const ENV_SCHEMA: &'static str = "GW2API_SCHEMA";

    /// read a json config file
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&src).wrap_err_with(|| format!("invalid config file {}", path.display()))
    }
    pub fn from_json(src: &str) -> Result<Self> {
        serde_json::from_str(src)
            .into_diagnostic()
            .wrap_err("failed to deserialize client config")
    }
    /// defaults overridden by `GW2API_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }
    /// apply overrides from a variable lookup. empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(base_url) = get(Self::ENV_BASE_URL) {
            self.base_url = Url::parse(&base_url)
                .into_diagnostic()
                .wrap_err_with(|| format!("{} is not a valid url", Self::ENV_BASE_URL))?;
        }
        if let Some(lang) = get(Self::ENV_LANG) {
            self.language = lang
                .parse()
                .wrap_err_with(|| format!("invalid {}", Self::ENV_LANG))?;
        }
        if let Some(key) = get(Self::ENV_KEY) {
            self.api_key = Some(key);
        }
        if let Some(schema) = get(Self::ENV_SCHEMA) {
            self.schema = Some(schema);
        }
        Ok(self)
    }
}
