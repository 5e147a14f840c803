use serde::Deserialize;
use shared::error::RagError;
use shared::types::Result;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

pub const DEFAULT_SETTINGS_PATH: &str = "appsettings.json";
pub const DEFAULT_SEARCH_API_VERSION: &str = "2023-11-01";
pub const DEFAULT_OPENAI_API_VERSION: &str = "2024-06-01";

const SEARCH_KEY_ENV: &str = "AZURE_SEARCH_API_KEY";
const OPENAI_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";

#[derive(Clone)]
pub struct SearchSettings {
    pub service_url: String,
    pub index_name: String,
    pub api_key: String,
    pub api_version: String,
}

#[derive(Clone)]
pub struct OpenAiSettings {
    pub endpoint: String,
    pub embedding_deployment: String,
    pub chat_deployment: String,
    pub api_key: String,
    pub api_version: String,
    pub embedding_dimensions: Option<usize>,
}

/// Endpoints and credentials for both services, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub search: SearchSettings,
    pub openai: OpenAiSettings,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct RawSettings {
    #[serde(default)]
    azure_search: RawSearch,
    #[serde(default, rename = "AzureOpenAI")]
    azure_openai: RawOpenAi,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct RawSearch {
    service_url: Option<String>,
    index_name: Option<String>,
    api_key: Option<String>,
    api_version: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct RawOpenAi {
    endpoint: Option<String>,
    embedding_deployment: Option<String>,
    chat_deployment: Option<String>,
    api_key: Option<String>,
    api_version: Option<String>,
    embedding_dimensions: Option<usize>,
}

impl Config {
    /// Read the settings file, letting `.env` / process environment supply
    /// the API keys.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            RagError::configuration(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json_with(&text, |name| env::var(name).ok())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_json_with(text, |_| None)
    }

    /// Parse settings, consulting `lookup` for key overrides.
    pub fn from_json_with(text: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut raw: RawSettings = serde_json::from_str(text)
            .map_err(|err| RagError::configuration(format!("malformed settings: {err}")))?;

        if let Some(key) = lookup(SEARCH_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            raw.azure_search.api_key = Some(key);
        }
        if let Some(key) = lookup(OPENAI_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            raw.azure_openai.api_key = Some(key);
        }

        let search = SearchSettings {
            service_url: required(raw.azure_search.service_url, "AzureSearch:ServiceUrl")?,
            index_name: required(raw.azure_search.index_name, "AzureSearch:IndexName")?,
            api_key: required(raw.azure_search.api_key, "AzureSearch:ApiKey")?,
            api_version: optional(raw.azure_search.api_version)
                .unwrap_or_else(|| DEFAULT_SEARCH_API_VERSION.to_string()),
        };
        let openai = OpenAiSettings {
            endpoint: required(raw.azure_openai.endpoint, "AzureOpenAI:Endpoint")?,
            embedding_deployment: required(
                raw.azure_openai.embedding_deployment,
                "AzureOpenAI:EmbeddingDeployment",
            )?,
            chat_deployment: required(raw.azure_openai.chat_deployment, "AzureOpenAI:ChatDeployment")?,
            api_key: required(raw.azure_openai.api_key, "AzureOpenAI:ApiKey")?,
            api_version: optional(raw.azure_openai.api_version)
                .unwrap_or_else(|| DEFAULT_OPENAI_API_VERSION.to_string()),
            embedding_dimensions: raw.azure_openai.embedding_dimensions,
        };
        Ok(Self { search, openai })
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, key: &str) -> Result<String> {
    optional(value).ok_or_else(|| RagError::configuration(format!("missing setting {key}")))
}

impl fmt::Debug for SearchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSettings")
            .field("service_url", &self.service_url)
            .field("index_name", &self.index_name)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl fmt::Debug for OpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiSettings")
            .field("endpoint", &self.endpoint)
            .field("embedding_deployment", &self.embedding_deployment)
            .field("chat_deployment", &self.chat_deployment)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("embedding_dimensions", &self.embedding_dimensions)
            .finish()
    }
}
