#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::app::render::OutputFormat;
use crate::core::controller::DEFAULT_PAGE_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

/// 合併 TOML 與命令列後的最終設定
#[derive(Clone)]
pub struct FinderConfig {
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
    pub page_size: usize,
    pub format: OutputFormat,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            timeout_seconds: None,
            page_size: DEFAULT_PAGE_SIZE,
            format: OutputFormat::Text,
        }
    }
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_endpoint", &self.api_endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("page_size", &self.page_size)
            .field("format", &self.format)
            .finish()
    }
}

impl FinderConfig {
    /// 以 TOML 檔案內容覆蓋預設值
    pub fn from_toml(file: &TomlConfig) -> Self {
        let mut config = Self::default();

        if let Some(model) = &file.model {
            if let Some(endpoint) = &model.endpoint {
                config.api_endpoint = endpoint.clone();
            }
            if let Some(name) = &model.name {
                config.model = name.clone();
            }
            config.temperature = model.temperature.or(config.temperature);
            config.timeout_seconds = model.timeout_seconds.or(config.timeout_seconds);
        }
        config.api_key = file.api_key().map(str::to_string);

        if let Some(display) = &file.display {
            config.page_size = display.page_size.unwrap_or(config.page_size);
            config.format = display.format.unwrap_or(config.format);
        }

        config
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

impl ConfigProvider for FinderConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for FinderConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("model.endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("model.name", &self.model)?;
        validation::validate_positive_number("display.page_size", self.page_size, 1)?;

        if let Some(temperature) = self.temperature {
            validation::validate_range("model.temperature", temperature, 0.0, 2.0)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("model.timeout_seconds", timeout as usize, 1)?;
        }

        Ok(())
    }
}
