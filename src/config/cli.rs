use crate::app::render::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::config::FinderConfig;
use crate::domain::locations::{LocationKind, LocationSelection};
use crate::utils::error::{FinderError, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "college-finder")]
#[command(about = "Find IT & Management colleges across India")]
pub struct CliConfig {
    /// Custom location (area, city or state)
    #[arg(value_name = "LOCATION")]
    pub location: Vec<String>,

    /// Pick a state or union territory from the built-in list
    #[arg(long, conflicts_with_all = ["city", "location"])]
    pub state: Option<String>,

    /// Pick a major city from the built-in list
    #[arg(long, conflicts_with = "location")]
    pub city: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub api_endpoint: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    /// Request timeout for each model call; no timeout when omitted
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print every result instead of the first page
    #[arg(long)]
    pub all: bool,

    /// Start an interactive search session
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long, help = "List the selectable states and exit")]
    pub list_states: bool,

    #[arg(long, help = "List the selectable cities and exit")]
    pub list_cities: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 合併設定：預設值 < TOML 檔案 < 命令列
    pub fn resolve(&self) -> Result<FinderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                FinderConfig::from_toml(&TomlConfig::from_file(path)?)
            }
            None => FinderConfig::default(),
        };

        if let Some(key) = self.api_key.as_ref().filter(|key| !key.trim().is_empty()) {
            config.api_key = Some(key.clone());
        }
        if let Some(endpoint) = &self.api_endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config.temperature = self.temperature.or(config.temperature);
        config.timeout_seconds = self.timeout_seconds.or(config.timeout_seconds);
        config.page_size = self.page_size.unwrap_or(config.page_size);
        config.format = self.format.unwrap_or(config.format);

        Ok(config)
    }

    /// 命令列指定的搜尋地點；--state / --city 必須是清單中的名稱
    pub fn location_request(&self) -> Result<Option<String>> {
        let mut selection = LocationSelection::default();

        if let Some(state) = &self.state {
            selection.switch_kind(LocationKind::State);
            if !selection.select(state) {
                return Err(unknown_location("state", state, "--list-states"));
            }
        } else if let Some(city) = &self.city {
            selection.switch_kind(LocationKind::City);
            if !selection.select(city) {
                return Err(unknown_location("city", city, "--list-cities"));
            }
        } else {
            selection.set_custom(&self.location.join(" "));
        }

        Ok(selection.resolve())
    }
}

fn unknown_location(field: &str, value: &str, list_flag: &str) -> FinderError {
    FinderError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!(
            "Not in the built-in list, see {} or pass it as a custom location",
            list_flag
        ),
    }
}
