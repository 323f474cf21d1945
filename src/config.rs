use crate::core::get_config_dir;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SubmissionConfig {
    /// Provider recorded on jobs when none is given on the command line
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Workflow name recorded on jobs when none is given on the command line
    #[serde(default)]
    pub default_workflow: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct DisplayConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_provider() -> String {
    "docker".to_string()
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            default_workflow: None,
        }
    }
}

pub fn load_config(config_path: Option<&PathBuf>) -> Result<Config, config::ConfigError> {
    let mut config_vec = vec![];

    // Default config file
    if let Ok(default_config_path) = get_config_dir().map(|d| d.join("runjob.toml")) {
        if default_config_path.exists() {
            config_vec.push(default_config_path);
        }
    }

    // User-provided config file, layered over the default one
    if let Some(config_path) = config_path {
        if config_path.exists() {
            config_vec.push(config_path.clone());
        } else {
            tracing::warn!("Config file {config_path:?} not found.");
        }
    }

    let settings = config::Config::builder();
    let settings = config_vec.iter().fold(settings, |s, path| {
        s.add_source(config::File::from(path.as_path()))
    });

    settings
        .add_source(
            config::Environment::with_prefix("RUNJOB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
