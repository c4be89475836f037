use std::num::NonZeroU32;

use derive_more::{Display, From};
use serde::Deserialize;
use serde_valid::yaml::FromYamlStr;
use serde_valid::Validate;

/// Cap on the number of trainers a single find-all returns unless configured otherwise
pub const DEFAULT_FIND_ALL_LIMIT: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(limit) => limit,
    None => panic!("find-all limit must be non-zero"),
};

// Config Type
#[derive(Debug, Clone)]
pub struct Config {
    // Infra Dependencies
    pub infra: InfraConfig,
    // Database and collection the trainers live in
    pub database: DatabaseConfig,
    // Behaviour of the demo driver
    pub demo: DemoConfig,
}

impl Config {
    pub fn from_file(file_path: &str) -> Result<Self, ConfigError> {
        let config_file_content = std::fs::read_to_string(file_path)?;
        Self::from_yaml_str(&config_file_content)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let raw_config = RawConfig::from_yaml_str(s)?;

        Ok(Config {
            infra: raw_config.infra,
            database: raw_config.database,
            demo: raw_config.demo.unwrap_or_default(),
        })
    }

    /// Replace the configured MongoDB URL, e.g. with one taken from the environment.
    /// The replacement has to pass the same checks as the one in the file.
    pub fn with_mongo_url(mut self, mongo_url: String) -> Result<Self, ConfigError> {
        let infra = InfraConfig { mongo_url };
        infra.validate().map_err(ConfigError::ValidationError)?;
        self.infra = infra;
        Ok(self)
    }
}

#[derive(Debug, From, Display)]
pub enum ConfigError {
    #[display("Serde Error: {}", _0)]
    SerdeError(serde_valid::Error<serde_yaml::Error>),

    #[display("Validation Error: {}", _0)]
    ValidationError(serde_valid::validation::Errors),

    #[display("Error Reading Config File: {}", _0)]
    IoError(std::io::Error),
}

impl std::error::Error for ConfigError {}

// Intermediate Config Type as Deserialization Target
#[derive(Debug, Deserialize, Validate)]
pub struct RawConfig {
    #[validate]
    pub infra: InfraConfig,
    #[validate]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub demo: Option<DemoConfig>,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct InfraConfig {
    // The URL of the MongoDB
    #[validate(pattern = r"^mongodb(\+srv)?://[-a-zA-Z0-9@:%._\+~#=,/?&]{1,256}$")]
    pub mongo_url: String,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct DatabaseConfig {
    // The database holding the trainers collection
    #[validate(min_length = 1)]
    pub name: String,
    // The collection trainers are stored in
    #[validate(min_length = 1)]
    pub collection: String,
    // Upper bound on the number of documents a find-all returns
    #[serde(default = "default_find_all_limit")]
    pub find_all_limit: NonZeroU32,
}

fn default_find_all_limit() -> NonZeroU32 {
    DEFAULT_FIND_ALL_LIMIT
}

#[derive(Debug, Deserialize, Clone)]
pub struct DemoConfig {
    // Drop the working database once the demo script is done
    #[serde(default = "default_drop_database_on_exit")]
    pub drop_database_on_exit: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { drop_database_on_exit: default_drop_database_on_exit() }
    }
}

fn default_drop_database_on_exit() -> bool {
    true
}

#[cfg(test)]
pub fn get_sample_config() -> Config {
    Config::from_file("../../config.yaml.example").unwrap()
}
