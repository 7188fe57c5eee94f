use crate::error::PollError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self, PollError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(PollError::Config(format!(
                "POLL_OUTPUT must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// JSON file of poll scripts; the built-in prompts are used when unset.
    pub definitions_path: Option<PathBuf>,
    pub output: OutputFormat,
}

impl Config {
    /// Reads settings from the process environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, PollError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, PollError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let definitions_path = lookup("POLL_DEFINITIONS")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let output = match lookup("POLL_OUTPUT") {
            Some(value) => OutputFormat::parse(&value)?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            definitions_path,
            output,
        })
    }
}
