//! Layered configuration for the lead board.
//!
//! Settings are read from `.leadboard/board.toml`, then environment variables,
//! then CLI flags, each layer overriding the previous one.
//!
//! # Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "data"          # relative to .leadboard/
//! key_prefix = "kanban_"
//!
//! [board]
//! default_pipeline = "pipeline1"
//! id_strategy = "uuid"       # or "sequential"
//! seed_demo_data = true
//!
//! [logging]
//! level = "info"
//! format = "pretty"          # or "json"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::board::ids::IdStrategy;
use crate::board::store::DEFAULT_KEY_PREFIX;
use crate::board::{BoardOptions, BoardStorage, FileBackend};

pub const BOARD_DIR: &str = ".leadboard";
pub const CONFIG_FILE: &str = "board.toml";

const ENV_DATA_DIR: &str = "LEADBOARD_DATA_DIR";
const ENV_KEY_PREFIX: &str = "LEADBOARD_KEY_PREFIX";
const ENV_LOG_FORMAT: &str = "LEADBOARD_LOG_FORMAT";

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines on stderr
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => anyhow::bail!("Invalid log format '{}'. Valid values: pretty, json", s),
        }
    }
}

/// Where board data lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    /// Data directory, relative to the `.leadboard` directory unless absolute
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Prefix applied to every storage key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key_prefix: default_key_prefix(),
        }
    }
}

/// Board behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSection {
    /// Pipeline shown when none is given on the command line
    #[serde(default)]
    pub default_pipeline: Option<String>,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    /// Write demo data into an empty store on first open
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            default_pipeline: None,
            id_strategy: IdStrategy::default(),
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// The complete board.toml structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardToml {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub board: BoardSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl BoardToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse board.toml")
    }

    /// Load `board.toml` from `board_dir`, or defaults if it doesn't exist.
    pub fn load_or_default(board_dir: &Path) -> Result<Self> {
        let config_path = board_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize board.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Return warnings for settings that parse but make no sense.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.storage.key_prefix.trim().is_empty() {
            warnings.push(
                "Empty key_prefix: boards sharing a data directory will overwrite each other"
                    .to_string(),
            );
        }
        if self.storage.key_prefix.contains(['/', '\\']) {
            warnings.push(format!(
                "key_prefix '{}' contains a path separator",
                self.storage.key_prefix
            ));
        }
        if let Some(pipeline) = &self.board.default_pipeline
            && pipeline.trim().is_empty()
        {
            warnings.push("default_pipeline is set but empty".to_string());
        }
        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            warnings.push(format!(
                "Invalid logging level '{}': expected a filter like 'info' or 'leadboard=debug'",
                self.logging.level
            ));
        }

        warnings
    }
}

/// Locate the `.leadboard` directory for a project.
pub fn get_board_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(BOARD_DIR)
}

/// Resolved configuration.
///
/// Merges, in increasing priority:
/// 1. board.toml
/// 2. environment variables
/// 3. CLI arguments
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub project_dir: PathBuf,
    pub board_dir: PathBuf,
    pub toml: BoardToml,
    pub verbose: bool,
    /// CLI override for the pipeline to show
    pub cli_pipeline: Option<String>,
    /// CLI override for the log format
    pub cli_log_format: Option<LogFormat>,
}

impl BoardConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let board_dir = get_board_dir(&project_dir);
        let toml = BoardToml::load_or_default(&board_dir)?;

        Ok(Self {
            project_dir,
            board_dir,
            toml,
            verbose: false,
            cli_pipeline: None,
            cli_log_format: None,
        })
    }

    pub fn with_cli_args(
        project_dir: PathBuf,
        verbose: bool,
        pipeline: Option<String>,
        log_format: Option<LogFormat>,
    ) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.verbose = verbose;
        config.cli_pipeline = pipeline;
        config.cli_log_format = log_format;
        Ok(config)
    }

    pub fn config_file(&self) -> PathBuf {
        self.board_dir.join(CONFIG_FILE)
    }

    /// Data directory (env → file → default). Relative paths resolve
    /// against the `.leadboard` directory.
    pub fn data_dir(&self) -> PathBuf {
        let dir = std::env::var(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.toml.storage.data_dir.clone());
        if dir.is_absolute() {
            dir
        } else {
            self.board_dir.join(dir)
        }
    }

    /// Storage key prefix (env → file → default).
    pub fn key_prefix(&self) -> String {
        std::env::var(ENV_KEY_PREFIX).unwrap_or_else(|_| self.toml.storage.key_prefix.clone())
    }

    /// Pipeline to open (CLI → file).
    pub fn pipeline(&self) -> Option<String> {
        self.cli_pipeline
            .clone()
            .or_else(|| self.toml.board.default_pipeline.clone())
    }

    /// Log format (CLI → env → file). An unparseable env value is ignored.
    pub fn log_format(&self) -> LogFormat {
        self.cli_log_format
            .or_else(|| std::env::var(ENV_LOG_FORMAT).ok()?.parse().ok())
            .unwrap_or(self.toml.logging.format)
    }

    /// Log filter directive used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> String {
        if self.verbose {
            "leadboard=debug".to_string()
        } else {
            self.toml.logging.level.clone()
        }
    }

    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            seed_demo_data: self.toml.board.seed_demo_data,
            id_strategy: self.toml.board.id_strategy,
            default_pipeline: self.pipeline(),
        }
    }

    pub fn storage(&self) -> BoardStorage<FileBackend> {
        BoardStorage::new(FileBackend::new(self.data_dir()), self.key_prefix())
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let toml = BoardToml::parse("").unwrap();
        assert_eq!(toml.storage.key_prefix, "kanban_");
        assert_eq!(toml.storage.data_dir, PathBuf::from("data"));
        assert!(toml.board.seed_demo_data);
        assert_eq!(toml.board.id_strategy, IdStrategy::Uuid);
        assert_eq!(toml.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_parse_all_sections() {
        let content = r#"
[storage]
data_dir = "/tmp/boards"
key_prefix = "crm_"

[board]
default_pipeline = "pipeline2"
id_strategy = "sequential"
seed_demo_data = false

[logging]
level = "debug"
format = "json"
"#;
        let toml = BoardToml::parse(content).unwrap();
        assert_eq!(toml.storage.data_dir, PathBuf::from("/tmp/boards"));
        assert_eq!(toml.storage.key_prefix, "crm_");
        assert_eq!(toml.board.default_pipeline.as_deref(), Some("pipeline2"));
        assert_eq!(toml.board.id_strategy, IdStrategy::Sequential);
        assert!(!toml.board.seed_demo_data);
        assert_eq!(toml.logging.level, "debug");
        assert_eq!(toml.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_rejects_unknown_strategy() {
        let err = BoardToml::parse("[board]\nid_strategy = \"timestamp\"\n").unwrap_err();
        assert!(format!("{:#}", err).contains("board.toml"));
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_validate_flags_bad_values() {
        let mut toml = BoardToml::default();
        assert!(toml.validate().is_empty());

        toml.storage.key_prefix = "a/b".to_string();
        toml.board.default_pipeline = Some(" ".to_string());
        toml.logging.level = "leadboard=loud".to_string();
        assert_eq!(toml.validate().len(), 3);
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut toml = BoardToml::default();
        toml.storage.key_prefix = "test_".to_string();
        toml.board.id_strategy = IdStrategy::Sequential;
        toml.save(&path).unwrap();

        let loaded = BoardToml::load(&path).unwrap();
        assert_eq!(loaded.storage.key_prefix, "test_");
        assert_eq!(loaded.board.id_strategy, IdStrategy::Sequential);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let toml = BoardToml::load_or_default(dir.path()).unwrap();
        assert_eq!(toml.storage.key_prefix, DEFAULT_KEY_PREFIX);
    }

    #[test]
    fn test_config_paths_resolve_under_board_dir() {
        let dir = tempdir().unwrap();
        let config = BoardConfig::new(dir.path().to_path_buf()).unwrap();
        assert!(config.board_dir.ends_with(".leadboard"));
        assert!(config.config_file().ends_with(".leadboard/board.toml"));
        if std::env::var(ENV_DATA_DIR).is_err() {
            assert!(config.data_dir().ends_with(".leadboard/data"));
        }
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempdir().unwrap();
        let board_dir = dir.path().join(BOARD_DIR);
        std::fs::create_dir_all(&board_dir).unwrap();
        std::fs::write(
            board_dir.join(CONFIG_FILE),
            "[board]\ndefault_pipeline = \"pipeline1\"\nid_strategy = \"sequential\"\n",
        )
        .unwrap();

        let config = BoardConfig::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(config.pipeline().as_deref(), Some("pipeline1"));

        let config = BoardConfig::with_cli_args(
            dir.path().to_path_buf(),
            true,
            Some("pipeline2".to_string()),
            Some(LogFormat::Json),
        )
        .unwrap();
        assert_eq!(config.pipeline().as_deref(), Some("pipeline2"));
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.log_level(), "leadboard=debug");

        let options = config.board_options();
        assert_eq!(options.id_strategy, IdStrategy::Sequential);
        assert_eq!(options.default_pipeline.as_deref(), Some("pipeline2"));
    }

    #[test]
    fn test_absolute_data_dir_is_kept() {
        let dir = tempdir().unwrap();
        let board_dir = dir.path().join(BOARD_DIR);
        std::fs::create_dir_all(&board_dir).unwrap();
        let elsewhere = dir.path().join("elsewhere");
        let mut toml = BoardToml::default();
        toml.storage.data_dir = elsewhere.clone();
        toml.save(&board_dir.join(CONFIG_FILE)).unwrap();

        let config = BoardConfig::new(dir.path().to_path_buf()).unwrap();
        if std::env::var(ENV_DATA_DIR).is_err() {
            assert!(config.data_dir().ends_with("elsewhere"));
        }
    }
}
