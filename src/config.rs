use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GateError, Result};

/// File name looked up at the repository top level
pub const CONFIG_FILE_NAME: &str = "gitgate.toml";

/// Represents the complete configuration for git-gate.
///
/// Describes the project layout being guarded: which files must exist, how
/// sources map to tests, and which external commands test, vet and refresh
/// documentation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote whose tags the local tags are compared against
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Name the hook scripts use to call back into this tool
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default = "default_required_files")]
    pub files: Vec<RequiredFile>,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub toc: TocConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_binary() -> String {
    "git-gate".to_string()
}

/// A file that must exist at the repository top level.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RequiredFile {
    pub path: String,

    /// Commands that would create the file; empty means "write one by hand"
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl RequiredFile {
    pub fn new(path: &str, suggestions: &[&str]) -> Self {
        RequiredFile {
            path: path.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Returns the default scaffold of a Go project.
fn default_required_files() -> Vec<RequiredFile> {
    vec![
        RequiredFile::new("README.md", &[]),
        RequiredFile::new("LICENSE.md", &[]),
        RequiredFile::new(".gitignore", &["echo .git > .gitignore"]),
        RequiredFile::new("go.mod", &["go mod init", "go mod tidy"]),
    ]
}

/// How source files map onto their test files.
///
/// A source `<stem>.<extension>` expects a sibling
/// `<stem><test_suffix>.<extension>`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourcesConfig {
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_test_suffix")]
    pub test_suffix: String,

    /// Directory names never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

fn default_extension() -> String {
    "go".to_string()
}

fn default_test_suffix() -> String {
    "_test".to_string()
}

fn default_skip_dirs() -> Vec<String> {
    vec![".git".to_string(), "vendor".to_string()]
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            extension: default_extension(),
            test_suffix: default_test_suffix(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

/// External commands, each given as program followed by arguments.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_test_command")]
    pub test: Vec<String>,

    #[serde(default = "default_vet_command")]
    pub vet: Vec<String>,

    #[serde(default = "default_toc_command")]
    pub toc: Vec<String>,
}

fn words(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn default_test_command() -> Vec<String> {
    words("go test ./...")
}

fn default_vet_command() -> Vec<String> {
    words("go vet ./...")
}

fn default_toc_command() -> Vec<String> {
    words("mdtoc --inplace README.md")
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            test: default_test_command(),
            vet: default_vet_command(),
            toc: default_toc_command(),
        }
    }
}

/// Table-of-contents markers in the project README.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TocConfig {
    #[serde(default = "default_toc_file")]
    pub file: String,

    #[serde(default = "default_toc_start")]
    pub start: String,

    #[serde(default = "default_toc_end")]
    pub end: String,
}

fn default_toc_file() -> String {
    "README.md".to_string()
}

fn default_toc_start() -> String {
    "<!-- toc -->".to_string()
}

fn default_toc_end() -> String {
    "<!-- /toc -->".to_string()
}

impl Default for TocConfig {
    fn default() -> Self {
        TocConfig {
            file: default_toc_file(),
            start: default_toc_start(),
            end: default_toc_end(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            binary: default_binary(),
            files: default_required_files(),
            sources: SourcesConfig::default(),
            commands: CommandsConfig::default(),
            toc: TocConfig::default(),
        }
    }
}

impl Config {
    /// Reject settings no check could run with
    pub fn validate(&self) -> Result<()> {
        for (name, command) in [
            ("test", &self.commands.test),
            ("vet", &self.commands.vet),
            ("toc", &self.commands.toc),
        ] {
            if command.is_empty() {
                return Err(GateError::config(format!(
                    "commands.{} must name a program",
                    name
                )));
            }
        }
        if self.sources.extension.is_empty() {
            return Err(GateError::config("sources.extension must not be empty"));
        }
        if self.toc.start.is_empty() || self.toc.end.is_empty() {
            return Err(GateError::config("toc markers must not be empty"));
        }
        Ok(())
    }
}

/// Path of the per-user configuration file, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("git-gate").join("config.toml"))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitgate.toml` at the repository top level
/// 3. `git-gate/config.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repo_root` - Repository top level, if already known
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, repo_root: Option<&Path>) -> Result<Config> {
    let candidate = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else {
        repo_root
            .map(|root| root.join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
            .or_else(|| user_config_path().filter(|path| path.exists()))
    };

    let config = match candidate {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let config_str = fs::read_to_string(&path).map_err(|e| {
                GateError::config(format!("cannot read {}: {}", path.display(), e))
            })?;
            toml::from_str(&config_str).map_err(|e| {
                GateError::config(format!("cannot parse {}: {}", path.display(), e))
            })?
        }
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}
