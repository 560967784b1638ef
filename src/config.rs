use crate::checker::CheckOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DICTIONARY: &str = "tr_TR";
pub const DEFAULT_WORDLIST_URL: &str = "https://p.001717.xyz/gts.json";
pub const LOCAL_CONFIG_FILE: &str = ".yazim.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_dictionary")]
    pub dictionary: String,

    #[serde(default = "default_wordlist_url")]
    pub wordlist_url: String,

    pub personal_dictionary: Option<PathBuf>,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    #[serde(default = "default_max_distance")]
    pub max_distance: u32,

    #[serde(default = "default_true")]
    pub skip_numeric: bool,

    #[serde(default = "default_true")]
    pub preserve_case: bool,
}

fn default_dictionary() -> String {
    DEFAULT_DICTIONARY.to_string()
}

fn default_wordlist_url() -> String {
    DEFAULT_WORDLIST_URL.to_string()
}

fn default_max_suggestions() -> usize {
    5
}

fn default_max_distance() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            wordlist_url: default_wordlist_url(),
            personal_dictionary: None,
            ignore_patterns: vec![
                // Upper-case codes with a digit: HTTP2, UTF8
                r"^[A-ZÇĞİÖŞÜ]*[0-9][A-ZÇĞİÖŞÜ0-9]*$".to_string(),
                r"^[a-fA-F0-9]{32,}$".to_string(), // Hashes
                r"_".to_string(),                  // snake_case and ALL_CAPS identifiers
            ],
            max_suggestions: default_max_suggestions(),
            max_distance: default_max_distance(),
            skip_numeric: true,
            preserve_case: true,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        dictionary: Option<String>,
        personal_dict: Option<PathBuf>,
        cli_patterns: Vec<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(Self::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.merge(Self::from_file(&local_path)?);
        }

        if let Some(dictionary) = dictionary {
            config.dictionary = dictionary;
        }
        if let Some(dict) = personal_dict {
            config.personal_dictionary = Some(dict);
        }
        config.ignore_patterns.extend(cli_patterns);

        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // other's values override self's where they differ from defaults
        if other.dictionary != DEFAULT_DICTIONARY {
            self.dictionary = other.dictionary;
        }
        if other.wordlist_url != DEFAULT_WORDLIST_URL {
            self.wordlist_url = other.wordlist_url;
        }
        if other.personal_dictionary.is_some() {
            self.personal_dictionary = other.personal_dictionary;
        }
        if !other.ignore_patterns.is_empty() {
            self.ignore_patterns = other.ignore_patterns;
        }
        if other.max_suggestions != default_max_suggestions() {
            self.max_suggestions = other.max_suggestions;
        }
        if other.max_distance != default_max_distance() {
            self.max_distance = other.max_distance;
        }
        self.skip_numeric = other.skip_numeric;
        self.preserve_case = other.preserve_case;
        self
    }

    /// Options for the checking engine derived from this configuration.
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            limit: self.max_suggestions,
            max_distance: self.max_distance,
            skip_numeric: self.skip_numeric,
            preserve_case: self.preserve_case,
            ignore_patterns: Vec::new(),
        }
        .with_patterns(&self.ignore_patterns)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "yazim").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "yazim").map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "yazim").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
