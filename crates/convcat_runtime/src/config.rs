//! Run configuration.
//!
//! Settings come from zero or more TOML files, merged in order, and are then
//! overridden by command-line flags.
//!
//! ```toml
//! [common]
//! entities = ["data/entities"]
//! generated_entities = ["gen/entities"]
//! outputs_directory = "outputs"
//! outputs_entities = "entities.json"
//! name_policy = "soft_verbose"
//! entities_name_check = [["-", "_"], ["$special", "\\L"]]
//!
//! [entities]
//! fuzzy = "on"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use convcat_entities::CompileOptions;
use convcat_entities::discovery::ALL_FILES;
use convcat_foundation::{EnforcementPolicy, Error, Result};
use convcat_naming::{NamingConfig, RuleChain};
use serde::Deserialize;

/// An on/off setting written either as a boolean or as text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Switch {
    /// `fuzzy = true`
    Bool(bool),
    /// `fuzzy = "on"`
    Text(String),
}

impl Switch {
    /// Returns true for `true`, `"true"`, and `"on"` in any case.
    #[must_use]
    pub fn is_on(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => {
                let text = text.trim();
                text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("on")
            }
        }
    }
}

/// The `[common]` section of a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommonSection {
    /// Directories or files with entity catalogs.
    pub entities: Option<Vec<PathBuf>>,
    /// Directories or files with generated entity catalogs.
    pub generated_entities: Option<Vec<PathBuf>>,
    /// Directory for outputs.
    pub outputs_directory: Option<PathBuf>,
    /// File name of the entities JSON output.
    pub outputs_entities: Option<PathBuf>,
    /// `hard`, `soft`, or `soft_verbose`.
    pub name_policy: Option<String>,
    /// Shorthand for `name_policy = "soft"`.
    pub soft: Option<bool>,
    /// User rules for entity names.
    pub entities_name_check: Option<Vec<(String, String)>>,
    /// User rules for intent names.
    pub intents_name_check: Option<Vec<(String, String)>>,
}

/// The `[entities]` section of a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntitiesSection {
    /// Global fuzzy matching.
    pub fuzzy: Option<Switch>,
    /// File-name patterns for catalog files.
    pub patterns: Option<Vec<String>>,
}

/// One parsed config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// `[common]`
    pub common: CommonSection,
    /// `[entities]`
    pub entities: EntitiesSection,
}

impl ConfigFile {
    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not a valid config.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read '{}': {e}", path.display()))
        })?;
        toml::from_str(&text)
            .map_err(|e| Error::config(format!("failed to parse '{}': {e}", path.display())))
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Entity catalog paths; `None` when never configured.
    pub entities: Option<Vec<PathBuf>>,
    /// Generated entity catalog paths.
    pub generated_entities: Vec<PathBuf>,
    /// Output directory.
    pub outputs_directory: Option<PathBuf>,
    /// Entities JSON file name.
    pub outputs_entities: Option<PathBuf>,
    /// Name policy as written; parsed by [`RunConfig::policy`].
    pub name_policy: Option<String>,
    /// Soft shorthand.
    pub soft: bool,
    /// Entity name rules as `(pattern, replacement)` pairs.
    pub entity_rules: Vec<(String, String)>,
    /// Intent name rules as `(pattern, replacement)` pairs.
    pub intent_rules: Vec<(String, String)>,
    /// Global fuzzy matching.
    pub fuzzy_match: bool,
    /// File-name patterns for catalog files.
    pub patterns: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            entities: None,
            generated_entities: Vec::new(),
            outputs_directory: None,
            outputs_entities: None,
            name_policy: None,
            soft: false,
            entity_rules: Vec::new(),
            intent_rules: Vec::new(),
            fuzzy_match: false,
            patterns: vec![ALL_FILES.to_string()],
        }
    }
}

impl RunConfig {
    /// Loads and merges config files in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for the first file that cannot be loaded.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        paths.iter().try_fold(Self::default(), |config, path| {
            Ok(config.merge(ConfigFile::load(path.as_ref())?))
        })
    }

    /// Overlays the values present in `file`.
    #[must_use]
    pub fn merge(mut self, file: ConfigFile) -> Self {
        let ConfigFile { common, entities } = file;

        if let Some(paths) = common.entities {
            self.entities = Some(paths);
        }
        if let Some(paths) = common.generated_entities {
            self.generated_entities = paths;
        }
        if common.outputs_directory.is_some() {
            self.outputs_directory = common.outputs_directory;
        }
        if common.outputs_entities.is_some() {
            self.outputs_entities = common.outputs_entities;
        }
        if common.name_policy.is_some() {
            self.name_policy = common.name_policy;
        }
        if let Some(soft) = common.soft {
            self.soft = soft;
        }
        if let Some(rules) = common.entities_name_check {
            self.entity_rules = rules;
        }
        if let Some(rules) = common.intents_name_check {
            self.intent_rules = rules;
        }
        if let Some(fuzzy) = entities.fuzzy {
            self.fuzzy_match = fuzzy.is_on();
        }
        if let Some(patterns) = entities.patterns {
            self.patterns = patterns;
        }
        self
    }

    /// Resolves the enforcement policy.
    ///
    /// An explicit policy wins; otherwise `soft` selects
    /// [`EnforcementPolicy::Soft`] and the default is [`EnforcementPolicy::Hard`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownPolicy` for an unrecognized policy name.
    pub fn policy(&self) -> Result<EnforcementPolicy> {
        match &self.name_policy {
            Some(name) => name.parse(),
            None if self.soft => Ok(EnforcementPolicy::Soft),
            None => Ok(EnforcementPolicy::Hard),
        }
    }

    /// Builds the naming config: policy plus compiled rule chains.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPolicy` or a rule error.
    pub fn naming(&self) -> Result<NamingConfig> {
        Ok(NamingConfig::new(self.policy()?)
            .with_entity_rules(RuleChain::from_pairs(self.entity_rules.iter().cloned())?)
            .with_intent_rules(RuleChain::from_pairs(self.intent_rules.iter().cloned())?))
    }

    /// Builds the compiler options.
    ///
    /// # Errors
    ///
    /// See [`RunConfig::naming`].
    pub fn compile_options(&self) -> Result<CompileOptions> {
        Ok(CompileOptions::new(self.naming()?)
            .with_fuzzy_match(self.fuzzy_match)
            .with_patterns(self.patterns.iter().cloned()))
    }

    /// All catalog paths: entities, then generated entities.
    ///
    /// # Errors
    ///
    /// Returns `MissingCatalogSource` if entity paths were never configured.
    pub fn catalog_paths(&self) -> Result<Vec<PathBuf>> {
        let entities = self
            .entities
            .as_ref()
            .ok_or_else(Error::missing_catalog_source)?;
        Ok(entities
            .iter()
            .chain(&self.generated_entities)
            .cloned()
            .collect())
    }

    /// Where the entities JSON goes; `None` means stdout.
    #[must_use]
    pub fn output_path(&self) -> Option<PathBuf> {
        let file = self.outputs_entities.as_ref()?;
        Some(match &self.outputs_directory {
            Some(dir) => dir.join(file),
            None => file.clone(),
        })
    }
}
