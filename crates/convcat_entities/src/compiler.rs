//! Catalog assembly.
//!
//! The compiler consumes catalog sources one at a time, in the order they are
//! added, and appends their entities to a single [`EntityCatalog`]. Sources
//! whose stem is [`SYSTEM_ENTITIES`] declare platform entities by name only;
//! every other source defines one entity named after its stem. A system
//! entity is skipped when an identical record (same name, no values, same
//! fuzzy flag) is already in the catalog, whichever source produced it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use convcat_foundation::{CanonicalName, Error, ErrorContext, Result};
use convcat_naming::NamingConfig;
use tracing::{debug, info};

use crate::discovery::{ALL_FILES, discover};
use crate::record::{EntityCatalog, EntityRecord};
use crate::value::{ValueLine, strip_comment};

/// Stem of the reserved catalog that lists system entities.
pub const SYSTEM_ENTITIES: &str = "system_entities";

/// Settings for one compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Naming policy and rule chains for entity names.
    pub naming: NamingConfig,
    /// Enable fuzzy matching on every entity.
    pub fuzzy_match: bool,
    /// File-name patterns catalog files must match.
    pub patterns: Vec<String>,
}

impl CompileOptions {
    /// Creates options with the given naming config.
    #[must_use]
    pub fn new(naming: NamingConfig) -> Self {
        Self {
            naming,
            fuzzy_match: false,
            patterns: vec![ALL_FILES.to_string()],
        }
    }

    /// Builder method to set the global fuzzy-match flag.
    #[must_use]
    pub fn with_fuzzy_match(mut self, fuzzy_match: bool) -> Self {
        self.fuzzy_match = fuzzy_match;
        self
    }

    /// Builder method to set the file-name patterns.
    #[must_use]
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new(NamingConfig::default())
    }
}

/// Identity of a value-free record: name and fuzzy flag.
///
/// Two value-free records with the same key are identical.
type RecordKey = (CanonicalName, bool);

/// Builds an [`EntityCatalog`] from catalog sources.
#[derive(Debug)]
pub struct CatalogCompiler {
    options: CompileOptions,
    catalog: EntityCatalog,
    value_free: HashSet<RecordKey>,
}

impl CatalogCompiler {
    /// Creates a compiler with an empty catalog.
    #[must_use]
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            catalog: EntityCatalog::new(),
            value_free: HashSet::new(),
        }
    }

    /// Compiles every catalog file found under `paths`.
    ///
    /// Files are processed in the string order of their absolute paths. Finding no files is
    /// not an error and yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns `MissingCatalogSource` if `paths` is empty, and propagates
    /// discovery, I/O, naming, and value line errors.
    pub fn compile_paths<P: AsRef<Path>>(
        options: CompileOptions,
        paths: &[P],
    ) -> Result<EntityCatalog> {
        if paths.is_empty() {
            return Err(Error::missing_catalog_source());
        }

        let mut files = discover(paths, &options.patterns)?;
        // Whole-path string order: "entities-gen/" sorts before "entities/".
        files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        info!(
            files = files.len(),
            fuzzy_match = options.fuzzy_match,
            "compiling entity catalog"
        );

        let mut compiler = Self::new(options);
        for file in &files {
            compiler.add_file(file)?;
        }
        Ok(compiler.finish())
    }

    /// Reads one catalog file and adds its entities.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, or any error from
    /// [`CatalogCompiler::add_source`].
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(file = %path.display(), "reading catalog file");
        self.add_source(&stem, &path.display().to_string(), &text)
    }

    /// Adds the entities of one catalog source.
    ///
    /// `stem` decides how the source is read and names its entity; `origin`
    /// only labels errors.
    ///
    /// # Errors
    ///
    /// Returns `NamingViolation` if the stem is not an acceptable entity name
    /// under the active policy, or `InvalidValueLine` for a line without a
    /// representative value.
    pub fn add_source(&mut self, stem: &str, origin: &str, text: &str) -> Result<()> {
        if stem == SYSTEM_ENTITIES {
            self.add_system_entities(text);
            return Ok(());
        }

        let name = self
            .options
            .naming
            .entity_name(stem)
            .map_err(|e| e.with_context(ErrorContext::new().with_source(origin)))?;
        let mut entity = EntityRecord::new(name);

        for (index, line) in text.lines().enumerate() {
            let parsed = ValueLine::parse(line).map_err(|e| {
                e.with_context(
                    ErrorContext::new()
                        .with_source(origin)
                        .with_line(index + 1),
                )
            })?;
            match parsed {
                Some(ValueLine::FuzzyMatch) => entity.fuzzy_match = true,
                Some(ValueLine::Value(value)) => entity.values.push(value),
                None => {}
            }
        }

        entity.fuzzy_match |= self.options.fuzzy_match;
        if entity.is_value_free() {
            self.value_free
                .insert((entity.name.clone(), entity.fuzzy_match));
        }
        self.catalog.push(entity);
        Ok(())
    }

    fn add_system_entities(&mut self, text: &str) {
        for line in text.lines() {
            let name = strip_comment(line).to_lowercase();
            if name.is_empty() {
                continue;
            }

            let key = (CanonicalName::new_unchecked(name), self.options.fuzzy_match);
            if self.value_free.contains(&key) {
                info!("Skipping duplicated '{}' system entity.", key.0);
                continue;
            }

            self.catalog
                .push(EntityRecord::new(key.0.clone()).with_fuzzy_match(key.1));
            self.value_free.insert(key);
        }
    }

    /// Returns the catalog built so far.
    #[must_use]
    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Finishes compilation, handing over the catalog.
    #[must_use]
    pub fn finish(self) -> EntityCatalog {
        self.catalog
    }
}
