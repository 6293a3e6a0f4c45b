//! Project-level I/O around the pure core: config, extra rules, schema file.

use std::path::{Path, PathBuf};

use tenant_rules_core::{
    build_collections, load_rules_from_toml, CollectionDescriptor, Config, ConfigError,
    ExtraRulesError, Rule, RuleSetComposer, SchemaDirectiveExtractor, SchemaError,
};

use crate::config_source::ConfigSource;

/// Errors from loading project files or generating rules.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// IO error reading or writing a file.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid.
    #[error("Invalid config {path}: {source}")]
    Config {
        /// Config file.
        path: PathBuf,
        /// Underlying error.
        source: ConfigError,
    },

    /// An `[[extra-rules]]` table is not valid.
    #[error("Invalid extra rules in {path}: {source}")]
    ExtraRules {
        /// Config file.
        path: PathBuf,
        /// Underlying error.
        source: ExtraRulesError,
    },

    /// The schema could not be parsed or has an invalid annotation.
    #[error("{path}: {source}")]
    Schema {
        /// Schema file.
        path: PathBuf,
        /// Underlying error.
        source: SchemaError,
    },
}

/// A project directory with its resolved configuration and extra rules.
#[derive(Debug, Clone)]
pub struct Project {
    base: PathBuf,
    source: ConfigSource,
    config: Config,
    extra_rules: Vec<Rule>,
}

impl Project {
    /// Resolves and loads the configuration for `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or is invalid.
    pub fn load(root: &Path, explicit_config: Option<&Path>) -> Result<Self, ProjectError> {
        let source = ConfigSource::locate(root, explicit_config);
        if matches!(source, ConfigSource::User(_)) {
            tracing::info!("Using {source}");
        } else {
            tracing::debug!("Using {source}");
        }
        let content = match source.path() {
            Some(path) => read(path)?,
            None => String::new(),
        };
        Self::from_content(root, source, &content)
    }

    /// Builds a project from config text already in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or its extra rules are invalid.
    pub fn from_content(
        root: &Path,
        source: ConfigSource,
        content: &str,
    ) -> Result<Self, ProjectError> {
        let origin = source.path().map_or_else(PathBuf::new, Path::to_path_buf);
        let config = Config::parse(content).map_err(|e| ProjectError::Config {
            path: origin.clone(),
            source: e,
        })?;
        let extra_rules = load_rules_from_toml(content).map_err(|e| ProjectError::ExtraRules {
            path: origin,
            source: e,
        })?;

        Ok(Self {
            base: source.base_dir(root),
            source,
            config,
            extra_rules,
        })
    }

    /// Returns where the configuration came from.
    #[must_use]
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the hand-authored rules from the config file.
    #[must_use]
    pub fn extra_rules(&self) -> &[Rule] {
        &self.extra_rules
    }

    /// Schema file to read: `explicit` as given, else the configured path
    /// relative to the config file's directory.
    #[must_use]
    pub fn schema_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(|| self.base.join(&self.config.schema.path), Path::to_path_buf)
    }

    /// Output file: `explicit` as given, else the configured file relative to
    /// the config file's directory. `None` means standard output.
    #[must_use]
    pub fn output_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.config.output.file.as_ref().map(|f| self.base.join(f)))
    }

    /// Reads the schema and extracts its collection descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or is invalid.
    pub fn descriptors(
        &self,
        schema: Option<&Path>,
    ) -> Result<Vec<CollectionDescriptor>, ProjectError> {
        let path = self.schema_path(schema);
        let text = read(&path)?;
        SchemaDirectiveExtractor::new(self.config.schema.directive.as_str())
            .extract(&text)
            .map_err(|e| ProjectError::Schema { path, source: e })
    }

    /// Reads the schema and renders the full rules document.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be read or is invalid. No
    /// partial document is returned.
    pub fn generate(&self, schema: Option<&Path>) -> Result<String, ProjectError> {
        let collections = build_collections(self.descriptors(schema)?);
        tracing::info!(
            "Generating rules for {} collection(s) with {} extra rule(s)",
            collections.len(),
            self.extra_rules.len()
        );
        Ok(RuleSetComposer::new(self.config.output.clone()).generate(&collections, &self.extra_rules))
    }

    /// Writes a rules document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_output(path: &Path, rules: &str) -> Result<(), ProjectError> {
        std::fs::write(path, rules).map_err(|e| ProjectError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn read(path: &Path) -> Result<String, ProjectError> {
    std::fs::read_to_string(path).map_err(|e| ProjectError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
