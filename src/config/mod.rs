//! Site configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── sections   # [[sections]]
//! │   ├── serve      # [serve]
//! │   ├── site       # [site]
//! │   └── tracker    # [tracker]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   ├── handle     # Global config handle
//! │   └── path       # PathResolver
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[site]`         | Title, author, url, background, sidebar links  |
//! | `[[sections]]`   | Ordered page sections and their content        |
//! | `[tracker]`      | Active-section observer margin and thresholds  |
//! | `[build]`        | Output and public directories                  |
//! | `[serve]`        | Development server (port, interface, watch)    |

pub mod section;
pub mod types;
mod util;

use util::{deployment_prefix, find_config_file};

// Re-export from section/
pub use section::{
    BuildSectionConfig, LinkConfig, SectionBody, SectionConfig, ServeConfig, SiteSectionConfig,
    TrackerConfig,
};

// Re-export from types/
pub use types::{
    ConfigDiagnostics, ConfigError, FieldPath, PathResolver, cfg, clear_clean_flag, init_config,
    is_external, reload_config,
};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    section::{Registry, RegistryError},
    tracker::ObserverOptions,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Page sections in display order
    #[serde(default)]
    pub sections: Vec<SectionConfig>,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-Init commands, searches upward from cwd to find config file.
    /// The project root is determined by the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        if !cli.is_init() && !exists {
            bail!(ConfigError::NotFound(cli.config.clone()));
        }

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);

        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match &cli.command {
            Commands::Init { name } => {
                let dir = name.as_ref().map_or_else(|| cwd.clone(), |name| cwd.join(name));
                let path = dir.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => match find_config_file(&cli.config, &cwd) {
                Some(path) => Ok((path, true)),
                None => Ok((cwd.join(&cli.config), false)),
            },
        }
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init { name } => {
                let cwd = std::env::current_dir().unwrap_or_default();
                name.as_ref().map_or(cwd.clone(), |name| cwd.join(name))
            }
            _ => self
                .config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        self.apply_command_options(cli);
        self.normalize_paths(&root, cli);
        self.sync_path_prefix_from_url();

        // Local preview serves at `/` unless asked to keep the deployed prefix
        if cli.is_serve() && !self.serve.respect_prefix {
            self.build.path_prefix = PathBuf::new();
        }
    }

    /// Derive the URL prefix from `site.url`.
    fn sync_path_prefix_from_url(&mut self) {
        if let Some(ref url) = self.site.url
            && let Some(prefix) = deployment_prefix(url)
        {
            self.build.path_prefix = prefix;
        }
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    ///
    /// Unlike a typo in a required key these never block a build; a rebuild
    /// in watch mode must not wait on a terminal prompt.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Get path resolver for output files and page URLs.
    pub fn paths(&self) -> PathResolver<'_> {
        PathResolver::new(&self.build.output, &self.build.path_prefix)
    }

    /// Build the section registry in config order.
    pub fn registry(&self) -> Result<Registry, RegistryError> {
        Registry::new(self.sections.iter().map(SectionConfig::to_section).collect())
    }

    /// Observer options handed to the page runtime and the tracker.
    pub fn observer_options(&self) -> ObserverOptions {
        self.tracker.options()
    }

    /// Files whose change requires a rebuild: the config itself and any
    /// markdown sources.
    pub fn source_files(&self) -> Vec<PathBuf> {
        let mut files = vec![self.config_path.clone()];
        files.extend(
            self.sections
                .iter()
                .filter_map(|s| s.body.markdown_file())
                .map(|file| self.root_join(file)),
        );
        files
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => {
                self.apply_build_args(build_args);
            }
            Commands::Serve {
                build_args,
                interface,
                port,
                watch,
            } => {
                self.apply_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.watch, watch.as_ref());
            }
            Commands::Init { .. } | Commands::Validate { .. } | Commands::Trace { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        self.build.clean |= args.clean;
        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = crate::utils::path::normalize_path(root);
        self.config_path = crate::utils::path::normalize_path(&self.config_path);
        self.build.output = crate::utils::path::normalize_path(&root.join(&self.build.output));
        self.build.public = crate::utils::path::normalize_path(&root.join(&self.build.public));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the whole configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        self.diagnose()
            .into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Run every check and return the collected diagnostics.
    pub fn diagnose(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        section::sections::validate_sections(&self.sections, &self.root, &mut diag);
        self.tracker.validate(&mut diag);
        self.serve.validate(&mut diag);

        if self.build.output == self.build.public {
            diag.error_with_hint(
                FieldPath::new("build.output"),
                "output and public directories must differ",
                "public files are copied into the output directory",
            );
        }

        diag.print_warnings();
        diag
    }

    /// Local public-directory references (images, model, textures) with
    /// their config paths.
    pub fn asset_refs(&self) -> Vec<(FieldPath, &str)> {
        let mut refs = Vec::new();
        if let Some(background) = &self.site.background
            && !is_external(background)
        {
            refs.push((FieldPath::new("site.background"), background.as_str()));
        }
        for (i, section) in self.sections.iter().enumerate() {
            let path = FieldPath::index("sections", i).join("body");
            refs.extend(section.body.assets(&path));
        }
        refs
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
