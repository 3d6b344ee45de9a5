//! Plugin configuration loader describing the host layout and rule overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::header::HeaderContext;
use crate::rules::{PathRuleSet, RuleSetError};

/// File name searched for by [`PluginConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "lightweightscript.config.json";

/// Discoverable configuration for the script filter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
  /// Base URL of the wiki, with trailing slash.
  pub base_url: String,
  /// Active template name, passed along to the script endpoint.
  pub template: String,
  /// Whether script tags are emitted with `defer`.
  pub defer_js: bool,
  /// Optional JSON or YAML file overriding the built-in rule tables.
  pub rules_file: Option<String>,
}

impl Default for PluginConfig {
  fn default() -> Self {
    Self {
      base_url: "/".into(),
      template: "dokuwiki".into(),
      defer_js: false,
      rules_file: None,
    }
  }
}

impl PluginConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unparsable configuration file falls back to default values.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Some(config) => {
        debug!(path = %candidate.display(), "loaded plugin configuration");
        config
      }
      None => {
        if candidate.exists() {
          warn!(path = %candidate.display(), "ignoring unreadable plugin configuration");
        }
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Path of the rule override file, resolved against `dir`.
  pub fn rules_path(&self, dir: &Path) -> Option<PathBuf> {
    self.rules_file.as_ref().map(|file| dir.join(file))
  }

  /// Rule set to classify with: the override file when configured, otherwise the built-in tables.
  ///
  /// A configured override file must exist; a missing one is an error rather than a silent
  /// fallback to the built-in tables.
  pub fn load_rules(&self, dir: &Path) -> Result<PathRuleSet, RuleSetError> {
    match self.rules_path(dir) {
      Some(path) => {
        debug!(path = %path.display(), "loading configured rule overrides");
        PathRuleSet::load_required(&path)
          .inspect_err(|err| warn!(%err, "failed to load configured rule overrides"))
      }
      None => Ok(PathRuleSet::builtin().clone()),
    }
  }

  /// Header settings for a request carrying the given cache-busting seed.
  pub fn header_context(&self, seed: impl Into<String>) -> HeaderContext {
    HeaderContext {
      base_url: self.base_url.clone(),
      template: self.template.clone(),
      seed: seed.into(),
      defer_js: self.defer_js,
    }
  }
}
