//! Include and exclude fragment tables that decide which scripts are admin-only.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

/// Fragments marking a script as belonging to administrative tooling.
const ADMIN_INCLUDE_PATTERNS: &[&str] = &[
  "/lib/scripts/fileuploader",
  "jquery.ui.datepicker.js",
  "/lib/scripts/",
  "/lib/plugins/tag/",
  "/lib/plugins/extension/",
  "/lib/plugins/move/",
  "/lib/plugins/styling/",
  "/lib/plugins/sectionedit/",
  "/lib/plugins/searchindex/",
  "/lib/plugins/acl/",
  "/lib/plugins/pagequery/",
  "/lib/plugins/colorpicker/",
  "/lib/plugins/sync/",
  "/lib/plugins/multiorphan/",
  "/lib/plugins/color/",
  "/lib/plugins/usermanager/",
  "/lib/plugins/edittable/",
  "/lib/plugins/include/",
  "/lib/plugins/toctweak/",
  "/lib/plugins/fastwiki/",
];

/// Core runtime scripts that always ship with the general bundle.
const CORE_EXCLUSION_PATTERNS: &[&str] = &[
  "/lib/scripts/script.js",
  // footnote popups
  "/lib/scripts/page.js",
  "jquery.cookie.js",
];

/// Ordered include and exclude fragment lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRuleSet {
  include: Vec<String>,
  exclude: Vec<String>,
}

/// Override file layout. Either side may be omitted to keep the built-in list.
#[derive(Debug, Default, Deserialize)]
struct PathRuleFile {
  #[serde(default)]
  include: Option<Vec<String>>,
  #[serde(default)]
  exclude: Option<Vec<String>>,
}

/// Errors that can occur while loading a rule override file.
#[derive(Debug)]
pub enum RuleSetError {
  /// Failed to read the rule file from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON rule file.
  ParseJson {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// Failed to parse the YAML rule file.
  ParseYaml {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_yaml::Error,
  },
}

impl PathRuleSet {
  /// Build a rule set from raw fragment lists.
  ///
  /// Empty entries are dropped and repeated entries keep only their first position. Fragments are
  /// kept verbatim, surrounding whitespace included.
  pub fn new(
    include: impl IntoIterator<Item = impl Into<String>>,
    exclude: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    Self {
      include: normalise_patterns(include),
      exclude: normalise_patterns(exclude),
    }
  }

  /// The curated tables shipped with the crate, initialised once per process.
  pub fn builtin() -> &'static PathRuleSet {
    static BUILTIN: OnceLock<PathRuleSet> = OnceLock::new();
    BUILTIN.get_or_init(|| {
      PathRuleSet::new(
        ADMIN_INCLUDE_PATTERNS.iter().copied(),
        CORE_EXCLUSION_PATTERNS.iter().copied(),
      )
    })
  }

  /// Load an override file, falling back to the built-in rules when it does not exist.
  ///
  /// Files ending in `.yaml` or `.yml` are read as YAML, everything else as JSON. Patterns are used
  /// verbatim: only empty entries and repeats are dropped.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
    match Self::load_required(path) {
      Err(RuleSetError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
        Ok(Self::builtin().clone())
      }
      result => result,
    }
  }

  /// Load an override file that must exist. A missing file is reported as [`RuleSetError::Io`].
  pub fn load_required(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| RuleSetError::Io {
      path: path.to_path_buf(),
      source: err,
    })?;

    let file: PathRuleFile = if is_yaml(path) {
      serde_yaml::from_str(&contents).map_err(|err| RuleSetError::ParseYaml {
        path: path.to_path_buf(),
        source: err,
      })?
    } else {
      serde_json::from_str(&contents).map_err(|err| RuleSetError::ParseJson {
        path: path.to_path_buf(),
        source: err,
      })?
    };
    Ok(Self::from(file))
  }

  /// Fragments that mark a script as admin-only.
  pub fn include_patterns(&self) -> &[String] {
    &self.include
  }

  /// Fragments that force a script back into the general bundle.
  pub fn exclude_patterns(&self) -> &[String] {
    &self.exclude
  }
}

impl Default for PathRuleSet {
  fn default() -> Self {
    Self::builtin().clone()
  }
}

impl From<PathRuleFile> for PathRuleSet {
  fn from(file: PathRuleFile) -> Self {
    let builtin = Self::builtin();
    Self {
      include: file
        .include
        .map(normalise_patterns)
        .unwrap_or_else(|| builtin.include.clone()),
      exclude: file
        .exclude
        .map(normalise_patterns)
        .unwrap_or_else(|| builtin.exclude.clone()),
    }
  }
}

impl std::fmt::Display for RuleSetError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::ParseJson { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::ParseYaml { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for RuleSetError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::ParseJson { source, .. } => Some(source),
      Self::ParseYaml { source, .. } => Some(source),
    }
  }
}

fn is_yaml(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Drop empty entries and keep the first occurrence of each value in order.
fn normalise_patterns(values: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
  let mut patterns: Vec<String> = Vec::new();
  for value in values {
    let value: String = value.into();
    if value.is_empty() || patterns.contains(&value) {
      continue;
    }
    patterns.push(value);
  }
  patterns
}
