//! Admin versus general-user classification of individual script paths.

use serde::{Deserialize, Serialize};

use crate::classifier::{matches_any, matches_none};
use crate::rules::PathRuleSet;

/// The two disjoint buckets every script path falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptBucket {
  /// Scripts only needed by viewers who can edit.
  Admin,
  /// Everything else.
  User,
}

impl ScriptBucket {
  /// Lowercase label used in CLI output.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::User => "user",
    }
  }
}

impl std::fmt::Display for ScriptBucket {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Trait describing how script paths are assigned to a bucket.
///
/// Only [`ScriptClassification::is_admin_script`] is required; the user side is its negation so
/// the two buckets can never overlap or leave a path unassigned.
pub trait ScriptClassification {
  /// Returns `true` when the script belongs to administrative tooling.
  fn is_admin_script(&self, path: &str) -> bool;

  /// Returns `true` when the script belongs in the general bundle.
  fn is_user_script(&self, path: &str) -> bool {
    !self.is_admin_script(path)
  }

  /// Bucket the script path is assigned to.
  fn bucket(&self, path: &str) -> ScriptBucket {
    if self.is_admin_script(path) {
      ScriptBucket::Admin
    } else {
      ScriptBucket::User
    }
  }
}

/// Classifier backed by a [`PathRuleSet`]. Exclusions always win over inclusions.
#[derive(Debug, Clone, Copy)]
pub struct ScriptBucketFilter<'a> {
  rules: &'a PathRuleSet,
}

impl<'a> ScriptBucketFilter<'a> {
  /// Create a filter for the provided rule set.
  pub fn new(rules: &'a PathRuleSet) -> Self {
    Self { rules }
  }

  /// Rule set driving this filter.
  pub fn rules(&self) -> &'a PathRuleSet {
    self.rules
  }
}

impl ScriptBucketFilter<'static> {
  /// Filter over the built-in tables.
  pub fn builtin() -> Self {
    Self::new(PathRuleSet::builtin())
  }
}

impl Default for ScriptBucketFilter<'static> {
  fn default() -> Self {
    Self::builtin()
  }
}

impl ScriptClassification for ScriptBucketFilter<'_> {
  fn is_admin_script(&self, path: &str) -> bool {
    matches_any(path, self.rules.include_patterns())
      && matches_none(path, self.rules.exclude_patterns())
  }
}

/// Classify `path` against the built-in tables.
pub fn is_admin_script(path: &str) -> bool {
  ScriptBucketFilter::builtin().is_admin_script(path)
}

/// Negation of [`is_admin_script`].
pub fn is_user_script(path: &str) -> bool {
  ScriptBucketFilter::builtin().is_user_script(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE_PATHS: &[&str] = &[
    "/lib/plugins/usermanager/script.js",
    "/lib/scripts/script.js",
    "/lib/scripts/page.js",
    "/lib/scripts/fileuploader.js",
    "/lib/scripts/edit.js",
    "/lib/scripts/jquery/jquery.cookie.js",
    "/lib/scripts/jquery/jquery-ui/jquery.ui.datepicker.js",
    "jquery.ui.datepicker.js",
    "/lib/tpl/dokuwiki/script.js",
    "/lib/plugins/tagging/script.js",
    "/lib/plugins/color/script.js",
    "",
  ];

  #[test]
  fn admin_plugin_directory_is_admin() {
    assert!(is_admin_script("/lib/plugins/usermanager/script.js"));
  }

  #[test]
  fn core_script_stays_in_user_bucket() {
    assert!(!is_admin_script("/lib/scripts/script.js"));
    assert!(!is_admin_script("/lib/scripts/page.js"));
    assert!(!is_admin_script("/lib/scripts/jquery/jquery.cookie.js"));
  }

  #[test]
  fn fileuploader_is_admin() {
    assert!(is_admin_script("/lib/scripts/fileuploader.js"));
  }

  #[test]
  fn fragment_at_start_of_path_is_admin() {
    assert!(is_admin_script("jquery.ui.datepicker.js"));
  }

  #[test]
  fn unrelated_plugins_are_user_scripts() {
    assert!(is_user_script("/lib/tpl/dokuwiki/script.js"));
    assert!(is_user_script("/lib/plugins/tagging/script.js"));
    assert!(is_user_script(""));
  }

  #[test]
  fn exclusion_takes_precedence() {
    let rules = PathRuleSet::new(["/shared/"], ["/shared/core.js"]);
    let filter = ScriptBucketFilter::new(&rules);
    assert!(filter.is_admin_script("/shared/admin.js"));
    assert!(!filter.is_admin_script("/shared/core.js"));
  }

  #[test]
  fn buckets_are_complementary() {
    let filter = ScriptBucketFilter::builtin();
    for path in SAMPLE_PATHS {
      assert_eq!(filter.is_admin_script(path), !filter.is_user_script(path));
      let expected = if filter.is_admin_script(path) {
        ScriptBucket::Admin
      } else {
        ScriptBucket::User
      };
      assert_eq!(filter.bucket(path), expected);
    }
  }

  #[test]
  fn classification_is_deterministic() {
    let filter = ScriptBucketFilter::builtin();
    for path in SAMPLE_PATHS {
      let first = filter.bucket(path);
      for _ in 0..3 {
        assert_eq!(filter.bucket(path), first);
      }
    }
  }

  #[test]
  fn empty_rule_set_classifies_everything_as_user() {
    let empty: [&str; 0] = [];
    let rules = PathRuleSet::new(empty, empty);
    let filter = ScriptBucketFilter::new(&rules);
    assert!(SAMPLE_PATHS.iter().all(|path| filter.is_user_script(path)));
  }
}
