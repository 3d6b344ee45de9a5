//! Request-type dispatch: decide which bucket a script list is reduced to.

use serde::{Deserialize, Serialize};

use crate::bucket::{ScriptBucket, ScriptBucketFilter, ScriptClassification};
use crate::models::ScriptSource;

/// Kind of script bundle being rendered for the current request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum RequestType {
  /// The extra include served to viewers with edit rights.
  Admin,
  /// The ordinary bundle every visitor receives.
  #[default]
  Default,
}

impl RequestType {
  /// Query parameter carrying the request type.
  pub const PARAM: &'static str = "type";

  /// Interpret the raw `type` request parameter.
  ///
  /// Only the exact value `admin` selects the admin bundle; anything else, including a missing
  /// parameter, falls back to the default bundle.
  pub fn from_param(value: Option<&str>) -> Self {
    match value {
      Some("admin") => Self::Admin,
      _ => Self::Default,
    }
  }

  /// Parameter value for this request type.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Default => "default",
    }
  }

  /// Bucket of scripts retained for this request type.
  pub fn bucket(self) -> ScriptBucket {
    match self {
      Self::Admin => ScriptBucket::Admin,
      Self::Default => ScriptBucket::User,
    }
  }
}

impl From<&str> for RequestType {
  fn from(value: &str) -> Self {
    Self::from_param(Some(value))
  }
}

impl From<String> for RequestType {
  fn from(value: String) -> Self {
    Self::from_param(Some(&value))
  }
}

impl std::fmt::Display for RequestType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Reduces full script lists to the bucket selected by the request type.
#[derive(Debug, Clone, Copy)]
pub struct RequestDispatcher<C> {
  classifier: C,
}

impl<C: ScriptClassification> RequestDispatcher<C> {
  /// Create a dispatcher driven by the given classifier.
  pub fn new(classifier: C) -> Self {
    Self { classifier }
  }

  /// Keep the scripts belonging to the bucket of `request_type`.
  ///
  /// The input is left untouched; survivors keep their relative order and duplicates are kept.
  pub fn select<T: ScriptSource + Clone>(&self, all: &[T], request_type: RequestType) -> Vec<T> {
    all
      .iter()
      .filter(|script| self.retains(script.script_path(), request_type))
      .cloned()
      .collect()
  }

  /// Split a script list into its admin and user buckets, preserving order in both.
  pub fn partition<T: ScriptSource + Clone>(&self, all: &[T]) -> (Vec<T>, Vec<T>) {
    all
      .iter()
      .cloned()
      .partition(|script| self.classifier.is_admin_script(script.script_path()))
  }

  fn retains(&self, path: &str, request_type: RequestType) -> bool {
    match request_type {
      RequestType::Admin => self.classifier.is_admin_script(path),
      RequestType::Default => self.classifier.is_user_script(path),
    }
  }
}

impl Default for RequestDispatcher<ScriptBucketFilter<'static>> {
  fn default() -> Self {
    Self::new(ScriptBucketFilter::builtin())
  }
}

/// Reduce `all` to the bucket of `request_type` using the built-in rule tables.
pub fn select_scripts<T: ScriptSource + Clone>(all: &[T], request_type: RequestType) -> Vec<T> {
  RequestDispatcher::new(ScriptBucketFilter::builtin()).select(all, request_type)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::ScriptDescriptor;
  use crate::rules::PathRuleSet;

  const SAMPLE: [&str; 3] = ["/a/script.js", "/lib/plugins/tag/x.js", "/lib/scripts/page.js"];

  fn wiki_scripts() -> Vec<String> {
    [
      "/lib/scripts/jquery/jquery.cookie.js",
      "/lib/scripts/script.js",
      "/lib/scripts/edit.js",
      "/lib/scripts/fileuploader.js",
      "/lib/scripts/page.js",
      "/lib/plugins/acl/script.js",
      "/lib/plugins/wrap/script.js",
      "/lib/plugins/edittable/script.js",
      "/lib/tpl/dokuwiki/script.js",
      "/lib/plugins/acl/script.js",
    ]
    .into_iter()
    .map(String::from)
    .collect()
  }

  #[test]
  fn admin_request_keeps_admin_scripts() {
    assert_eq!(
      select_scripts(&SAMPLE, RequestType::Admin),
      ["/lib/plugins/tag/x.js"]
    );
  }

  #[test]
  fn default_request_keeps_user_scripts() {
    assert_eq!(
      select_scripts(&SAMPLE, RequestType::Default),
      ["/a/script.js", "/lib/scripts/page.js"]
    );
  }

  #[test]
  fn unexpected_type_behaves_like_default() {
    for raw in [Some("unexpectedValue"), Some("ADMIN"), Some(""), None] {
      let request_type = RequestType::from_param(raw);
      assert_eq!(request_type, RequestType::Default);
      assert_eq!(
        select_scripts(&SAMPLE, request_type),
        select_scripts(&SAMPLE, RequestType::Default)
      );
    }
    assert_eq!(RequestType::from("admin"), RequestType::Admin);
  }

  #[test]
  fn deserializing_unexpected_type_yields_default() {
    for raw in [r#""preview""#, r#""ADMIN""#, r#""""#, r#""default""#] {
      let parsed: RequestType = serde_json::from_str(raw).expect("any string is a request type");
      assert_eq!(parsed, RequestType::Default);
    }
    let admin: RequestType = serde_json::from_str(r#""admin""#).expect("admin request type");
    assert_eq!(admin, RequestType::Admin);
    assert_eq!(serde_json::to_string(&RequestType::Admin).expect("serialisable"), r#""admin""#);
  }

  #[test]
  fn selection_preserves_order_and_duplicates() {
    let scripts = wiki_scripts();
    let admin = select_scripts(&scripts, RequestType::Admin);
    assert_eq!(admin, [
      "/lib/scripts/edit.js",
      "/lib/scripts/fileuploader.js",
      "/lib/plugins/acl/script.js",
      "/lib/plugins/edittable/script.js",
      "/lib/plugins/acl/script.js",
    ]);

    let mut cursor = scripts.iter();
    for kept in &admin {
      assert!(cursor.any(|candidate| candidate == kept));
    }
  }

  #[test]
  fn buckets_partition_the_input_exactly() {
    let scripts = wiki_scripts();
    let admin = select_scripts(&scripts, RequestType::Admin);
    let user = select_scripts(&scripts, RequestType::Default);
    assert_eq!(admin.len() + user.len(), scripts.len());
    assert!(admin.iter().all(|path| !user.contains(path)));

    let dispatcher = RequestDispatcher::new(ScriptBucketFilter::builtin());
    let (admin_part, user_part) = dispatcher.partition(&scripts);
    assert_eq!(admin_part, admin);
    assert_eq!(user_part, user);
  }

  #[test]
  fn input_list_is_not_mutated() {
    let scripts = wiki_scripts();
    let before = scripts.clone();
    let _ = select_scripts(&scripts, RequestType::Admin);
    assert_eq!(scripts, before);
  }

  #[test]
  fn filters_descriptors_by_src() {
    let scripts = vec![
      ScriptDescriptor::new("/lib/exe/js.php?t=dokuwiki"),
      ScriptDescriptor::new("/lib/plugins/move/script.js"),
    ];
    let admin = select_scripts(&scripts, RequestType::Admin);
    assert_eq!(admin, vec![ScriptDescriptor::new("/lib/plugins/move/script.js")]);
  }

  #[test]
  fn dispatcher_uses_custom_rules() {
    let rules = PathRuleSet::new(["/custom/"], ["/custom/keep.js"]);
    let dispatcher = RequestDispatcher::new(ScriptBucketFilter::new(&rules));
    let scripts = ["/custom/a.js", "/custom/keep.js", "/lib/plugins/acl/x.js"];
    assert_eq!(dispatcher.select(&scripts, RequestType::Admin), ["/custom/a.js"]);
    assert_eq!(
      dispatcher.select(&scripts, RequestType::Default),
      ["/custom/keep.js", "/lib/plugins/acl/x.js"]
    );
  }

  #[test]
  fn request_type_maps_to_bucket() {
    assert_eq!(RequestType::Admin.bucket(), ScriptBucket::Admin);
    assert_eq!(RequestType::Default.bucket(), ScriptBucket::User);
    assert_eq!(RequestType::default(), RequestType::Default);
  }
}
