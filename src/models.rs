//! Data structures exchanged with the host page renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Anything that carries the source path of a client-side script.
pub trait ScriptSource {
  /// Path or URL fragment used for classification.
  fn script_path(&self) -> &str;
}

impl ScriptSource for str {
  fn script_path(&self) -> &str {
    self
  }
}

impl ScriptSource for String {
  fn script_path(&self) -> &str {
    self.as_str()
  }
}

impl<T: ScriptSource + ?Sized> ScriptSource for &T {
  fn script_path(&self) -> &str {
    (**self).script_path()
  }
}

/// A `<script>` element as described by the host's header data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScriptDescriptor {
  /// Script source URL or path.
  pub src: String,
  /// MIME type attribute.
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub mime_type: Option<String>,
  /// Character set attribute.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub charset: Option<String>,
  /// `defer` attribute, present when the host defers script execution.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub defer: Option<String>,
  /// Inline body of the element.
  #[serde(rename = "_data", default, skip_serializing_if = "Option::is_none")]
  pub data: Option<String>,
  /// Any further attributes, kept verbatim.
  #[serde(flatten)]
  pub attributes: BTreeMap<String, serde_json::Value>,
}

impl ScriptDescriptor {
  /// Descriptor with only a source attribute.
  pub fn new(src: impl Into<String>) -> Self {
    Self {
      src: src.into(),
      ..Self::default()
    }
  }
}

impl ScriptSource for ScriptDescriptor {
  fn script_path(&self) -> &str {
    &self.src
  }
}

/// Entry of a host script list: either a bare path or a full descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ScriptEntry {
  /// Plain script path as produced by the bundler's file list.
  Path(String),
  /// Header element description.
  Descriptor(ScriptDescriptor),
}

impl ScriptSource for ScriptEntry {
  fn script_path(&self) -> &str {
    match self {
      Self::Path(path) => path,
      Self::Descriptor(descriptor) => &descriptor.src,
    }
  }
}
