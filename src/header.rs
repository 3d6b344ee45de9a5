//! Page header planning: inject the admin bundle for editors and flush the static block first.

use serde::Serialize;
use tracing::debug;

use crate::dispatch::RequestType;
use crate::models::ScriptDescriptor;

/// Script endpoint of the host, relative to its base URL.
pub const SCRIPT_ENDPOINT: &str = "lib/exe/js.php";

/// Permission level of the current viewer on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AuthLevel(pub u16);

impl AuthLevel {
  /// No access.
  pub const NONE: Self = Self(0);
  /// Read access.
  pub const READ: Self = Self(1);
  /// Edit existing pages.
  pub const EDIT: Self = Self(2);
  /// Create new pages.
  pub const CREATE: Self = Self(4);
  /// Upload media.
  pub const UPLOAD: Self = Self(8);
  /// Delete media.
  pub const DELETE: Self = Self(16);
  /// Superuser.
  pub const ADMIN: Self = Self(255);

  /// Whether the viewer needs the admin bundle.
  pub fn can_edit(self) -> bool {
    self >= Self::EDIT
  }
}

/// Host settings needed to build the admin script include.
#[derive(Debug, Clone)]
pub struct HeaderContext {
  /// Base URL of the wiki, with trailing slash.
  pub base_url: String,
  /// Active template name.
  pub template: String,
  /// Cache-busting seed appended to the include.
  pub seed: String,
  /// Whether script tags carry a `defer` attribute.
  pub defer_js: bool,
}

/// Header scripts split into the block flushed ahead of everything else and the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaheaderPlan {
  /// First script of the header, emitted before any other header output.
  pub early: Option<ScriptDescriptor>,
  /// Scripts left for the host to emit in its normal pass.
  pub remaining: Vec<ScriptDescriptor>,
}

/// Source URL of the admin bundle include.
pub fn admin_script_src(base_url: &str, template: &str, seed: &str) -> String {
  format!(
    "{base_url}{SCRIPT_ENDPOINT}?t={template}&{param}={admin}&tseed={seed}",
    template = urlencoding::encode(template),
    param = RequestType::PARAM,
    admin = RequestType::Admin.as_str(),
  )
}

/// Descriptor for the admin bundle include.
pub fn admin_script(context: &HeaderContext) -> ScriptDescriptor {
  ScriptDescriptor {
    src: admin_script_src(&context.base_url, &context.template, &context.seed),
    mime_type: Some("text/javascript".into()),
    charset: Some("utf-8".into()),
    defer: context.defer_js.then(|| "defer".to_string()),
    data: Some(String::new()),
    ..ScriptDescriptor::default()
  }
}

/// Plan the header script output for a viewer.
///
/// Viewers with edit rights or better get the admin include appended. The first script of the
/// resulting list is the static configuration block and is split off so it can be printed first.
pub fn plan_metaheader(
  mut scripts: Vec<ScriptDescriptor>,
  viewer: AuthLevel,
  context: &HeaderContext,
) -> MetaheaderPlan {
  if viewer.can_edit() {
    let script = admin_script(context);
    debug!(src = %script.src, level = viewer.0, "adding admin script include");
    scripts.push(script);
  }

  if scripts.is_empty() {
    return MetaheaderPlan::default();
  }

  let early = scripts.remove(0);
  MetaheaderPlan {
    early: Some(early),
    remaining: scripts,
  }
}
