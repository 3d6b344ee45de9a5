//! Notifications sent to the host page lifecycle once the request type is known.

use tracing::debug;

use crate::dispatch::RequestType;

/// What the host should do with its editor toolbar definition for this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
  /// Clear the toolbar payload and skip the host's default buttons.
  Suppress,
  /// Keep the toolbar but drop header output buffered so far.
  DiscardBufferedHeader,
}

/// Host hooks touched by the toolbar notification.
pub trait HostLifecycle {
  /// Replace the toolbar definition with an empty payload.
  fn clear_toolbar(&mut self);
  /// Stop the host from populating its default toolbar buttons.
  fn prevent_default(&mut self);
  /// Discard any header output buffered so far.
  fn discard_buffered_output(&mut self);
}

/// Toolbar handling for a request type.
///
/// The toolbar is only useful inside the admin bundle; every other bundle drops it.
pub fn toolbar_action(request_type: RequestType) -> ToolbarAction {
  match request_type {
    RequestType::Admin => ToolbarAction::DiscardBufferedHeader,
    RequestType::Default => ToolbarAction::Suppress,
  }
}

/// Apply the toolbar handling for `request_type` to the host.
pub fn notify_toolbar<H: HostLifecycle + ?Sized>(
  request_type: RequestType,
  host: &mut H,
) -> ToolbarAction {
  let action = toolbar_action(request_type);
  debug!(?action, %request_type, "notifying host toolbar lifecycle");
  match action {
    ToolbarAction::Suppress => {
      host.clear_toolbar();
      host.prevent_default();
    }
    ToolbarAction::DiscardBufferedHeader => host.discard_buffered_output(),
  }
  action
}
