//! Substring membership tests shared by every script classification rule.

/// Returns `true` when any pattern occurs somewhere inside `path`.
///
/// Patterns are scanned in order and the scan stops at the first hit. Matching is plain
/// substring containment, so a fragment found at the very start of the path counts just like
/// one found in the middle. Empty patterns never match.
pub fn matches_any<P: AsRef<str>>(path: &str, patterns: &[P]) -> bool {
  patterns.iter().any(|pattern| {
    let pattern = pattern.as_ref();
    !pattern.is_empty() && path.contains(pattern)
  })
}

/// Inverse of [`matches_any`].
pub fn matches_none<P: AsRef<str>>(path: &str, patterns: &[P]) -> bool {
  !matches_any(path, patterns)
}
