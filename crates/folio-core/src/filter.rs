use std::collections::BTreeMap;

use tracing::trace;

use crate::project::Project;

/// Tag filters the visitor has touched,
/// each either enabled or disabled.
///
/// A tag that was never toggled is simply
/// absent and counts as disabled.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct FilterState {
  entries: BTreeMap<String, bool>
}

impl FilterState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set_enabled(
    &mut self,
    tag: impl Into<String>,
    enabled: bool
  ) {
    let tag = tag.into();
    trace!(tag = %tag, enabled, "set filter");
    self.entries.insert(tag, enabled);
  }

  /// Returns a copy with `tag` updated,
  /// leaving `self` untouched.
  pub fn with_enabled(
    &self,
    tag: impl Into<String>,
    enabled: bool
  ) -> Self {
    let mut next = self.clone();
    next.set_enabled(tag, enabled);
    next
  }

  pub fn is_enabled(
    &self,
    tag: &str
  ) -> bool {
    self
      .entries
      .get(tag)
      .copied()
      .unwrap_or(false)
  }

  /// Decides whether a project with these
  /// tags is shown.
  ///
  /// An enabled filter matches when it is a
  /// case-sensitive substring of any tag,
  /// so `Web` matches `Web3`. With no
  /// entries, or with every entry
  /// disabled, everything is shown.
  pub fn matches(
    &self,
    tags: &[String]
  ) -> bool {
    if self.entries.is_empty() {
      return true;
    }

    let mut all_disabled = true;
    for (key, enabled) in &self.entries {
      if !*enabled {
        continue;
      }
      all_disabled = false;
      if tags
        .iter()
        .any(|tag| tag.contains(key.as_str()))
      {
        return true;
      }
    }

    all_disabled
  }

  pub fn is_visible(
    &self,
    project: &Project
  ) -> bool {
    self.matches(&project.tags)
  }
}
