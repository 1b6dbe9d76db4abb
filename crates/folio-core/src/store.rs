//! Seams to the outside world: persisted
//! key/value storage, the remote document
//! store and the presentation theme
//! attribute.

use crate::project::ProjectRecord;
use crate::theme::ThemeMode;

/// Persisted key/value storage.
///
/// Read failures are folded into `None`;
/// callers cannot tell them apart from a
/// missing key.
pub trait KeyValueStore {
  fn get(&self, key: &str)
  -> Option<String>;

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

/// The global "current theme" attribute
/// read by the styling layer.
pub trait ThemeSink {
  fn apply(&mut self, mode: ThemeMode);
}

/// Read-only access to the remote
/// document store holding tags and
/// projects.
#[allow(async_fn_in_trait)]
pub trait ProjectStore {
  async fn fetch_tags(
    &self
  ) -> anyhow::Result<Vec<String>>;

  async fn fetch_projects(
    &self
  ) -> anyhow::Result<Vec<ProjectRecord>>;
}
