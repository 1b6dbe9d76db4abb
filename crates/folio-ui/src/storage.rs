use anyhow::anyhow;
use folio_core::{
  KeyValueStore,
  ThemeMode,
  ThemeSink
};

const THEME_ATTRIBUTE: &str =
  "data-bs-theme";

fn local_storage() -> Option<web_sys::Storage>
{
  web_sys::window().and_then(|window| {
    window
      .local_storage()
      .ok()
      .flatten()
  })
}

/// `window.localStorage`. Private browsing
/// or a disabled store reads as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
  fn get(
    &self,
    key: &str
  ) -> Option<String> {
    local_storage().and_then(|storage| {
      storage.get_item(key).ok().flatten()
    })
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    let storage = local_storage()
      .ok_or_else(|| {
        anyhow!("local storage unavailable")
      })?;
    storage
      .set_item(key, value)
      .map_err(|error| {
        anyhow!(
          "local storage write rejected: \
           {error:?}"
        )
      })
  }
}

/// Writes the Bootstrap theme attribute on
/// `<html>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTheme;

impl ThemeSink for DocumentTheme {
  fn apply(&mut self, mode: ThemeMode) {
    let root = web_sys::window()
      .and_then(|window| {
        window.document()
      })
      .and_then(|document| {
        document.document_element()
      });

    match root {
      | Some(root) => {
        if let Err(error) = root
          .set_attribute(
            THEME_ATTRIBUTE,
            mode.storage_value()
          )
        {
          tracing::error!(
            error = ?error,
            "failed setting theme \
             attribute"
          );
        }
      }
      | None => {
        tracing::warn!(
          "no document root; theme not \
           applied"
        );
      }
    }
  }
}
