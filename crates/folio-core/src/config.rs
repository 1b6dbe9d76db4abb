use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::debug;

pub const DEFAULT_FIRESTORE_ENDPOINT:
  &str =
  "https://firestore.googleapis.com/v1";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct FirestoreConfig {
  pub endpoint:   String,
  pub project_id: String,
  pub database:   String,
  pub api_key:    String,
  pub page_size:  u32
}

impl Default for FirestoreConfig {
  fn default() -> Self {
    Self {
      endpoint:   DEFAULT_FIRESTORE_ENDPOINT
        .to_string(),
      project_id: String::new(),
      database:   "(default)".to_string(),
      api_key:    String::new(),
      page_size:  300
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct SiteConfig {
  pub owner:      String,
  pub tagline:    String,
  pub resume_url: String,
  pub github_url: String,
  pub firestore:  FirestoreConfig
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      owner:      "Portfolio".to_string(),
      tagline:    String::new(),
      resume_url: "/resume.pdf".to_string(),
      github_url: String::new(),
      firestore:  FirestoreConfig::default()
    }
  }
}

impl SiteConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let cfg: Self = toml::from_str(raw)
      .context(
        "failed parsing site config"
      )?;

    if cfg.firestore.page_size == 0 {
      anyhow::bail!(
        "firestore.page_size must be \
         greater than zero"
      );
    }

    debug!(
      owner = %cfg.owner,
      project_id = %cfg.firestore.project_id,
      "parsed site config"
    );
    Ok(cfg)
  }

  pub fn has_store(&self) -> bool {
    !self.firestore.project_id.is_empty()
  }
}
