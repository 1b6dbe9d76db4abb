use folio_core::SiteConfig;

const SITE_TOML: &str =
  include_str!("../site.toml");

pub fn load_site_config() -> SiteConfig {
  match SiteConfig::from_toml_str(
    SITE_TOML
  ) {
    | Ok(config) => {
      if !config.has_store() {
        tracing::warn!(
          "site.toml has no \
           firestore.project_id; \
           projects will not load"
        );
      }
      config
    }
    | Err(error) => {
      tracing::error!(
        error = %format!("{error:#}"),
        "failed loading embedded site \
         config; using defaults"
      );
      SiteConfig::default()
    }
  }
}
