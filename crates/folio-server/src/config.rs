use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use serde::Deserialize;
use tracing::{
  debug,
  info
};

const REDIRECT_CODES: [u16; 5] =
  [301, 302, 303, 307, 308];

/// A fixed response for every request,
/// `return <code> <target>;` in nginx
/// terms.
#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct ReturnDirective {
  pub code:   u16,
  #[serde(default)]
  pub target: String
}

impl ReturnDirective {
  pub fn is_redirect(&self) -> bool {
    self.code / 100 == 3
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub root:              Option<PathBuf>,
  pub index:             String,
  pub not_found:         String,
  pub spa_fallback:      bool,
  pub max_request_bytes: u64,
  pub server_name:       Option<String>,
  #[serde(rename = "return")]
  pub return_directive:
    Option<ReturnDirective>
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "0.0.0.0"
        .to_string(),
      port:              80,
      root:              None,
      index:             "index.html"
        .to_string(),
      not_found:         "404.html"
        .to_string(),
      spa_fallback:      true,
      max_request_bytes: 4096 * 4,
      server_name:       None,
      return_directive:  None
    }
  }
}

impl ServerConfig {
  #[tracing::instrument]
  pub fn load(
    path: &Path
  ) -> anyhow::Result<Self> {
    info!(config = %path.display(), "loading server config");
    let raw = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    Self::from_toml_str(&raw)
      .with_context(|| {
        format!(
          "invalid config {}",
          path.display()
        )
      })
  }

  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let cfg: Self = toml::from_str(raw)
      .context("failed parsing toml")?;
    debug!(?cfg, "parsed server config");
    Ok(cfg)
  }

  /// Fills defaults and rejects
  /// combinations the server cannot
  /// honour.
  pub fn validate(
    mut self
  ) -> anyhow::Result<Self> {
    if self.port == 0 {
      self.port = 80;
    }

    if let Some(directive) =
      &self.return_directive
    {
      validate_return(
        directive,
        self.server_name.as_deref()
      )?;
      return Ok(self);
    }

    if self.root.is_none()
      || self.index.is_empty()
    {
      bail!(
        "config must define root and \
         index, or a return directive"
      );
    }

    if self.max_request_bytes == 0 {
      bail!(
        "max_request_bytes must be \
         greater than zero"
      );
    }

    Ok(self)
  }

  pub fn listen_addr(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }

  /// Root directory; only meaningful after
  /// [`validate`](Self::validate) without
  /// a return directive.
  pub fn root_dir(&self) -> &Path {
    self
      .root
      .as_deref()
      .unwrap_or_else(|| Path::new("."))
  }
}

fn validate_return(
  directive: &ReturnDirective,
  server_name: Option<&str>
) -> anyhow::Result<()> {
  if !(100..=599).contains(&directive.code)
  {
    return Err(anyhow!(
      "return code {} is not an HTTP \
       status",
      directive.code
    ));
  }

  if directive.is_redirect() {
    if !REDIRECT_CODES
      .contains(&directive.code)
    {
      bail!(
        "redirect code must be one of \
         301, 302, 303, 307, 308 (got {})",
        directive.code
      );
    }
    if directive.target.is_empty() {
      bail!(
        "redirect return needs a target"
      );
    }
    if directive.target.contains("$host")
      && server_name
        .is_none_or(str::is_empty)
    {
      bail!(
        "return target uses $host but \
         server_name is not set"
      );
    }
  }

  Ok(())
}
