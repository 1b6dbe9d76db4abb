use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::ServerConfig;

/// Static host for the portfolio site.
#[derive(Parser, Debug)]
#[command(name = "folio-server", version)]
pub struct Cli {
  /// TOML server config.
  #[arg(short, long)]
  pub config: Option<PathBuf>,

  /// Site root, overriding the config.
  #[arg(long)]
  pub root: Option<PathBuf>,

  /// Port, overriding the config.
  #[arg(short, long)]
  pub port: Option<u16>,

  #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  #[arg(short = 'q', long = "quiet", action = clap::ArgAction::Count, global = true)]
  pub quiet: u8
}

impl Cli {
  /// Config file (or defaults) with
  /// command-line overrides applied, then
  /// validated.
  pub fn resolve_config(
    &self
  ) -> anyhow::Result<ServerConfig> {
    let mut cfg = match &self.config {
      | Some(path) => {
        ServerConfig::load(path)?
      }
      | None => {
        info!(
          "no config file given; using \
           defaults"
        );
        ServerConfig::default()
      }
    };

    if let Some(root) = &self.root {
      cfg.root = Some(root.clone());
    }
    if let Some(port) = self.port {
      cfg.port = port;
    }

    cfg.validate()
  }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
  crate::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  let cfg = cli.resolve_config()?;
  info!(
    addr = %cfg.listen_addr(),
    root = %cfg.root_dir().display(),
    redirecting = cfg.return_directive.is_some(),
    "starting folio server"
  );

  let runtime =
    tokio::runtime::Builder::new_multi_thread()
      .enable_all()
      .build()?;
  runtime.block_on(crate::serve(cfg))
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use clap::Parser;

  use super::Cli;

  #[test]
  fn overrides_apply_over_defaults() {
    let cli = Cli::parse_from([
      "folio-server",
      "--root",
      "dist",
      "-p",
      "8080",
      "-vv"
    ]);
    assert_eq!(cli.verbose, 2);

    let cfg =
      cli.resolve_config().expect("valid");
    assert_eq!(cfg.port, 8080);
    assert_eq!(
      cfg.root,
      Some(PathBuf::from("dist"))
    );
  }

  #[test]
  fn missing_root_is_an_error() {
    let cli =
      Cli::parse_from(["folio-server"]);
    assert!(cli.resolve_config().is_err());
  }
}
