use clap::Parser;
use folio_server::cli::{
  Cli,
  run
};

fn main() {
  let cli = Cli::parse();
  if let Err(err) = run(cli) {
    eprintln!("error: {err:#}");
    std::process::exit(1);
  }
}
