use mirror_postprocess::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
  let cli = Cli::parse_args();

  if let Err(err) = logging::init_logging(cli.quiet) {
    eprintln!("mirror-postprocess: logging unavailable: {err}");
  }

  if let Err(err) = cli.run().await {
    eprintln!("mirror-postprocess error: {err:#}");
    std::process::exit(1);
  }
}
