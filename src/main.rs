mod app;
mod cli;
mod config;
mod output;
mod paths;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::{CommandContext, handle_command};
use cli::Cli;
use config::Config;

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let loaded = Config::load();
    let cli = Cli::parse().with_config(&loaded.config);

    init_logging(cli.debug);
    loaded.log();

    let ctx = CommandContext::new(&cli, &loaded.config);
    if let Err(e) = handle_command(&ctx) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
