mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod state;
mod store;
mod utils;
mod validate;

use clap::Parser;
use env_logger::Env;

use cli::Cli;
use config::Config;

/// RUST_LOG wins over `--debug` when set
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = Config::load();
    let cli = cli.with_config(&config);

    if let Err(e) = app::run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
