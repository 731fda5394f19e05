mod api;
mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod logging;
mod output;
mod repl;
mod store;
mod utils;

use clap::Parser;

use cli::{Action, Cli};
use config::Config;

fn main() {
    let config = Config::load();
    let mut cli = Cli::parse().with_config(&config);

    if let Err(e) = logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    ) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    config.report();

    let action = Action::from(cli.command.take());
    if let Err(e) = app::run(action, &cli, &config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
