mod app;
mod cli;
mod config;
mod consts;
mod core;
mod data;
mod error;
mod output;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);

    if let Err(e) = app::run(&cli, &config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
