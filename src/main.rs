use clap::Parser;
use std::process;

use taskman::cli::commands::Cli;
use taskman::{cli, logging};

fn main() {
    let _logger = logging::init();

    let cli_args = Cli::parse();
    let exit_code = cli::run(cli_args.command, cli_args.json);

    process::exit(exit_code);
}
