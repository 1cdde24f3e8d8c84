use clap::Parser;
use std::process;

use recipebox::cli;
use recipebox::cli::commands::{Cli, Commands};
use recipebox::logging;

fn main() {
    let cli_args = Cli::parse();
    logging::init(cli_args.verbose);
    let json_output = cli_args.json;
    let db = cli_args.db.as_deref();

    let exit_code = match cli_args.command {
        Commands::Init { demo } => cli::init::run(demo, json_output, db),
        Commands::User(cmd) => cli::user::run(cmd, json_output, db),
        Commands::Recipe(cmd) => cli::recipe::run(cmd, json_output, db),
        Commands::Plan(cmd) => cli::plan::run(cmd, json_output, db),
        Commands::Shop(cmd) => cli::shop::run(cmd, json_output, db),
    };

    process::exit(exit_code);
}
