use anyhow::Result;
use clap::Parser;

use skills_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let log = logging::Logger::new(args.verbose);

    match args.command {
        cli::Command::Install(opts) => commands::install::run(&args.global, &opts, &log),
        cli::Command::Uninstall(opts) => commands::uninstall::run(&args.global, &opts, &log),
        cli::Command::Status(opts) => commands::status::run(&args.global, &opts, &log),
        cli::Command::Version => {
            let version = option_env!("SKILLS_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("skills {version}");
            Ok(())
        }
    }
}
