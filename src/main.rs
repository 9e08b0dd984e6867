mod cli;
mod commands;
mod io;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::CommandHandler;
use mdecode::{error, types, Context};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => error::ExitCode::Success.into(),
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code().into()
        }
    }
}

// Uses RUST_LOG, defaulting to warnings only.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init();
}

fn run(cli: Cli) -> error::Result<()> {
    let ctx = Context::default();

    let handler: Box<dyn CommandHandler> = match cli.command {
        Command::Peel {
            encodings,
            r#in,
            out,
            max_rounds,
            force,
            json,
        } => Box::new(commands::PeelCommand {
            config: encodings.config(),
            input: types::InputSource::parse(&r#in),
            output: types::OutputDest::parse(&out),
            max_rounds,
            force,
            json,
            verbose: cli.verbose,
        }),

        Command::Detect { encodings, r#in, json } => Box::new(commands::DetectCommand {
            config: encodings.config(),
            input: types::InputSource::parse(&r#in),
            json,
        }),
    };

    handler.execute(&ctx)
}
