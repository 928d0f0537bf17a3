//! tinylogdir CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tinylogdir::cli::{Cli, CreateCommand};
use tinylogdir::recorder::{GitProbe, SystemContext};
use tinylogdir::ui::create_prompt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout carries only the created paths.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("tinylogdir=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tinylogdir=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("tinylogdir starting with args: {:?}", cli);

    let mut prompt = create_prompt(!cli.non_interactive);
    let command = CreateCommand::new(&cli);

    let rendered = command
        .execute(prompt.as_mut(), &SystemContext, &GitProbe)
        .and_then(|output| output.render(cli.json));

    match rendered {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
