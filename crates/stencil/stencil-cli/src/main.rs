use std::process::ExitCode;

use clap::Parser;
use stencil_cli::{exit_code_for_error, logging, tagged_message, Cli, CliExitCode};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.global.verbose);

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot resolve working directory: {e}");
            return CliExitCode::Failure.into();
        }
    };

    match stencil_cli::execute(&cli, &root) {
        Ok(output) => {
            print!("{output}");
            CliExitCode::Success.into()
        }
        Err(err) => {
            let code = exit_code_for_error(&err);
            error!(code = ?code, "command failed");
            match tagged_message(&err) {
                Some(tagged) => eprintln!("error: {err}\n  caused by: {tagged}"),
                None => eprintln!("error: {err:#}"),
            }
            code.into()
        }
    }
}
