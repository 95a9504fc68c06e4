/// objview - inspect and transform OBJ meshes
///
/// Examples:
///   objview info model.obj
///   objview transform model.obj --rotate 0,90,0 --degrees --scale 2 -o out.obj

use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use objview_cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let stdout = io::stdout();
    match run(&cli.command, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
