mod data;
mod game;
mod graphics;
mod math;
mod modes;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use data::{error::RunError, reader::Args, Program};
use modes::Mode;

fn init_logging(mode: Mode) {
    // Anything below warn would draw over the game in the terminal.
    let default = match mode {
        Mode::Win => "coffeesnake=info",
        Mode::Con => "coffeesnake=warn",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(prog: Program) -> Result<(), RunError> {
    match prog.mode() {
        Mode::Win => modes::windowed_mode::winit_main(prog),

        #[cfg(feature = "terminal")]
        Mode::Con => modes::console_mode::con_main(prog),

        #[cfg(not(feature = "terminal"))]
        Mode::Con => unreachable!("terminal mode is not compiled in"),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.mode());

    let prog = match Program::from_args(&args) {
        Ok(prog) => prog,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(prog) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
