// main.rs - Command-line entry point: console or windowed Game of Life

use std::process::ExitCode;

use clap::Parser;
use conway_life::{patterns, CliArgs, Game, LifeOptions, Result, StopReason};

fn main() -> ExitCode {
    // Quiet by default; RUST_LOG=info or RUST_LOG=debug for more
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();

    if args.list_patterns {
        for name in patterns::names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let options = LifeOptions::load_with_args(args)?;
    let mut game = Game::new(options)?;

    if game.options().graphic {
        return game.run_graphic();
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(game.run(shutdown_signal()))?;

    match summary.stop {
        StopReason::Cancelled => println!("Stopped after {} generations", summary.generations),
        StopReason::StepLimit => println!("Finished {} generations", summary.generations),
    }
    Ok(())
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
