use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use static_devserver::cli::Cli;
use static_devserver::config::{AppState, Config};
use static_devserver::logger::LogWriter;
use static_devserver::server;
use static_devserver::ServerError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match start(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n[ERROR] {e}");
            ExitCode::FAILURE
        }
    }
}

fn start(cli: &Cli) -> Result<(), ServerError> {
    let cfg = Config::load_from(&cli.config, &cli.overrides())?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    let log = LogWriter::stdio();
    let state = Arc::new(AppState::new(cfg, log.clone())?);

    // Relative paths resolve against the served directory from here on
    std::env::set_current_dir(state.root())?;

    runtime.block_on(async {
        // Handlers go in before binding so an early Ctrl+C still shuts down cleanly
        let shutdown = server::signal::shutdown_signal(&log);
        server::run(state, shutdown).await
    })
}
