use std::process::ExitCode;

use anyhow::Result;
use datagen::config::Config;
use datagen::driver::{self, SCRATCH_CAPACITY};
use datagen::host::snapshot::SnapshotHost;
use datagen::sink::DirSink;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("datagen: {:#}", anyhow::Error::from(e));
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Generation failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<()> {
    tracing::info!(
        "Extracting {} into {}",
        config.snapshot.display(),
        config.out_dir.display()
    );
    let host = SnapshotHost::load(&config.snapshot)?;
    let mut sink = DirSink::create(&config.out_dir)?;
    let mut scratch = String::with_capacity(SCRATCH_CAPACITY);
    driver::run(&host, &mut sink, &mut scratch)?;
    Ok(())
}
