use anyhow::Result;
use roubos_celular::{execute, PipelineConfig};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // logs go to stderr; stdout carries only the report
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let config = PipelineConfig::default();
    info!(input = %config.input_path.display(), "startup");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&config, &mut out)?;
    out.flush()?;
    Ok(())
}
