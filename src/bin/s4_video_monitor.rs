use anyhow::{Context, Result};
use s4_signal_monitor::core::{STARTUP_BANNER, SignalMonitor};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let monitor = SignalMonitor::builder()
        .build()
        .context("failed to configure signal monitor")?;

    println!("{}", STARTUP_BANNER);

    monitor
        .run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                // without a signal handler, run until killed
                tracing::warn!(error = %err, "cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
