use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use stockroom_dashboard::{App, Args, DashboardConfig, NotificationTicker, Outcome, render};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::try_from(Args::parse()).context("invalid configuration")?;
    stockroom_observability::init(config.log_format);

    tracing::info!(
        start_route = %config.start_route,
        notifications = config.notifications_enabled,
        interval_secs = config.notify_interval.as_secs(),
        "starting stockroom console"
    );

    let mut app = App::new(config.start_route);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let ticker = config
        .notifications_enabled
        .then(|| NotificationTicker::spawn(config.notify_interval, tx));

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(render::with_prompt(&app.render()).as_bytes())
        .await?;
    stdout.flush().await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                let output = if line.trim().is_empty() {
                    String::new()
                } else {
                    match app.execute_line(&line) {
                        Ok(Outcome::Quit) => break,
                        Ok(Outcome::Render(text)) => text,
                        Err(e) => {
                            tracing::warn!(error = %e, input = %line, "command rejected");
                            format!("error: {e}\n")
                        }
                    }
                };
                stdout.write_all(render::with_prompt(&output).as_bytes()).await?;
                stdout.flush().await?;
            }
            Some(notification) = rx.recv() => {
                let alert = app.receive_notification(notification);
                stdout.write_all(b"\n").await?;
                stdout.write_all(render::with_prompt(&alert).as_bytes()).await?;
                stdout.flush().await?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    if let Some(ticker) = ticker {
        ticker.shutdown().await;
    }
    tracing::info!("stockroom console stopped");
    Ok(())
}
