//! main.rs

use dashboard_auth::configuration::get_configuration;
use dashboard_auth::startup::Application;
use dashboard_auth::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("dashboard_auth".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    tracing::info!(port = application.port(), "Dashboard login service started");
    if let Err(e) = application.run_until_stopped().await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Dashboard login service failed"
        );
        return Err(e.into());
    }
    tracing::info!("Dashboard login service has exited");
    Ok(())
}
