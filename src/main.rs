use std::net::TcpListener;

use anyhow::Context;

use demandtest::settings::Settings;
use demandtest::{app, database, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load()?;

    let pool = database::connect(settings.database.with_db());
    database::migrate(&pool).await?;

    let email_client = settings.email.client()?;
    let checkout_client = settings.checkout.client()?;

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!(addr = ?listener.local_addr()?, "Listening");

    app::run(
        listener,
        pool,
        email_client,
        checkout_client,
        settings.site(),
    )?
    .await
    .context("Failed to run app")
}
