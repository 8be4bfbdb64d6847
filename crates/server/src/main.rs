use anyhow::Context as _;
use clap::Parser as _;
use housecall_api::HousecallClient;
use housecall_api::safety::redact_url;
use housecall_mcp::{Cli, HousecallServer, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format).context("initialize logging")?;

    let config = cli.client_config().context("load Housecall Pro configuration")?;
    let client = HousecallClient::new(&config).context("build Housecall Pro client")?;

    let base_url = redact_url(client.base_url());
    let server = HousecallServer::new(client);
    tracing::info!(
        base_url = %base_url,
        timeout_secs = config.timeout.as_secs(),
        tools = server.catalog().tools().len(),
        "serving Housecall Pro tools on stdio"
    );

    server.serve_stdio().await?;
    Ok(())
}
