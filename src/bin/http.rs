#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use hr_portal::{PortalConfig, http_api, logging};

    logging::init_tracing();

    let config = PortalConfig::from_env()?;
    let addr: SocketAddr = config.http_addr.parse()?;
    let calendar = config.work_calendar()?;

    println!("hr-portal HTTP API listening on http://{addr}");
    http_api::serve(addr, calendar).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
