use clap::Parser;
use loan_schedule::config::Config;
use loan_schedule::web::{self, AppState};
use log::info;
use simple_logger::SimpleLogger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::parse();
    SimpleLogger::new().with_level(cfg.log_level).init()?;

    let app = web::router(AppState {
        limits: cfg.limits(),
    });

    let listener = tokio::net::TcpListener::bind(cfg.bind).await?;
    info!(
        "listening on {} (max {} installments)",
        cfg.bind, cfg.max_installments
    );
    axum::serve(listener, app).await?;
    Ok(())
}
