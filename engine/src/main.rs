use clap::Parser;

use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = kotomap_engine::cli::Cli::parse();
    match cli.command {
        kotomap_engine::cli::Commands::Run(config) => {
            init_tracing(&config.log_level);
            let mut app = kotomap_engine::app::App::new(config);
            app.start().await?;
        }
    }
    Ok(())
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
