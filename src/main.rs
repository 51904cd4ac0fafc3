use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> miette::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if !casework::cli::run()? {
        process::exit(1);
    }
    Ok(())
}
