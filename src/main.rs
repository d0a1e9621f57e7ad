use aiphoto::app::App;
use aiphoto::cli::Cli;
use aiphoto::output::{Handled, Outcome};
use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn report(handled: &Handled) {
    for text in &handled.commentary {
        println!("Model: {}", text);
    }

    match &handled.outcome {
        Outcome::ImageWritten(path) => info!("Done. Image written to {}", path.display()),
        Outcome::EmptyNoCandidates => warn!("No candidates returned in the response"),
        Outcome::EmptyNoImage => warn!("No image data received in the response"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aiphoto=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // The app (and its download staging dir) must drop before the process
    // exits, so the exit code is carried out of the match instead.
    let exit_code = match App::new().await {
        Ok(app) => match app.run(cli.command).await {
            Ok(handled) => {
                report(&handled);
                0
            }
            Err(e) => {
                error!("{}", e);
                1
            }
        },
        Err(e) => {
            error!("Failed to initialize client: {}", e);
            1
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
