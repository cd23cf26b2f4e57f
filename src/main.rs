use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use porchlight::api::{self, AppState};
use porchlight::config::{Config, ReloadPolicy};
use porchlight::content::{load_store, ContentSource, LoadPolicy};
use porchlight::notify::Mailer;

#[derive(Parser)]
#[command(name = "porchlight")]
#[command(about = "Personal portfolio content server backed by flat JSON files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Porchlight server
    Serve {
        /// Port for the HTTP server (overrides PORCHLIGHT_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the content JSON file (overrides PORCHLIGHT_CONTENT)
        #[arg(short, long)]
        content: Option<PathBuf>,
    },
    /// Strict-load the content file and report what it contains
    Validate {
        /// Path to the content JSON file (overrides PORCHLIGHT_CONTENT)
        #[arg(short, long)]
        content: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "porchlight=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_env();

    match cli.command {
        Some(Commands::Serve { port, content }) => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(content) = content {
                config.content_path = content;
            }
            serve(config).await
        }
        Some(Commands::Validate { content }) => {
            if let Some(content) = content {
                config.content_path = content;
            }
            let store = load_store(&config.content_path, LoadPolicy::Strict)?;
            println!(
                "{}: {} projects, {} classes, {} links",
                config.content_path.display(),
                store.projects.len(),
                store.classes.len(),
                store.links.len()
            );
            Ok(())
        }
        None => serve(config).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Porchlight server on port {}", config.port);

    let source = match config.reload {
        ReloadPolicy::Cached => ContentSource::cached(&config.content_path, config.load_policy)?,
        ReloadPolicy::OnDemand => ContentSource::on_demand(&config.content_path, config.load_policy),
    };

    let mailer = match &config.mail {
        Some(mail) => Some(Mailer::smtp(mail)?),
        None => {
            tracing::warn!("no SMTP host configured; contact form delivery is disabled");
            None
        }
    };

    let state = AppState {
        source,
        resolver: config.resolver,
        mailer,
    };

    let router = api::create_router(state);
    let listener =
        tokio::net::TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;
    tracing::info!(
        "Porchlight server listening on http://127.0.0.1:{}",
        config.port
    );

    if config.trim_trailing_slash {
        // Routes are registered without trailing slashes; normalize so
        // /portfolio/ and /portfolio hit the same handler.
        let app = NormalizePathLayer::trim_trailing_slash().layer(router);
        axum::serve(
            listener,
            axum::ServiceExt::<axum::extract::Request>::into_make_service(app),
        )
        .await?;
    } else {
        axum::serve(listener, router).await?;
    }

    Ok(())
}
