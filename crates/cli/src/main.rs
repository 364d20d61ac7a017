use anyhow::Context;
use clap::{Parser, Subcommand};

use bookshelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "In-memory book catalog over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until Ctrl-C
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
        /// Start with an empty catalog
        #[arg(long)]
        no_seed: bool,
    },
    /// Print the merged OpenAPI document as JSON
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Bookshelf settings")?;

    let mut registry = ModuleRegistry::new();
    bookshelf_app::register_all(&mut registry);

    match cli.command {
        Command::Serve {
            host,
            port,
            no_seed,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if no_seed {
                settings.catalog.seed = false;
            }
            serve(&registry, &settings).await
        }
        Command::Openapi => {
            let document = bookshelf_http::router::openapi_document(&registry);
            let rendered = serde_json::to_string_pretty(&document)
                .context("failed to render OpenAPI document")?;
            println!("{rendered}");
            Ok(())
        }
    }
}

async fn serve(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        version = env!("CARGO_PKG_VERSION"),
        "bookshelf bootstrap starting"
    );

    let ctx = InitCtx { settings };
    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = bookshelf_http::start_server(registry, settings).await;

    registry.stop_all().await?;
    served
}
