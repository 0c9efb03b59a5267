use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use registry_docs::api::{self, AppState};
use registry_docs::config::Config;
use registry_docs::manifest::{self, ManifestStore};
use registry_docs::modules::{ModuleIndex, ModuleResolver};
use registry_docs::publish;

#[derive(Parser)]
#[command(name = "regdocs")]
#[command(about = "Documentation server for a UI component registry")]
struct Cli {
    /// Manifest file path or URL
    #[arg(short, long, global = true)]
    manifest: Option<String>,

    /// Directory the manifest's file paths are relative to
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the documentation site
    Serve {
        /// Port for HTTP server
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write one public manifest file per registry item
    Build {
        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Report data-quality issues in the manifest
    Check,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "registry_docs=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let source = config.manifest_source();
    let store = match manifest::load(&source).await {
        Ok(manifest) => ManifestStore::new(manifest),
        Err(e) => {
            // Keep serving: pages show the error state until a reload succeeds.
            tracing::error!("Failed to load manifest from {}: {}", source, e);
            ManifestStore::empty()
        }
    };

    let index = ModuleIndex::scan(&config.root, &config.registry_dir, &config.suffixes)
        .with_context(|| format!("Failed to index {}", config.root.display()))?;
    let modules = ModuleResolver::new(index, config.suffixes.clone());

    let app = api::create_router(AppState::new(store, modules).with_source(source));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;
    tracing::info!("Registry docs listening on http://127.0.0.1:{}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_env();
    if let Some(manifest) = cli.manifest {
        config.manifest = manifest;
    }
    if let Some(root) = cli.root {
        config.root = root;
    }

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
        }
        Commands::Build { out } => {
            let manifest = manifest::load(&config.manifest_source()).await?;
            let out = out.unwrap_or(config.public_dir);
            let written = publish::write_public_manifests(&manifest, &out)?;
            println!("Wrote {} item manifests to {}", written.len(), out.display());
        }
        Commands::Check => {
            let manifest = manifest::load(&config.manifest_source()).await?;
            let issues = publish::check_manifest(&manifest);
            if issues.is_empty() {
                println!("{}@{}: {} items, no issues", manifest.name, manifest.version, manifest.items.len());
            } else {
                for issue in &issues {
                    println!("{}", issue);
                }
                anyhow::bail!("{} manifest issue(s) found", issues.len());
            }
        }
    }

    Ok(())
}
