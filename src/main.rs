use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use tokengate::gateway::{GatewayState, init_gateway_router};
use tokengate::logging::init_tracing;
use tokengate::router::init_router;
use tokengate::state::init_app_state;
use tokengate_config::GatewayConfig;
use tokengate_core::hash_password;

#[derive(Parser)]
#[command(name = "tokengate")]
#[command(about = "Token-gated edge gateway and auth service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the auth service
    Auth {
        /// Address to listen on
        #[arg(short, long, default_value = "0.0.0.0:3000")]
        bind: String,
    },
    /// Run the edge gateway
    Gateway {
        /// Address to listen on
        #[arg(short, long, default_value = "0.0.0.0:3001")]
        bind: String,
    },
    /// Print a bcrypt hash of a password
    HashPassword {
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    if let Commands::HashPassword { password } = &cli.command {
        let hash = hash_password(password).map_err(|e| e.error)?;
        println!("{}", hash);
        return Ok(());
    }

    let _guard = init_tracing()?;

    match cli.command {
        Commands::Auth { bind } => {
            let state = init_app_state().map_err(|e| e.error)?;
            let app = init_router(state);
            let listener = TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            info!(address = %bind, "Auth service listening");
            info!("OpenAPI document at /api-docs/openapi.json");
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Commands::Gateway { bind } => {
            let config = GatewayConfig::from_env();
            if config.api_url.is_none() {
                tracing::warn!("API_URL is not set; proxied API calls will fail with 500");
            }
            let state = GatewayState::from_config(config)?;
            let app = init_gateway_router(state);
            let listener = TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            info!(address = %bind, "Gateway listening");
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Commands::HashPassword { .. } => {}
    }

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
