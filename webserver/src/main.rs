//! Order tracker server entry point
//!
//! Reads configuration from the command line and environment (after loading
//! an optional `.env` file), opens the configured stores and serves the API.

use clap::Parser;
use shared::{ProcessId, logging, process_info};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use order_tracker::{
    Argon2PasswordHasher, FileOrderStore, FileUserStore, InMemoryOrderStore, InMemoryUserStore, OrderStore,
    ServerConfig, StorageBackend, UserStore, WebServer, WebServerError, WebServerResult,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "order-tracker")]
#[command(about = "Order tracking web service")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Directory holding orders.json and users.json
    #[arg(long, env = "DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Keep everything in memory instead of the data directory
    #[arg(long)]
    in_memory: bool,

    /// Secret used to sign session tokens (at least 16 bytes)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Mark the session cookie Secure (requires HTTPS)
    #[arg(long, env = "SECURE_COOKIES")]
    secure_cookies: bool,

    /// Count open orders as overdue once due within this many minutes
    #[arg(long, env = "OVERDUE_BUFFER_MINUTES")]
    overdue_buffer_minutes: Option<i64>,

    /// Offset from UTC, in minutes, that defines calendar days
    #[arg(long, env = "UTC_OFFSET_MINUTES", default_value = "0", allow_hyphen_values = true)]
    utc_offset_minutes: i32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> WebServerResult<ServerConfig> {
        let bind_address: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| WebServerError::config(format!("Invalid bind address: {e}")))?;

        let storage = if self.in_memory {
            StorageBackend::InMemory
        } else {
            StorageBackend::JsonFiles { data_dir: self.data_dir }
        };

        ServerConfig::new(bind_address, &self.jwt_secret)?
            .with_storage(storage)
            .with_secure_cookies(self.secure_cookies)
            .with_overdue_buffer_minutes(self.overdue_buffer_minutes)?
            .with_utc_offset_minutes(self.utc_offset_minutes)
    }
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = args.into_config()?;
    logging::log_startup(
        ProcessId::current(),
        &format!("order tracker on {} ({:?})", config.bind_address, config.storage),
    );

    match (config.storage.orders_path(), config.storage.users_path()) {
        (Some(orders_path), Some(users_path)) => {
            let orders = FileOrderStore::open(orders_path).await?;
            let users = FileUserStore::open(users_path).await?;
            serve(&config, orders, users).await?;
        }
        _ => {
            process_info!(ProcessId::current(), "🧪 Using in-memory storage; data is lost on exit");
            serve(&config, InMemoryOrderStore::new(), InMemoryUserStore::new()).await?;
        }
    }

    logging::log_success(ProcessId::current(), "Order tracker stopped gracefully");
    Ok(())
}

async fn serve<O, U>(config: &ServerConfig, orders: O, users: U) -> WebServerResult<()>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let webserver = WebServer::new(
        config,
        Arc::new(orders),
        Arc::new(users),
        Arc::new(Argon2PasswordHasher::new()),
    );

    if let Err(e) = webserver.run().await {
        logging::log_error(ProcessId::current(), "Server", &e);
        return Err(e);
    }
    Ok(())
}
