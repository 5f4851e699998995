//! Seed a data directory with an admin account and optional demo orders
//!
//! Safe to run more than once: an existing admin email or order number is
//! left untouched.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use shared::time::offset_from_minutes;
use shared::{ProcessId, Role, logging, process_info, process_warn};
use std::path::PathBuf;

use order_tracker::core::{NewAccount, sample_orders};
use order_tracker::types::NewMemberRequest;
use order_tracker::{
    Argon2PasswordHasher, FileOrderStore, FileUserStore, OrderStore, PasswordHasher, StorageBackend, UserStore,
    WebServerError,
};

#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Create the first admin account and demo data")]
struct Args {
    /// Directory holding orders.json and users.json
    #[arg(long, env = "DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    #[arg(long, env = "SEED_ADMIN_EMAIL")]
    admin_email: String,

    #[arg(long, env = "SEED_ADMIN_USERNAME", default_value = "Administrator")]
    admin_username: String,

    #[arg(long, env = "SEED_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: String,

    /// Also insert the seven demo orders
    #[arg(long)]
    sample_data: bool,

    /// Offset from UTC, in minutes, used to place demo dates
    #[arg(long, env = "UTC_OFFSET_MINUTES", default_value = "0", allow_hyphen_values = true)]
    utc_offset_minutes: i32,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_seed();
    logging::init_tracing_with_level(Some(&args.log_level));

    let storage = StorageBackend::JsonFiles {
        data_dir: args.data_dir.clone(),
    };
    let (Some(orders_path), Some(users_path)) = (storage.orders_path(), storage.users_path()) else {
        anyhow::bail!("JSON file storage has no paths");
    };

    let users = FileUserStore::open(&users_path)
        .await
        .with_context(|| format!("opening {}", users_path.display()))?;
    seed_admin(&users, &args).await?;

    if args.sample_data {
        let offset = offset_from_minutes(args.utc_offset_minutes)
            .with_context(|| format!("invalid UTC offset: {} minutes", args.utc_offset_minutes))?;
        let orders = FileOrderStore::open(&orders_path)
            .await
            .with_context(|| format!("opening {}", orders_path.display()))?;

        let mut inserted = 0;
        for order in sample_orders(Utc::now(), offset) {
            match orders.insert(order).await {
                Ok(_) => inserted += 1,
                Err(WebServerError::Conflict { message }) => {
                    process_warn!(ProcessId::current(), "⚠️ Skipping demo order: {}", message);
                }
                Err(e) => return Err(e).context("inserting demo order"),
            }
        }
        process_info!(ProcessId::current(), "📦 Inserted {} demo orders", inserted);
    }

    logging::log_success(ProcessId::current(), "Seeding complete");
    Ok(())
}

async fn seed_admin(users: &FileUserStore, args: &Args) -> Result<()> {
    if users.find_by_email(&args.admin_email).await?.is_some() {
        process_info!(ProcessId::current(), "👤 Admin {} already exists", args.admin_email);
        return Ok(());
    }

    let account = NewAccount::from_member(&NewMemberRequest {
        email: Some(args.admin_email.clone()),
        username: Some(args.admin_username.clone()),
        role: Some(Role::Admin.to_string()),
        password: Some(args.admin_password.clone()),
    })
    .context("validating admin account")?;

    let digest = Argon2PasswordHasher::new()
        .hash(account.password())
        .context("hashing admin password")?;
    let admin = users
        .insert(account.into_user(digest, Utc::now()))
        .await
        .context("inserting admin")?;

    process_info!(
        ProcessId::current(),
        "👤 Created admin {} ({}) in {}",
        admin.username,
        admin.email,
        users.path().display()
    );
    Ok(())
}
