use brand_catalog::{
    config::{database, settings},
    core::{brand, category, relation_manager::ProductRelationManager, storage::LocalImageStore},
    errors::Result,
};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use tabled::builder::Builder;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Brand catalog administration
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (defaults to ./catalog.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a brand
    AddBrand {
        /// Brand name
        name: String,
    },
    /// Create a category
    AddCategory {
        /// Category name
        name: String,
    },
    /// List all brands
    Brands,
    /// List the products of a brand, newest first
    Products {
        /// Brand ID
        brand: i64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load settings
    let app_settings = cli
        .config
        .as_ref()
        .map_or_else(settings::load_default_settings, settings::load_settings)
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;

    // 4. Connect and make sure the tables exist
    let db = database::create_connection(&app_settings)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    match cli.command {
        Command::AddBrand { name } => {
            let brand = brand::create_brand(&db, name).await?;
            println!("Created brand {} ({})", brand.name, brand.id);
        }
        Command::AddCategory { name } => {
            let category = category::create_category(&db, name).await?;
            println!("Created category {} ({})", category.name, category.id);
        }
        Command::Brands => {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Name"]);
            for brand in brand::get_all_brands(&db).await? {
                builder.push_record([brand.id.to_string(), brand.name]);
            }
            println!("{}", builder.build());
        }
        Command::Products { brand } => {
            let store = LocalImageStore::from_settings(&app_settings.storage);
            let manager =
                ProductRelationManager::mount(db, store, brand, &app_settings.display).await?;

            let mut builder = Builder::default();
            builder.push_record(manager.table_schema().headers());
            for row in manager.rows().await? {
                builder.push_record(row);
            }
            println!("{}", builder.build());
        }
    }

    Ok(())
}
