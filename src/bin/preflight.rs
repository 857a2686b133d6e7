use garden_catalog::infra::config::StoreBackend;
use garden_catalog::storage::catalog::open_store;
use garden_catalog::{AppConfig, UploadStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-upload-dir]\n\
         \n\
         Reads the same env vars as api_server:\n\
           BIND_ADDR, STATIC_DIR, INDEX_FILE, UPLOAD_DIR, CATALOG_BACKEND, DATABASE_URL, ...\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let create_upload_dir = args.iter().any(|a| a == "--create-upload-dir");

    let config = AppConfig::from_env()?;

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config.bind_addr);
    println!("  STATIC_DIR={}", config.static_dir.display());
    println!("  INDEX_FILE={}", config.index_file.display());
    println!("  UPLOAD_DIR={}", config.upload_dir.display());
    println!("  CATALOG_BACKEND={:?}", config.backend);

    if !config.index_file.is_file() {
        eprintln!("  Warning: index document {} is missing; GET / will 404.", config.index_file.display());
    }

    // Upload directory
    if !config.upload_dir.is_dir() {
        if create_upload_dir {
            std::fs::create_dir_all(&config.upload_dir)?;
            println!("  Created upload directory.");
        } else {
            return Err(anyhow::anyhow!(
                "Upload directory {} does not exist. Re-run with --create-upload-dir",
                config.upload_dir.display()
            ));
        }
    }
    UploadStore::new(&config.upload_dir, config.upload_timeout)?;
    println!("  Upload directory is present.");

    // Backend connectivity
    let store = open_store(&config).await?;
    store.ping().await?;
    let count = store.list().await?.len();
    match config.backend {
        StoreBackend::Memory => println!("  In-memory store ready ({} seeded items).", count),
        StoreBackend::Postgres => println!("  Postgres reachable; houses collection holds {} items.", count),
    }

    println!("> Preflight OK.");
    Ok(())
}
