use anyhow::{Context, bail};
use catalog_manager::catalog_client::ProductStore;
use catalog_manager::shared::DraftForm;
use catalog_manager::{CatalogEvent, Config, ProductCard, ProductManager, Route, SortKey, logger};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Manage the product catalog")]
struct Cli {
    /// Store base URL (overrides CATALOG_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// REST resource name (overrides CATALOG_RESOURCE)
    #[arg(long, global = true)]
    resource: Option<String>,

    /// Request timeout in seconds (overrides CATALOG_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log filter (overrides CATALOG_LOG_LEVEL and RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the product grid
    List {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
        /// none | price-asc | price-desc | name-asc | name-desc
        #[arg(long, default_value = "none")]
        sort: SortKey,
    },
    /// Add a product
    Add(FormArgs),
    /// Edit a product; omitted fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        fields: FormArgs,
    },
    /// Delete a product
    Delete { id: String },
    /// Show which view a path resolves to
    Route { path: String },
}

#[derive(Args, Debug)]
struct FormArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<String>,
    /// Electronics | Clothing | Grocery | Accessories | Other
    #[arg(long)]
    category: Option<String>,
    /// 5 | 10 | 15 | 25
    #[arg(long)]
    discount: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

impl FormArgs {
    fn apply(self, form: &mut DraftForm) {
        let fields = [
            (self.name, &mut form.name),
            (self.price, &mut form.price),
            (self.category, &mut form.category),
            (self.discount, &mut form.discount),
            (self.image, &mut form.image),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(resource) = &self.resource {
            config.resource = resource.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = Some(timeout);
        }
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
    }
}

/// Print toasts for everything emitted so far; true if any remote call failed
fn drain_notifications(events: &mut broadcast::Receiver<CatalogEvent>) -> bool {
    let mut failed = false;
    while let Ok(event) = events.try_recv() {
        failed |= event.is_failure();
        if let Some(notification) = event.notification() {
            println!("{}", notification);
        }
    }
    failed
}

fn print_form_mode(manager: &ProductManager) {
    let mode = manager.form_mode();
    println!("{} ({})", mode.heading(), mode.submit_label());
}

fn print_grid(manager: &ProductManager) {
    let view = manager.view();
    let filter = manager.filter();
    println!(
        "-- {} of {} products (search: {:?}, sort: {}) --",
        view.len(),
        manager.products().len(),
        filter.search,
        filter.sort
    );
    for product in view.iter() {
        println!("{}", ProductCard::from(product));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    let _log_guard = logger::init_logger(config.log_level.as_deref(), config.log_dir.as_deref())?;

    if let Command::Route { path } = &cli.command {
        let route = Route::resolve(path);
        println!("{} -> {}", path, route.title());
        return Ok(());
    }

    let store = config
        .client_config()
        .build_store()
        .context("Failed to build HTTP client")?;
    tracing::info!(endpoint = %store.endpoint(), "Catalog starting");

    let store: Arc<dyn ProductStore> = Arc::new(store);
    let manager = ProductManager::new(store);
    let mut events = manager.subscribe();
    manager.load_all().await;
    let mut failed = drain_notifications(&mut events);

    match cli.command {
        Command::List { search, sort } => {
            manager.set_search(search);
            manager.set_sort(sort);
        }
        Command::Add(fields) => {
            print_form_mode(&manager);
            manager.update_form(|form| fields.apply(form));
            manager.submit_form().await?;
        }
        Command::Edit { id, fields } => {
            if !manager.begin_edit(&id) {
                bail!("No product with id {}", id);
            }
            print_form_mode(&manager);
            manager.update_form(|form| fields.apply(form));
            manager.submit_form().await?;
        }
        Command::Delete { id } => {
            manager.remove(&id).await;
        }
        Command::Route { .. } => {}
    }
    failed |= drain_notifications(&mut events);

    print_grid(&manager);
    manager.dispose();
    if failed {
        bail!("Catalog store request failed");
    }
    Ok(())
}
