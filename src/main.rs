use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use equitracker::api::YahooClient;
use equitracker::database::CompanyStore;
use equitracker::lookup::LookupService;
use equitracker::models::{Config, HistoryPeriod};
use equitracker::seed::import_companies;
use equitracker::ui::{self, components::create_ascii_chart};

#[derive(Parser, Debug)]
#[command(name = "equitracker", author, version)]
#[command(about = "Look up NSE-listed companies, their live price and a quick read of their fundamentals")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive search screen (default)
    Tui,
    /// List companies whose name or symbol contains QUERY
    Search { query: String },
    /// Refresh the price of SYMBOL and print its details, chart and insights
    Show {
        symbol: String,
        /// History range: 5d, 1mo, 3mo, 6mo or 1y
        #[arg(short, long)]
        period: Option<String>,
    },
    /// Create the company table if it does not exist
    Init,
    /// Upsert companies from a CSV file
    Import { path: PathBuf },
}

fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // Keep the terminal screen clean while the TUI owns it
    match command {
        Commands::Tui => init_logging("equitracker=error"),
        _ => init_logging("equitracker=info"),
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("❌ Configuration Error: {}", e);
            std::process::exit(1);
        }
    };

    match command {
        Commands::Tui => {
            ui::run_app(&config).await?;
            println!("Thanks for using EquiTracker!");
        }
        Commands::Search { query } => search(&config, &query).await?,
        Commands::Show { symbol, period } => {
            let period = match period {
                Some(p) => p.parse()?,
                None => config.history_period,
            };
            show(&config, &symbol, period).await?;
        }
        Commands::Init => {
            let store = CompanyStore::new(config.store_config());
            store.init_schema().await?;
            info!("Schema ready at {}", config.database_path.display());
        }
        Commands::Import { path } => {
            let file = File::open(&path).with_context(|| format!("Cannot open {}", path.display()))?;
            let store = CompanyStore::new(config.store_config());
            store.init_schema().await?;
            let imported = import_companies(&store, file).await?;
            let total = store.count_companies().await?;
            println!("✅ Imported {} companies ({} in the table)", imported, total);
        }
    }

    Ok(())
}

async fn search(config: &Config, query: &str) -> Result<()> {
    let store = CompanyStore::new(config.store_config());
    let matches = store.search_companies(query).await?;

    if matches.is_empty() {
        println!("No companies match '{}'", query);
    }
    for company in matches {
        println!("{}", company);
    }
    Ok(())
}

async fn show(config: &Config, symbol: &str, period: HistoryPeriod) -> Result<()> {
    let store = CompanyStore::new(config.store_config());
    let provider = YahooClient::new(config)?;
    let service = LookupService::new(store, provider, period);

    let Some(view) = service.lookup(symbol).await? else {
        println!("{} was not found", symbol);
        return Ok(());
    };

    if let Some(price_error) = &view.price_error {
        eprintln!("⚠️  {}", price_error);
    }

    for line in view.detail_lines() {
        println!("{}", line);
    }

    println!();
    println!("{} Price History ({})", view.company.name, period.label());
    if view.has_chart() {
        for row in create_ascii_chart(&view.history, 60, 10) {
            println!("  {}", row);
        }
    } else {
        println!("  No chart available");
    }

    println!();
    println!("Insights:");
    if view.insights.is_empty() {
        println!("  No insights available");
    }
    for insight in &view.insights {
        println!("  • {}", insight.message);
    }

    Ok(())
}
