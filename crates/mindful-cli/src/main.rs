mod lookup;

use clap::{Parser, Subcommand};
use mindful_core::{Region, Store};
use mindful_scraper::PriceService;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mindful-cli")]
#[command(about = "Mindful Shopper price lookup command line interface")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a product's price on one store
    Price {
        /// Store name, e.g. Rozetka or "Google Shopping"
        #[arg(long)]
        store: String,
        /// Product search term
        #[arg(long)]
        product: String,
        #[arg(long, default_value = "ukraine")]
        region: Region,
    },
    /// Build the comparison list for a product
    Compare {
        /// Product search term
        #[arg(long)]
        product: String,
        #[arg(long, default_value = "ukraine")]
        region: Region,
        /// Store the shopper is already on; left out of the list
        #[arg(long)]
        exclude_store: Option<Store>,
    },
    /// Show the region and store detected for a host
    Detect {
        /// Page host, e.g. rozetka.com.ua
        #[arg(long)]
        host: String,
        /// Browser UI language, e.g. uk-UA
        #[arg(long, default_value = "")]
        language: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mindful_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("mindful-cli ready; run with --help for commands");
        return Ok(());
    };

    match command {
        Commands::Price {
            store,
            product,
            region,
        } => {
            let service = PriceService::from_app_config(&config)?;
            lookup::run_price(&service, &store, &product, region, cli.json).await?;
        }
        Commands::Compare {
            product,
            region,
            exclude_store,
        } => {
            let service = PriceService::from_app_config(&config)?;
            lookup::run_compare(&service, &product, region, exclude_store, cli.json).await?;
        }
        Commands::Detect { host, language } => {
            lookup::run_detect(&host, &language, cli.json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
