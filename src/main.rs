use clap::{Parser, Subcommand};
use estate_listings::{PriceBucket, Property, PropertyApi, PropertyBrowser, PropertySource};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate-listings")]
#[command(about = "Browse property listings from the listings API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List properties, optionally filtered
    List {
        /// Case-insensitive part of the location, e.g. "new york"
        #[arg(short, long)]
        location: Option<String>,

        /// Property type (apartment, house, villa, condo, townhouse) or "all"
        #[arg(short = 't', long = "type", default_value = "all")]
        property_type: String,

        /// Price range preset: all, low, medium or high
        #[arg(short, long, default_value = "all")]
        price: PriceBucket,

        /// Print the matching listings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single property by id
    Show {
        id: String,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let api = PropertyApi::new()?;
    info!("🏠 Listings from {}", api.resource_url());

    match cli.command {
        Commands::List {
            location,
            property_type,
            price,
            json,
        } => {
            let mut browser = PropertyBrowser::new();
            if let Some(location) = location {
                browser.set_location(location);
            }
            browser.set_type(property_type);
            browser.select_price_bucket(price);

            browser.load(&api).await;
            info!("{}", browser.summary());

            if json {
                println!("{}", serde_json::to_string_pretty(browser.visible())?);
            } else {
                for (i, property) in browser.visible().iter().enumerate() {
                    print_property(i + 1, property);
                }
            }
        }
        Commands::Show { id, json } => match api.fetch_one(&id).await {
            Some(property) if json => println!("{}", serde_json::to_string_pretty(&property)?),
            Some(property) => print_property(1, &property),
            None => anyhow::bail!("No property with id {id}"),
        },
    }

    Ok(())
}

fn print_property(index: usize, property: &Property) {
    println!(
        "{}. {} ({})",
        index,
        property.display_title(),
        property.formatted_price()
    );
    println!("   {} · {}", property.display_location(), property.display_type());
    println!(
        "   {} bd, {} ba, {} sqft",
        property.bedrooms, property.bathrooms, property.area
    );
    println!("   ID: {}", property.id);
    println!("   {}", property.display_description());
    println!("   Image: {}", property.display_image());
    println!();
}
