use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use listing_scout::models::NotificationFrequency;
use listing_scout::mortgage::MortgageBreakdown;
use listing_scout::reviews::{ReviewClient, ReviewPayload, SyncStatus};
use listing_scout::search::{HttpSearchBackend, SearchBackend, SimulatedBackend};
use listing_scout::storage::{JsonFileStore, KeyValueStore, SavedSearchRepository};
use listing_scout::{
    FilterUpdate, SavedSearchDraft, SavedSearchUpdate, ScoutConfig, WorkflowContext,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "listing-scout",
    about = "Search listings, manage saved searches and submit reviews from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply filters and run a search
    Search(SearchArgs),
    /// Manage saved searches
    Saved {
        #[command(subcommand)]
        command: SavedCommand,
    },
    /// Estimate a monthly mortgage payment
    Mortgage(MortgageArgs),
    /// Submit a client review
    Review(ReviewArgs),
    /// Resend reviews that could not be published earlier
    FlushReviews,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[command(flatten)]
    filters: FilterArgs,
    /// Save the search under this name once it completes
    #[arg(long)]
    save: Option<String>,
    #[arg(long, default_value = "daily")]
    frequency: NotificationFrequency,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    min_price: Option<u64>,
    #[arg(long)]
    max_price: Option<u64>,
    /// Bedroom selector, e.g. "3" or "3+"
    #[arg(long)]
    bedrooms: Option<String>,
    #[arg(long)]
    bathrooms: Option<String>,
    #[arg(long)]
    property_type: Option<String>,
    /// Repeat for each amenity
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    /// Repeat for each feature
    #[arg(long = "feature")]
    features: Vec<String>,
    #[arg(long)]
    open_house: bool,
}

#[derive(Args, Debug)]
struct SaveArgs {
    name: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, default_value = "daily")]
    frequency: NotificationFrequency,
    #[command(flatten)]
    filters: FilterArgs,
}

#[derive(Subcommand, Debug)]
enum SavedCommand {
    /// List saved searches, newest first
    List,
    /// Save the given filters without running a search
    Save(SaveArgs),
    /// Delete a saved search
    Delete { id: String },
    /// Stop notifications for a saved search
    Pause { id: String },
    /// Resume notifications for a saved search
    Resume { id: String },
}

#[derive(Args, Debug)]
struct MortgageArgs {
    #[arg(long)]
    price: f64,
    #[arg(long, default_value_t = 0.0)]
    down_payment: f64,
    /// Annual interest rate in percent
    #[arg(long)]
    rate: f64,
    #[arg(long, default_value_t = 30)]
    years: u32,
}

#[derive(Args, Debug)]
struct ReviewArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long)]
    rating: u8,
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long)]
    comment: String,
    #[arg(long)]
    property_id: Option<String>,
}

impl FilterArgs {
    fn filter_update(&self) -> FilterUpdate {
        FilterUpdate {
            location: self.location.clone(),
            price_min: self.min_price,
            price_max: self.max_price,
            bedrooms: self.bedrooms.clone(),
            bathrooms: self.bathrooms.clone(),
            property_type: self.property_type.clone(),
            amenities: (!self.amenities.is_empty()).then(|| self.amenities.clone()),
            features: (!self.features.is_empty()).then(|| self.features.clone()),
            open_house: self.open_house.then_some(true),
            ..Default::default()
        }
    }
}

pub async fn run(config: ScoutConfig) -> Result<()> {
    let cli = Cli::parse();
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.storage_path));

    match cli.command {
        Command::Search(args) => run_search(&config, store, args).await,
        Command::Saved { command } => run_saved(&config, store, command).await,
        Command::Mortgage(args) => run_mortgage(args),
        Command::Review(args) => run_review(&config, store, args).await,
        Command::FlushReviews => {
            let client = ReviewClient::new(config.api_base_url.as_deref(), store)?;
            let published = client.flush_pending().await?;
            println!("Published {} pending reviews", published);
            Ok(())
        }
    }
}

async fn workflow(config: &ScoutConfig, store: Arc<dyn KeyValueStore>) -> Result<WorkflowContext> {
    let backend: Arc<dyn SearchBackend> = match &config.api_base_url {
        Some(url) => Arc::new(
            HttpSearchBackend::new(url).context("Failed to create listings API client")?,
        ),
        None => Arc::new(SimulatedBackend::with_delay(config.search_delay)),
    };

    Ok(WorkflowContext::load(backend, SavedSearchRepository::new(store)).await)
}

async fn run_search(config: &ScoutConfig, store: Arc<dyn KeyValueStore>, args: SearchArgs) -> Result<()> {
    let context = workflow(config, store).await?;

    context.update_filters(args.filters.filter_update()).await;
    info!("Searching...");
    context
        .apply_filters()
        .await
        .await
        .context("Search task did not complete")?;

    let state = context.snapshot().await;
    if let Some(err) = &state.last_error {
        println!("Search failed: {}", err);
        return Ok(());
    }

    println!(
        "{} results ({}% complete, step: {})",
        state.total_results,
        state.workflow_progress(),
        state.workflow_step()
    );
    for (i, property) in state.search_results.iter().enumerate() {
        println!("{}. {} (${})", i + 1, property.address, property.price);
        println!("   {} bd, {} ba, {} sqft", property.bedrooms, property.bathrooms, property.sqft);
        if !property.url.is_empty() {
            println!("   URL: {}", property.url);
        }
    }

    if let Some(name) = args.save {
        let saved = context
            .save_search(SavedSearchDraft {
                name: Some(name),
                frequency: Some(args.frequency),
                ..Default::default()
            })
            .await;
        println!("💾 Saved search {} ({})", saved.name, saved.id);
    }

    Ok(())
}

async fn run_saved(config: &ScoutConfig, store: Arc<dyn KeyValueStore>, command: SavedCommand) -> Result<()> {
    let context = workflow(config, store).await?;

    match command {
        SavedCommand::List => {
            let searches = context.saved_searches().await;
            if searches.is_empty() {
                println!("No saved searches");
            }
            for search in searches {
                let status = if search.is_active { "active" } else { "paused" };
                println!("{}  {} [{}]", search.id, search.name, status);
                println!(
                    "   {} results, {} new, notify {}",
                    search.result_count,
                    search.new_results,
                    search.frequency.as_str()
                );
                println!("   {} active criteria", search.filters.active_criteria());
            }
        }
        SavedCommand::Save(args) => {
            context.update_filters(args.filters.filter_update()).await;
            let saved = context
                .save_search(SavedSearchDraft {
                    name: Some(args.name),
                    description: args.description,
                    frequency: Some(args.frequency),
                    ..Default::default()
                })
                .await;
            println!("💾 Saved search {} ({})", saved.name, saved.id);
            println!("   {} active criteria", saved.filters.active_criteria());
        }
        SavedCommand::Delete { id } => {
            if context.delete_saved_search(&id).await {
                println!("Deleted {}", id);
            } else {
                println!("No saved search {}", id);
            }
        }
        SavedCommand::Pause { id } => set_active(&context, &id, false).await,
        SavedCommand::Resume { id } => set_active(&context, &id, true).await,
    }

    Ok(())
}

async fn set_active(context: &WorkflowContext, id: &str, active: bool) {
    let update = SavedSearchUpdate {
        is_active: Some(active),
        notifications_enabled: Some(active),
        ..Default::default()
    };
    if context.update_saved_search(id, update).await {
        println!("Updated {}", id);
    } else {
        println!("No saved search {}", id);
    }
}

fn run_mortgage(args: MortgageArgs) -> Result<()> {
    let breakdown = MortgageBreakdown::calculate(args.price, args.down_payment, args.rate, args.years)?;
    println!("Loan amount:     ${:.2}", breakdown.loan_amount);
    println!("Monthly payment: ${:.2}", breakdown.monthly_payment);
    println!("Total interest:  ${:.2}", breakdown.total_interest);
    println!("Total paid:      ${:.2}", breakdown.total_paid);
    Ok(())
}

async fn run_review(config: &ScoutConfig, store: Arc<dyn KeyValueStore>, args: ReviewArgs) -> Result<()> {
    let client = ReviewClient::new(config.api_base_url.as_deref(), store)?;
    let outcome = client
        .submit(ReviewPayload {
            name: args.name,
            email: args.email,
            rating: args.rating,
            title: args.title,
            comment: args.comment,
            property_id: args.property_id,
        })
        .await?;

    println!("{}", outcome.message);
    if outcome.status == SyncStatus::PendingSync {
        println!("(pending sync, id {})", outcome.review.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_save_takes_filter_flags() {
        let cli = Cli::try_parse_from([
            "listing-scout",
            "saved",
            "save",
            "Family homes",
            "--bedrooms",
            "3+",
            "--amenity",
            "pool",
            "--frequency",
            "weekly",
        ])
        .expect("parses");

        let Command::Saved {
            command: SavedCommand::Save(args),
        } = cli.command
        else {
            panic!("expected saved save");
        };
        assert_eq!(args.name, "Family homes");
        assert_eq!(args.frequency, NotificationFrequency::Weekly);
        let update = args.filters.filter_update();
        assert_eq!(update.bedrooms.as_deref(), Some("3+"));
        assert_eq!(update.amenities, Some(vec!["pool".to_string()]));
        assert_eq!(update.location, None);
    }

    #[test]
    fn search_keeps_its_save_option() {
        let cli = Cli::try_parse_from(["listing-scout", "search", "--location", "Austin", "--save", "Austin"])
            .expect("parses");

        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.save.as_deref(), Some("Austin"));
        assert_eq!(args.filters.filter_update().location.as_deref(), Some("Austin"));
    }
}
