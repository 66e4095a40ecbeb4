mod cli;

use lightbnb::{config, Store};
use lightbnb_common::{money::cents_to_dollars, PropertyId, ReservationId, UserId};
use lightbnb_db::models::{
    NewProperty, NewReservation, NewReview, NewUser, PropertyListing, ReservationListing,
};
use lightbnb_db::search::PropertySearch;
use lightbnb_db::seed::Fixtures;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, StoreCommand};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "lightbnb=trace,lightbnb_db=debug,lightbnb_common=debug".to_string()
        } else {
            "lightbnb=info,lightbnb_db=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("lightbnb {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Store(command) => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_command(command, config))
        }
    }
}

async fn run_command(command: StoreCommand, config: config::Config) -> Result<()> {
    // The pool lives for the whole command and is dropped on return
    let store = Store::open(&config.database)?;
    let default_limit = config.search.default_limit;

    match command {
        StoreCommand::Migrate => {
            println!("Database ready at {}", config.database.resolved_path());
        }
        StoreCommand::Seed { users, properties } => {
            let users_json = std::fs::read_to_string(&users)
                .with_context(|| format!("Failed to read users fixture: {:?}", users))?;
            let properties_json = std::fs::read_to_string(&properties)
                .with_context(|| format!("Failed to read properties fixture: {:?}", properties))?;
            let fixtures = Fixtures::from_json(&users_json, &properties_json)?;
            let report = store.seed(fixtures).await?;
            println!(
                "Seeded {} users and {} properties",
                report.users, report.properties
            );
        }
        StoreCommand::User { email, id } => {
            let user = match (email, id) {
                (Some(email), _) => store.get_user_with_email(&email).await?,
                (None, Some(id)) => store.get_user_with_id(UserId::new(id)).await?,
                (None, None) => anyhow::bail!("Pass --email or --id"),
            };
            match user {
                Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
                None => println!("No matching user"),
            }
        }
        StoreCommand::AddUser {
            name,
            email,
            password,
        } => {
            let user = store
                .add_user(NewUser {
                    name,
                    email,
                    password,
                })
                .await?;
            println!("Created user {} <{}> with id {}", user.name, user.email, user.id);
        }
        StoreCommand::Reservations {
            guest_id,
            limit,
            json,
        } => {
            let listings = store
                .get_all_reservations(UserId::new(guest_id), limit.unwrap_or(default_limit))
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listings)?);
            } else {
                print_reservations(&listings);
            }
        }
        StoreCommand::Properties {
            city,
            owner_id,
            min_price,
            max_price,
            min_rating,
            limit,
            json,
        } => {
            let search = PropertySearch {
                city,
                owner_id: owner_id.map(UserId::new),
                minimum_price_per_night: min_price,
                maximum_price_per_night: max_price,
                minimum_rating: min_rating,
            };
            if min_price.is_some() != max_price.is_some() {
                tracing::warn!("Price filter needs both --min-price and --max-price; ignoring it");
            }
            let listings = store
                .get_all_properties(search, limit.unwrap_or(default_limit))
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listings)?);
            } else {
                print_properties(&listings);
            }
        }
        StoreCommand::AddProperty { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read property file: {:?}", file))?;
            let property: NewProperty = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse property file: {:?}", file))?;
            let property = store.add_property(property).await?;
            println!("{}", serde_json::to_string_pretty(&property)?);
        }
        StoreCommand::AddReservation {
            guest_id,
            property_id,
            start_date,
            end_date,
        } => {
            let reservation = store
                .add_reservation(NewReservation {
                    guest_id: UserId::new(guest_id),
                    property_id: PropertyId::new(property_id),
                    start_date,
                    end_date,
                })
                .await?;
            println!(
                "Created reservation {} for property {} ({} to {})",
                reservation.id, reservation.property_id, reservation.start_date, reservation.end_date
            );
        }
        StoreCommand::AddReview {
            guest_id,
            property_id,
            reservation_id,
            rating,
            message,
        } => {
            let review = store
                .add_review(NewReview {
                    guest_id: UserId::new(guest_id),
                    property_id: PropertyId::new(property_id),
                    reservation_id: ReservationId::new(reservation_id),
                    rating,
                    message,
                })
                .await?;
            println!(
                "Created review {} for property {} with rating {}",
                review.id, review.property_id, review.rating
            );
        }
    }

    Ok(())
}

fn print_properties(listings: &[PropertyListing]) {
    if listings.is_empty() {
        println!("No matching properties");
        return;
    }

    for listing in listings {
        let p = &listing.property;
        println!(
            "[{}] {} - {}, {} - ${:.2}/night - rating {:.2}",
            p.id,
            p.title,
            p.city,
            p.province,
            cents_to_dollars(p.cost_per_night),
            listing.average_rating
        );
    }
}

fn print_reservations(listings: &[ReservationListing]) {
    if listings.is_empty() {
        println!("No past reservations");
        return;
    }

    for listing in listings {
        println!(
            "[{}] {} ({}) {} to {} - rating {:.2}",
            listing.reservation.id,
            listing.property.title,
            listing.property.city,
            listing.reservation.start_date,
            listing.reservation.end_date,
            listing.average_rating
        );
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Database: {}", config.database.resolved_path());
            println!("  Pool size: {}", config.database.pool_max_size);
            println!("  Default limit: {}", config.search.default_limit);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Database: {}", config.database.path);
        }
    }

    Ok(())
}
