use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lightbnb")]
#[command(author, version, about = "LightBnB property rental store")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Store(StoreCommand),

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Commands that open the database.
#[derive(Subcommand)]
pub enum StoreCommand {
    /// Create the database and apply pending migrations
    Migrate,

    /// Load users and properties from JSON fixture files
    Seed {
        /// Users fixture (object keyed by user id)
        #[arg(long)]
        users: PathBuf,

        /// Properties fixture (object keyed by property id)
        #[arg(long)]
        properties: PathBuf,
    },

    /// Look up a user by email or id
    User {
        /// Email address (exact match)
        #[arg(long, conflicts_with = "id", required_unless_present = "id")]
        email: Option<String>,

        /// User id
        #[arg(long)]
        id: Option<i64>,
    },

    /// Register a user
    AddUser {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Password hash to store
        #[arg(long)]
        password: String,
    },

    /// List a guest's past reservations
    Reservations {
        /// Guest user id
        #[arg(long)]
        guest_id: i64,

        /// Maximum rows (defaults to search.default_limit)
        #[arg(long)]
        limit: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search properties, cheapest first
    Properties {
        /// City substring
        #[arg(long)]
        city: Option<String>,

        /// Owner user id
        #[arg(long)]
        owner_id: Option<i64>,

        /// Minimum nightly price in dollars (needs --max-price)
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum nightly price in dollars (needs --min-price)
        #[arg(long)]
        max_price: Option<f64>,

        /// Minimum average rating
        #[arg(long)]
        min_rating: Option<f64>,

        /// Maximum rows (defaults to search.default_limit)
        #[arg(long)]
        limit: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a property from a JSON file
    AddProperty {
        /// JSON object with the property columns (cost_per_night in cents)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Book a stay for a guest
    AddReservation {
        #[arg(long)]
        guest_id: i64,

        #[arg(long)]
        property_id: i64,

        /// First night (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,

        /// Checkout day (YYYY-MM-DD)
        #[arg(long)]
        end_date: NaiveDate,
    },

    /// Review a property for a completed reservation
    AddReview {
        #[arg(long)]
        guest_id: i64,

        #[arg(long)]
        property_id: i64,

        #[arg(long)]
        reservation_id: i64,

        /// Rating from 1 to 5
        #[arg(long)]
        rating: i64,

        #[arg(long)]
        message: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_properties_filters() {
        let cli = Cli::try_parse_from([
            "lightbnb",
            "properties",
            "--city",
            "Vancouver",
            "--min-rating",
            "4",
            "--limit",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Store(StoreCommand::Properties {
                city,
                min_rating,
                limit,
                owner_id,
                ..
            }) => {
                assert_eq!(city.as_deref(), Some("Vancouver"));
                assert_eq!(min_rating, Some(4.0));
                assert_eq!(limit, Some(5));
                assert_eq!(owner_id, None);
            }
            _ => panic!("expected properties command"),
        }
    }

    #[test]
    fn test_user_requires_email_or_id() {
        assert!(Cli::try_parse_from(["lightbnb", "user"]).is_err());
        assert!(Cli::try_parse_from(["lightbnb", "user", "--id", "3"]).is_ok());
        assert!(
            Cli::try_parse_from(["lightbnb", "user", "--id", "3", "--email", "a@b.c"]).is_err()
        );
    }

    #[test]
    fn test_parse_add_reservation_dates() {
        let cli = Cli::try_parse_from([
            "lightbnb",
            "add-reservation",
            "--guest-id",
            "1",
            "--property-id",
            "3",
            "--start-date",
            "2018-09-11",
            "--end-date",
            "2018-09-26",
        ])
        .unwrap();

        match cli.command {
            Commands::Store(StoreCommand::AddReservation {
                start_date,
                end_date,
                ..
            }) => {
                assert_eq!(start_date, NaiveDate::from_ymd_opt(2018, 9, 11).unwrap());
                assert_eq!(end_date, NaiveDate::from_ymd_opt(2018, 9, 26).unwrap());
            }
            _ => panic!("expected add-reservation command"),
        }

        assert!(Cli::try_parse_from([
            "lightbnb",
            "add-reservation",
            "--guest-id",
            "1",
            "--property-id",
            "3",
            "--start-date",
            "11/09/2018",
            "--end-date",
            "2018-09-26",
        ])
        .is_err());
    }

    #[test]
    fn test_standalone_commands_parse() {
        let cli = Cli::try_parse_from(["lightbnb", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));

        let cli = Cli::try_parse_from(["lightbnb", "migrate"]).unwrap();
        assert!(matches!(cli.command, Commands::Store(StoreCommand::Migrate)));
    }
}
