use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "plaza")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Terminal browser for community directory datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the dataset fixtures
    #[arg(long, global = true, default_value = "data")]
    pub data: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Dataset {
    Members,
    Attractions,
    Rides,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Grid,
    List,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a dataset with optional filters
    #[command(alias = "ls")]
    List {
        #[arg(value_enum)]
        dataset: Dataset,

        /// Presentation mode
        #[arg(long, value_enum, default_value = "grid")]
        view: ViewArg,

        /// Category: membership tier or ride difficulty ("all" for none)
        #[arg(long)]
        category: Option<String>,

        /// Distance bucket: all, short, medium, long
        #[arg(long)]
        distance: Option<String>,

        /// Date window: all, this-week, this-month, upcoming
        #[arg(long = "when")]
        when: Option<String>,

        /// Free-text search over names, descriptions, and tags
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one record in full
    #[command(alias = "v")]
    Show {
        #[arg(value_enum)]
        dataset: Dataset,

        /// Record id (e.g. m-001, ride-003)
        id: String,
    },

    /// Browse a dataset interactively
    #[command(alias = "b")]
    Browse {
        #[arg(value_enum)]
        dataset: Dataset,
    },

    /// Ride statistics and availability
    Stats,

    /// Register for a ride
    Join {
        /// Ride id (e.g. ride-003)
        ride_id: String,

        /// Your full name
        #[arg(long)]
        name: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// Agree to follow safety guidelines
        #[arg(long)]
        agree: bool,
    },

    /// List saved registrations
    #[command(alias = "regs")]
    Registrations {
        /// Cancel the registration with this id
        #[arg(long)]
        cancel: Option<String>,
    },

    /// Get or set preferences
    Config {
        /// Preference key (e.g. theme, max-distance)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Export preferences and registrations as a backup archive
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}
