use clap::Parser;
use rusqlite::Connection;
use time::{Date, OffsetDateTime, macros::format_description};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wealth_planner::{initialize_db, run_daily_cycle};

/// The daily batch cycle for wealth_planner.
///
/// Materializes the recurring contributions due today and records a net
/// worth snapshot for every user. Intended to be invoked once per day by a
/// cron job or systemd timer.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// Run the cycle as if today were this date (YYYY-MM-DD). Defaults to
    /// the current UTC date.
    #[arg(long)]
    date: Option<String>,
}

fn main() {
    setup_logging();

    let args = Args::parse();

    let today = match args.date {
        Some(date) => Date::parse(&date, format_description!("[year]-[month]-[day]"))
            .expect("The date must be formatted as YYYY-MM-DD."),
        None => OffsetDateTime::now_utc().date(),
    };

    let connection = Connection::open(&args.db_path).expect("Could not open the database.");
    initialize_db(&connection).expect("Could not initialise the database.");

    let outcome = run_daily_cycle(&connection, today);

    tracing::info!(
        "Daily cycle for {today}: materialized {} contribution(s), snapshotted {} owner(s).",
        outcome.contributions_materialized,
        outcome.owners_snapshotted
    );
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
