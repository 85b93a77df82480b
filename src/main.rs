#[macro_use]
extern crate diesel;

#[macro_use]
extern crate diesel_migrations;

mod config;
mod data;
mod error;
mod metrics;
pub mod database;

use std::error::Error;

use clap::{App, Arg, SubCommand};
use env_logger::Env;
use log::{error, info};

use config::Config;
use data::transxchange::{write_to_database, ObjectKey, Outcome, Pipeline, TransXChange};
use database::mysql::MysqlStore;
use metrics::LogMetrics;

// Embeds migrations from migrations folder
embed_migrations!();

fn main() -> Result<(), Box<dyn Error + 'static>> {

    // Load .env variables, the environment alone is fine too
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let app = App::new("TransXChange uploader")
        .about("Loads TransXChange timetable documents into the reference data database")
        .arg(Arg::with_name("migrate")
            .long("migrate")
            .help("Bring the database schema up-to-date before uploading"))
        .subcommand(SubCommand::with_name("upload")
            .about("Upload a single TransXChange document")
            .arg(Arg::with_name("file").help("Path to the downloaded document").required(true))
            .arg(Arg::with_name("key")
                .long("key")
                .takes_value(true)
                .required(true)
                .help("Object key the document was stored under, e.g. tnds/EA/file.xml"))
            .arg(Arg::with_name("extended")
                .long("extended")
                .help("Also write vehicle journeys, tracks and centre points")))
        .get_matches();

    let config = Config::from_env()?;

    match app.subcommand() {
        ("upload", Some(sub_matches)) => {
            // Both are required arguments
            let file = sub_matches.value_of("file").unwrap_or_default();
            let key: ObjectKey = sub_matches.value_of("key").unwrap_or_default().parse()?;
            let pipeline = if sub_matches.is_present("extended") { Pipeline::Extended } else { Pipeline::Standard };

            info!("Uploading '{}' as {} data", key.file_name, key.data_source);
            let doc = TransXChange::from_file(file).map_err(|err| {
                error!("Could not read TXC file '{}': {}", key.key, err);
                err
            })?;

            let connection = database::wait_for_database(&config)?;
            if app.is_present("migrate") {
                embedded_migrations::run(&connection)?;
            }

            let mut store = MysqlStore::new(connection, config.table_suffix.as_str());
            let mut metrics = LogMetrics::new(config.metrics_namespace.as_str());

            match write_to_database(&doc, &key, pipeline, &mut store, &mut metrics)? {
                Outcome::Committed(summary) => info!("Successfully wrote TXC file '{}' to database: {:?}", key.key, summary),
                Outcome::NothingWritten(anomaly) => info!("No data written for TXC file '{}' ({})", key.key, anomaly),
            }
        }
        _ => {
            if app.is_present("migrate") {
                let connection = database::wait_for_database(&config)?;
                embedded_migrations::run(&connection)?;
                info!("Database schema is up-to-date");
            }
        }
    }

    Ok(())
}
