use asn_cidr_feeds::build_feeds;
use asn_cidr_feeds::config::Config;
use asn_cidr_feeds::output::log_summary;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let config = Config::from_env().expect("Error reading configuration");
    let summaries = build_feeds(&config).await?;
    log_summary(&summaries);

    log::info!("#End main() feeds written to {}", config.output_dir.display());
    Ok(())
}
