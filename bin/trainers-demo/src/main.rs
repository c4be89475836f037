use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};
use thiserror::Error;

use config::{Config, ConfigError};
use storage::{DBError, MongoDBClient};
use trainers::{RepositoryError, Trainer, TrainerRepository, TrainerRepositoryTrait};

#[derive(Parser, Debug)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// MongoDB connection string, overrides the one in the config file
    #[arg(long, env = "MONGO_URL")]
    mongo_url: Option<String>,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("Database setup failed: {0}")]
    Setup(#[from] DBError),

    #[error("Trainer operation failed: {0}")]
    Repository(#[from] RepositoryError),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    if let Err(e) = simple_logger::SimpleLogger::new().env().init() {
        eprintln!("Failed to initialise logger: {}", e);
        return ExitCode::FAILURE;
    }

    let args = Args::parse();
    debug!("Args: {:?}", args);

    let (config, db_provider) = match setup(&args).await {
        Ok(setup) => setup,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let repository =
        TrainerRepository::new(db_provider.clone(), config.database.find_all_limit);
    let outcome = run_demo(&repository).await;

    // Teardown runs whether or not the script got through
    let mut exit_code = ExitCode::SUCCESS;
    if let Err(e) = outcome {
        error!("{}", e);
        exit_code = ExitCode::FAILURE;
    }

    if config.demo.drop_database_on_exit {
        if let Err(e) = db_provider.drop_database().await {
            error!("Failed to drop database {}: {}", config.database.name, e);
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

async fn setup(args: &Args) -> Result<(Config, MongoDBClient), DemoError> {
    let mut config = Config::from_file(&args.config)?;
    if let Some(mongo_url) = args.mongo_url.clone() {
        config = config.with_mongo_url(mongo_url)?;
    }

    info!("Connecting to {}", config.infra.mongo_url);
    let db_provider = MongoDBClient::new(
        &config.infra.mongo_url,
        config.database.name.clone(),
        config.database.collection.clone(),
    )
    .await?;

    db_provider.ping().await?;
    db_provider.ensure_collection().await?;

    Ok((config, db_provider))
}

async fn run_demo<R: TrainerRepositoryTrait>(repository: &R) -> Result<(), DemoError> {
    info!("Starting trainers demo");

    repository.save(&Trainer::new("Marcus", 25, "Nuporanga-SP")).await?;
    let leticia_id =
        repository.save(&Trainer::new("Leticia Presoto", 25, "Orlandia-SP")).await?;
    repository.save(&Trainer::new("Magali", 2, "Uberlandia-SP")).await?;
    repository.save(&Trainer::new("Cacau", 1, "Uberlandia-SP")).await?;

    log_all(repository).await?;

    match repository.find_by_name("Marcus").await? {
        Some(trainer) => info!("Found by name: {}", trainer),
        None => info!("No trainer named Marcus"),
    }

    match repository.find_by_key(&leticia_id.into()).await? {
        Some(trainer) => info!("Found by id: {}", trainer),
        None => info!("No trainer with id {}", leticia_id),
    }

    let deleted = repository.delete_by_name("Marcus").await?;
    info!("Deleted {} trainer(s) named Marcus", deleted);

    log_all(repository).await?;

    info!("Trainers demo completed");
    Ok(())
}

async fn log_all<R: TrainerRepositoryTrait>(repository: &R) -> Result<(), DemoError> {
    let trainers = repository.find_all().await?;
    info!("{} trainer(s) stored", trainers.len());
    for trainer in trainers.iter() {
        info!("{}", trainer);
    }
    Ok(())
}
