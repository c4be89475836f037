pub use db_provider::DBProvider;
pub use errors::DBError;
pub use mongodb_client::{from_document, to_document, MongoDBClient};

pub mod db_provider;
pub mod errors;
pub mod mongodb_client;
