use mongodb::bson;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DBError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Failed to encode {type_name} as BSON: {source}")]
    Encode { type_name: &'static str, source: bson::ser::Error },

    #[error("Failed to decode document into {type_name}: {source}")]
    Decode { type_name: &'static str, source: bson::de::Error },

    // Scalars and sequences encode fine but cannot be stored as a document
    #[error("{0} does not encode to a BSON document")]
    NotADocument(&'static str),
}
