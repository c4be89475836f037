use derive_more::Display;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::RepositoryError;

// Trainer DB Model
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Display)]
#[display("Trainer {{ id: {:?}, name: {}, age: {}, city: {} }}", id, name, age, city)]
pub struct Trainer {
    // Assigned by the store on insert, never written back
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub age: u32,
    pub city: String,
}

impl Trainer {
    pub fn new(name: impl Into<String>, age: u32, city: impl Into<String>) -> Self {
        Self { id: None, name: name.into(), age, city: city.into() }
    }
}

/// How a single trainer is looked up
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TrainerKey {
    #[display("id {}", _0)]
    Id(ObjectId),
    #[display("name {}", _0)]
    Name(String),
}

impl TrainerKey {
    /// Build an id key from the 24 character hex form of an ObjectId
    pub fn parse_id(id: &str) -> Result<Self, RepositoryError> {
        ObjectId::parse_str(id)
            .map(TrainerKey::Id)
            .map_err(|_| RepositoryError::InvalidId(id.to_string()))
    }

    pub fn to_query(&self) -> Document {
        match self {
            TrainerKey::Id(id) => doc! { "_id": *id },
            TrainerKey::Name(name) => doc! { "name": name.as_str() },
        }
    }
}

impl From<ObjectId> for TrainerKey {
    fn from(id: ObjectId) -> Self {
        TrainerKey::Id(id)
    }
}
