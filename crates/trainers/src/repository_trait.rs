use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::types::{Trainer, TrainerKey};
use crate::RepositoryError;

#[async_trait]
pub trait TrainerRepositoryTrait: Send + Sync {
    /// Store a trainer and return the id it was given. An `id` already set on
    /// the trainer is ignored.
    async fn save(&self, trainer: &Trainer) -> Result<ObjectId, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Trainer>, RepositoryError>;

    /// First trainer matching `key`, `None` if there is none
    async fn find_by_key(&self, key: &TrainerKey) -> Result<Option<Trainer>, RepositoryError>;

    /// Removes at most one trainer and returns how many were removed
    async fn delete_by_key(&self, key: &TrainerKey) -> Result<u64, RepositoryError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Trainer>, RepositoryError> {
        self.find_by_key(&TrainerKey::Id(*id)).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Trainer>, RepositoryError> {
        self.find_by_key(&TrainerKey::Name(name.to_string())).await
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<u64, RepositoryError> {
        self.delete_by_key(&TrainerKey::Id(*id)).await
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, RepositoryError> {
        self.delete_by_key(&TrainerKey::Name(name.to_string())).await
    }
}
