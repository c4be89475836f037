use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId};

use storage::{from_document, to_document, DBError, DBProvider};

use crate::types::{Trainer, TrainerKey};
use crate::{RepositoryError, TrainerRepositoryTrait};

/// Trainer Repository
///
/// Maps trainers to and from documents of a single collection. The repository
/// holds nothing but the provider handle; every read returns a fresh copy.
#[derive(Debug)]
pub struct TrainerRepository<P> {
    db_provider: Arc<P>,
    find_all_limit: NonZeroU32,
}

impl<P> Clone for TrainerRepository<P> {
    fn clone(&self) -> Self {
        Self { db_provider: Arc::clone(&self.db_provider), find_all_limit: self.find_all_limit }
    }
}

impl<P> TrainerRepository<P>
where
    P: DBProvider<Error = DBError> + Send + Sync,
{
    /// Create a new TrainerRepository whose `find_all` returns at most `find_all_limit` trainers
    pub fn new(db_provider: P, find_all_limit: NonZeroU32) -> Self {
        Self { db_provider: Arc::new(db_provider), find_all_limit }
    }
}

#[async_trait]
impl<P> TrainerRepositoryTrait for TrainerRepository<P>
where
    P: DBProvider<Error = DBError> + Send + Sync,
{
    async fn save(&self, trainer: &Trainer) -> Result<ObjectId, RepositoryError> {
        let mut trainer_doc = to_document(trainer)?;
        trainer_doc.remove("_id");

        let inserted_id = self.db_provider.create(&trainer_doc).await?;
        let id = inserted_id
            .as_object_id()
            .ok_or_else(|| RepositoryError::UnexpectedId(inserted_id.to_string()))?;

        info!("Inserted trainer: {} with id {}", trainer.name, id);
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Trainer>, RepositoryError> {
        let limit = i64::from(self.find_all_limit.get());
        let documents = self.db_provider.read_many(&doc! {}, Some(limit)).await?;
        debug!("Fetched {} trainer documents", documents.len());

        documents
            .into_iter()
            .map(|trainer_doc| from_document(trainer_doc).map_err(RepositoryError::from))
            .collect()
    }

    async fn find_by_key(&self, key: &TrainerKey) -> Result<Option<Trainer>, RepositoryError> {
        debug!("Finding trainer by {}", key);
        let trainer_doc = self.db_provider.read(&key.to_query()).await?;

        match trainer_doc {
            Some(trainer_doc) => Ok(Some(from_document(trainer_doc)?)),
            None => Ok(None),
        }
    }

    async fn delete_by_key(&self, key: &TrainerKey) -> Result<u64, RepositoryError> {
        let deleted = self.db_provider.delete(&key.to_query()).await?;
        info!("Deleted {} trainer(s) by {}", deleted, key);
        Ok(deleted)
    }
}
