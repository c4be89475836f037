use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

/// Document level access to a single collection
#[async_trait]
pub trait DBProvider {
    type Error;

    /// Insert one document and return the id the store assigned to it
    async fn create(&self, item: &Document) -> Result<Bson, Self::Error>;

    async fn read(&self, query: &Document) -> Result<Option<Document>, Self::Error>;

    /// All documents matching `query` in store order, at most `limit` of them
    async fn read_many(
        &self,
        query: &Document,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, Self::Error>;

    /// Delete at most one matching document, returning how many were removed
    async fn delete(&self, query: &Document) -> Result<u64, Self::Error>;
}
