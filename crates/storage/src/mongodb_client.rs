use async_trait::async_trait;
use derive_more::Display;
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::FindOptions,
    Client, Collection, Database,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{DBError, DBProvider};

#[derive(Debug, Display, Clone)]
#[display(
    "MongoDBClient {{ client: {:?}, db_name: {}, collection_name: {} }}",
    client,
    db_name,
    collection_name
)]
pub struct MongoDBClient {
    pub client: Client,
    db_name: String,
    collection_name: String,
}

impl MongoDBClient {
    pub async fn new(
        mongodb_uri: &str,
        db_name: String,
        collection_name: String,
    ) -> Result<Self, DBError> {
        let client = mongodb::Client::with_uri_str(mongodb_uri).await?;
        Ok(Self { client, db_name, collection_name })
    }

    pub fn get_database(&self) -> Database {
        self.client.database(&self.db_name)
    }

    pub fn get_collection(&self) -> Collection<Document> {
        self.get_database().collection(&self.collection_name)
    }

    /// Round trip to the server, fails if it cannot be reached
    pub async fn ping(&self) -> Result<(), DBError> {
        self.get_database().run_command(doc! { "ping": 1 }, None).await?;
        debug!("Ping to database {} succeeded", self.db_name);
        Ok(())
    }

    /// Create the collection unless it already exists
    pub async fn ensure_collection(&self) -> Result<(), DBError> {
        let db = self.get_database();
        let existing = db.list_collection_names(doc! { "name": &self.collection_name }).await?;
        if existing.iter().any(|name| name == &self.collection_name) {
            debug!("Collection {}.{} already exists", self.db_name, self.collection_name);
            return Ok(());
        }

        db.create_collection(&self.collection_name, None).await?;
        info!("Created collection {}.{}", self.db_name, self.collection_name);
        Ok(())
    }

    /// Drops the whole database, not only the collection
    pub async fn drop_database(&self) -> Result<(), DBError> {
        self.get_database().drop(None).await?;
        info!("Dropped database {}", self.db_name);
        Ok(())
    }
}

pub fn to_document<T: Serialize>(item: &T) -> Result<Document, DBError> {
    let type_name = std::any::type_name::<T>();
    match bson::to_bson(item).map_err(|source| DBError::Encode { type_name, source })? {
        Bson::Document(doc) => Ok(doc),
        _ => Err(DBError::NotADocument(type_name)),
    }
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, DBError> {
    bson::from_document(doc)
        .map_err(|source| DBError::Decode { type_name: std::any::type_name::<T>(), source })
}

#[async_trait]
impl DBProvider for MongoDBClient {
    type Error = DBError;

    async fn create(&self, item: &Document) -> Result<Bson, DBError> {
        let collection = self.get_collection();
        let result = collection.insert_one(item.clone(), None).await?;
        Ok(result.inserted_id)
    }

    async fn read(&self, query: &Document) -> Result<Option<Document>, DBError> {
        let collection = self.get_collection();
        let result = collection.find_one(query.clone(), None).await?;
        Ok(result)
    }

    async fn read_many(
        &self,
        query: &Document,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, DBError> {
        let collection = self.get_collection();
        let options = FindOptions::builder().limit(limit).build();
        let cursor = collection.find(query.clone(), options).await?;
        let documents = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn delete(&self, query: &Document) -> Result<u64, DBError> {
        let collection = self.get_collection();
        let result = collection.delete_one(query.clone(), None).await?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, oid::ObjectId};
    use serde::{Deserialize, Serialize};
    use serial_test::serial;
    use uuid::Uuid;

    use crate::mongodb_client::{from_document, to_document, MongoDBClient};
    use crate::{DBError, DBProvider};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct TestUser {
        user_id: String,
        name: String,
    }

    // Global test configuration constants
    const DB_URI: &str = "mongodb://localhost:27017";
    const COLLECTION_NAME: &str = "test_collection";

    // Every test works on its own database so a failed run leaves nothing behind for the next
    async fn setup_db_provider() -> Result<MongoDBClient, DBError> {
        let db_name = format!("test_db_{}", Uuid::new_v4().simple());
        let db_provider =
            MongoDBClient::new(DB_URI, db_name, COLLECTION_NAME.to_string()).await?;
        db_provider.ensure_collection().await?;
        Ok(db_provider)
    }

    #[test]
    fn test_document_conversion() -> Result<(), DBError> {
        let user = TestUser { user_id: "42".to_string(), name: "Alice".to_string() };

        let document = to_document(&user)?;
        assert_eq!(document, doc! { "user_id": "42", "name": "Alice" });

        let read_user: TestUser = from_document(document)?;
        assert_eq!(read_user, user);
        Ok(())
    }

    #[test]
    fn test_non_document_value_is_rejected() {
        let result = to_document(&"just a string");
        assert!(matches!(result, Err(DBError::NotADocument(type_name)) if type_name == "&str"));
    }

    #[test]
    fn test_from_document_reports_missing_fields() {
        let result: Result<TestUser, DBError> = from_document(doc! { "user_id": "42" });
        match result {
            Err(DBError::Decode { type_name, source }) => {
                assert!(type_name.ends_with("TestUser"));
                assert!(source.to_string().contains("name"));
            }
            other => panic!("expected a decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a MongoDB instance on localhost:27017"]
    async fn test_ping_and_ensure_collection_twice() -> Result<(), DBError> {
        let db_provider = setup_db_provider().await?;

        db_provider.ping().await?;
        // Already created by setup, a second call must not fail
        db_provider.ensure_collection().await?;

        db_provider.drop_database().await
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a MongoDB instance on localhost:27017"]
    async fn test_create_and_read() -> Result<(), DBError> {
        let db_provider = setup_db_provider().await?;

        let user_id = Uuid::new_v4().to_string();
        let user = TestUser { user_id: user_id.clone(), name: "Alice".to_string() };

        // Test create
        let inserted_id = db_provider.create(&to_document(&user)?).await?;
        assert!(inserted_id.as_object_id().is_some());

        // Test read
        let query = doc! { "user_id": &user.user_id };
        let result = db_provider.read(&query).await?;
        let read_user: TestUser = from_document(result.unwrap())?;
        assert_eq!(read_user, user);

        db_provider.drop_database().await
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a MongoDB instance on localhost:27017"]
    async fn test_read_many_honours_limit() -> Result<(), DBError> {
        let db_provider = setup_db_provider().await?;

        for name in ["Alice", "Bob", "Carol"] {
            let user = TestUser { user_id: Uuid::new_v4().to_string(), name: name.to_string() };
            db_provider.create(&to_document(&user)?).await?;
        }

        let all = db_provider.read_many(&doc! {}, None).await?;
        assert_eq!(all.len(), 3);

        let limited = db_provider.read_many(&doc! {}, Some(2)).await?;
        assert_eq!(limited.len(), 2);

        let none = db_provider.read_many(&doc! { "name": "Dave" }, None).await?;
        assert!(none.is_empty());

        db_provider.drop_database().await
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a MongoDB instance on localhost:27017"]
    async fn test_delete() -> Result<(), DBError> {
        let db_provider = setup_db_provider().await?;

        let user_id = Uuid::new_v4().to_string();
        let user = TestUser { user_id: user_id.clone(), name: "Alice".to_string() };

        // Test create
        let inserted_id = db_provider.create(&to_document(&user)?).await?;

        // Test delete
        let query = doc! { "_id": inserted_id };
        assert_eq!(db_provider.delete(&query).await?, 1);

        // Test read after delete
        let result = db_provider.read(&query).await?;
        assert_eq!(result, None);

        // Deleting a missing document is not an error
        let missing = doc! { "_id": ObjectId::new() };
        assert_eq!(db_provider.delete(&missing).await?, 0);

        db_provider.drop_database().await
    }
}
