mod store;

#[cfg(test)]
pub mod memory;

pub use store::{Store, StoreError, StoreResult};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;

use crate::models::{Availability, Company, Consultant, ConsultantApplication, User};

pub const USERS: &str = "users";
pub const CONSULTANTS: &str = "consultants";
pub const COMPANIES: &str = "companies";
pub const APPLICATIONS: &str = "consultant_applications";

const DEFAULT_DB_NAME: &str = "consultant_marketplace";

const DUPLICATE_KEY: i32 = 11000;
const DOCUMENT_VALIDATION_FAILED: i32 = 121;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        // Database name comes from the URI path, e.g. mongodb://host/marketplace
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;
        log::info!("📊 Using database: {}", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the unique email index on users plus lookup/sort indexes.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<Document>(USERS);
        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(unique_email).await {
            Ok(_) => log::info!("   ✅ Index created: users(email) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create unique users(email) index: {}", e),
        }

        for name in [CONSULTANTS, COMPANIES, APPLICATIONS] {
            let collection = self.collection::<Document>(name);
            let indexes = vec![
                IndexModel::builder().keys(doc! { "email": 1 }).build(),
                IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            ];

            match collection.create_indexes(indexes).await {
                Ok(_) => log::info!("   ✅ Index created: {}(email), {}(createdAt)", name, name),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    async fn list_newest_first<T>(&self, name: &str) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync + Unpin,
    {
        self.collection::<T>(name)
            .find(doc! {})
            // _id breaks ties between documents stored in the same millisecond
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)
    }

    async fn find_one_by<T>(&self, name: &str, filter: Document) -> StoreResult<Option<T>>
    where
        T: DeserializeOwned + Send + Sync + Unpin,
    {
        self.collection::<T>(name)
            .find_one(filter)
            .await
            .map_err(map_mongo_error)
    }

    /// Inserts `value` and returns the generated id.
    async fn insert<T>(&self, name: &str, value: &T) -> StoreResult<ObjectId>
    where
        T: Serialize + Send + Sync,
    {
        let result = self
            .collection::<T>(name)
            .insert_one(value)
            .await
            .map_err(map_mongo_error)?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend("Inserted document has no ObjectId".to_string()))
    }
}

/// Maps driver errors onto the store's three error kinds.
fn map_mongo_error(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY => {
            StoreError::Duplicate("A record with this email already exists".to_string())
        }
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DOCUMENT_VALIDATION_FAILED => {
            StoreError::Validation(we.message.clone())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

/// `$set` / `$setOnInsert` pair for a consultant upsert. Nulls and empty
/// arrays are left out of `$set` so they never clobber stored values, and an
/// unset availability is only written when the profile is created.
fn consultant_upsert_update(
    profile: &Consultant,
    availability: Option<Availability>,
) -> StoreResult<Document> {
    let full = mongodb::bson::to_document(profile)
        .map_err(|e| StoreError::Backend(format!("Failed to encode consultant: {}", e)))?;

    let mut set: Document = full
        .into_iter()
        .filter(|(key, value)| {
            key != "_id"
                && key != "createdAt"
                && key != "availability"
                && !matches!(value, Bson::Null)
                && !matches!(value, Bson::Array(items) if items.is_empty())
        })
        .collect();

    let mut on_insert = doc! { "createdAt": profile.created_at };
    match availability {
        Some(value) => set.insert("availability", value.as_str()),
        None => on_insert.insert("availability", Availability::default().as_str()),
    };

    Ok(doc! {
        "$set": set,
        "$setOnInsert": on_insert,
    })
}

#[async_trait]
impl Store for MongoDB {
    async fn ping(&self) -> StoreResult<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(map_mongo_error)
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<User> {
        user.id = Some(self.insert(USERS, &user).await?);
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.find_one_by(USERS, doc! { "email": email }).await
    }

    async fn list_consultants(&self) -> StoreResult<Vec<Consultant>> {
        self.list_newest_first(CONSULTANTS).await
    }

    async fn insert_consultant(&self, mut consultant: Consultant) -> StoreResult<Consultant> {
        consultant.id = Some(self.insert(CONSULTANTS, &consultant).await?);
        Ok(consultant)
    }

    async fn find_consultant_by_id(&self, id: &ObjectId) -> StoreResult<Option<Consultant>> {
        self.find_one_by(CONSULTANTS, doc! { "_id": *id }).await
    }

    async fn find_consultant_by_email(&self, email: &str) -> StoreResult<Option<Consultant>> {
        self.find_one_by(CONSULTANTS, doc! { "email": email }).await
    }

    async fn upsert_consultant_by_email(
        &self,
        profile: Consultant,
        availability: Option<Availability>,
    ) -> StoreResult<Consultant> {
        let update = consultant_upsert_update(&profile, availability)?;

        self.collection::<Consultant>(CONSULTANTS)
            .find_one_and_update(doc! { "email": &profile.email }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?
            .ok_or_else(|| StoreError::Backend("Upsert returned no consultant".to_string()))
    }

    async fn list_companies(&self) -> StoreResult<Vec<Company>> {
        self.list_newest_first(COMPANIES).await
    }

    async fn insert_company(&self, mut company: Company) -> StoreResult<Company> {
        company.id = Some(self.insert(COMPANIES, &company).await?);
        Ok(company)
    }

    async fn find_company_by_email(&self, email: &str) -> StoreResult<Option<Company>> {
        self.find_one_by(COMPANIES, doc! { "email": email }).await
    }

    async fn list_applications(&self) -> StoreResult<Vec<ConsultantApplication>> {
        self.list_newest_first(APPLICATIONS).await
    }

    async fn insert_application(
        &self,
        mut application: ConsultantApplication,
    ) -> StoreResult<ConsultantApplication> {
        application.id = Some(self.insert(APPLICATIONS, &application).await?);
        Ok(application)
    }

    async fn find_application_by_id(
        &self,
        id: &ObjectId,
    ) -> StoreResult<Option<ConsultantApplication>> {
        self.find_one_by(APPLICATIONS, doc! { "_id": *id }).await
    }
}
