use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::{Availability, Company, Consultant, ConsultantApplication, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique index violation (only `users.email` carries one)
    #[error("{0}")]
    Duplicate(String),

    /// Document rejected by the store's schema validation
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Document-store operations used by the services.
///
/// Every call is a single independent operation; there are no transactions.
/// List operations return documents newest first (`createdAt` descending).
/// Emails passed in are expected to be normalised already.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    // users
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // consultants
    async fn list_consultants(&self) -> StoreResult<Vec<Consultant>>;
    async fn insert_consultant(&self, consultant: Consultant) -> StoreResult<Consultant>;
    async fn find_consultant_by_id(&self, id: &ObjectId) -> StoreResult<Option<Consultant>>;
    async fn find_consultant_by_email(&self, email: &str) -> StoreResult<Option<Consultant>>;

    /// Inserts the profile, or updates the consultant with the same email.
    /// Unset optional fields and empty skill lists leave stored values alone;
    /// `createdAt` is only written on insert. `availability` overrides the
    /// stored value only when set; new profiles fall back to `available`.
    async fn upsert_consultant_by_email(
        &self,
        profile: Consultant,
        availability: Option<Availability>,
    ) -> StoreResult<Consultant>;

    // companies
    async fn list_companies(&self) -> StoreResult<Vec<Company>>;
    async fn insert_company(&self, company: Company) -> StoreResult<Company>;
    async fn find_company_by_email(&self, email: &str) -> StoreResult<Option<Company>>;

    // consultant applications
    async fn list_applications(&self) -> StoreResult<Vec<ConsultantApplication>>;
    async fn insert_application(
        &self,
        application: ConsultantApplication,
    ) -> StoreResult<ConsultantApplication>;
    async fn find_application_by_id(
        &self,
        id: &ObjectId,
    ) -> StoreResult<Option<ConsultantApplication>>;
}
