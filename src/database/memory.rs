//! In-process `Store` used by the HTTP tests. Mirrors the MongoDB semantics
//! the services rely on: unique user email, newest-first lists, upsert by
//! email that leaves unset fields alone.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::RwLock;

use super::{Store, StoreError, StoreResult};
use crate::models::{Availability, Company, Consultant, ConsultantApplication, User};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    consultants: RwLock<Vec<Consultant>>,
    companies: RwLock<Vec<Company>>,
    applications: RwLock<Vec<ConsultantApplication>>,
    /// When set, every consultant/company write fails with a backend error
    pub fail_profile_writes: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }

    pub fn consultant_count(&self) -> usize {
        self.consultants.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn company_count(&self) -> usize {
        self.companies.read().map(|c| c.len()).unwrap_or(0)
    }

    fn check_profile_writes(&self) -> StoreResult<()> {
        if self
            .fail_profile_writes
            .load(std::sync::atomic::Ordering::SeqCst)
        {
            return Err(StoreError::Backend("profile writes disabled".to_string()));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

/// Newest first; among equal timestamps the later insert wins.
fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> i64) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

fn merge_consultant(
    existing: &mut Consultant,
    update: Consultant,
    availability: Option<Availability>,
) {
    fn keep<T>(slot: &mut Option<T>, value: Option<T>) {
        if value.is_some() {
            *slot = value;
        }
    }
    fn keep_value<T>(slot: &mut T, value: Option<T>) {
        if let Some(value) = value {
            *slot = value;
        }
    }

    existing.full_name = update.full_name;
    keep_value(&mut existing.availability, availability);
    if !update.skills.is_empty() {
        existing.skills = update.skills;
    }
    keep(&mut existing.phone, update.phone);
    keep(&mut existing.location, update.location);
    keep(&mut existing.title, update.title);
    keep(&mut existing.bio, update.bio);
    keep(&mut existing.experience_years, update.experience_years);
    keep(&mut existing.hourly_rate, update.hourly_rate);
    keep(&mut existing.id_document_url, update.id_document_url);
    keep(&mut existing.certificate_url, update.certificate_url);
    keep(&mut existing.profile_image_url, update.profile_image_url);
    keep(&mut existing.linkedin_url, update.linkedin_url);
    keep(&mut existing.portfolio_url, update.portfolio_url);
    existing.updated_at = update.updated_at;
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_user(&self, mut user: User) -> StoreResult<User> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(
                "A record with this email already exists".to_string(),
            ));
        }
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_consultants(&self) -> StoreResult<Vec<Consultant>> {
        let consultants = self.consultants.read().map_err(poisoned)?;
        Ok(newest_first(&consultants, |c| c.created_at.timestamp_millis()))
    }

    async fn insert_consultant(&self, mut consultant: Consultant) -> StoreResult<Consultant> {
        self.check_profile_writes()?;
        consultant.id = Some(ObjectId::new());
        self.consultants
            .write()
            .map_err(poisoned)?
            .push(consultant.clone());
        Ok(consultant)
    }

    async fn find_consultant_by_id(&self, id: &ObjectId) -> StoreResult<Option<Consultant>> {
        let consultants = self.consultants.read().map_err(poisoned)?;
        Ok(consultants.iter().find(|c| c.id.as_ref() == Some(id)).cloned())
    }

    async fn find_consultant_by_email(&self, email: &str) -> StoreResult<Option<Consultant>> {
        let consultants = self.consultants.read().map_err(poisoned)?;
        Ok(consultants.iter().find(|c| c.email == email).cloned())
    }

    async fn upsert_consultant_by_email(
        &self,
        mut profile: Consultant,
        availability: Option<Availability>,
    ) -> StoreResult<Consultant> {
        self.check_profile_writes()?;
        let mut consultants = self.consultants.write().map_err(poisoned)?;
        if let Some(existing) = consultants.iter_mut().find(|c| c.email == profile.email) {
            merge_consultant(existing, profile, availability);
            return Ok(existing.clone());
        }
        profile.id = Some(ObjectId::new());
        profile.availability = availability.unwrap_or_default();
        consultants.push(profile.clone());
        Ok(profile)
    }

    async fn list_companies(&self) -> StoreResult<Vec<Company>> {
        let companies = self.companies.read().map_err(poisoned)?;
        Ok(newest_first(&companies, |c| c.created_at.timestamp_millis()))
    }

    async fn insert_company(&self, mut company: Company) -> StoreResult<Company> {
        self.check_profile_writes()?;
        company.id = Some(ObjectId::new());
        self.companies.write().map_err(poisoned)?.push(company.clone());
        Ok(company)
    }

    async fn find_company_by_email(&self, email: &str) -> StoreResult<Option<Company>> {
        let companies = self.companies.read().map_err(poisoned)?;
        Ok(companies
            .iter()
            .find(|c| c.email.as_deref() == Some(email))
            .cloned())
    }

    async fn list_applications(&self) -> StoreResult<Vec<ConsultantApplication>> {
        let applications = self.applications.read().map_err(poisoned)?;
        Ok(newest_first(&applications, |a| a.created_at.timestamp_millis()))
    }

    async fn insert_application(
        &self,
        mut application: ConsultantApplication,
    ) -> StoreResult<ConsultantApplication> {
        application.id = Some(ObjectId::new());
        self.applications
            .write()
            .map_err(poisoned)?
            .push(application.clone());
        Ok(application)
    }

    async fn find_application_by_id(
        &self,
        id: &ObjectId,
    ) -> StoreResult<Option<ConsultantApplication>> {
        let applications = self.applications.read().map_err(poisoned)?;
        Ok(applications
            .iter()
            .find(|a| a.id.as_ref() == Some(id))
            .cloned())
    }
}
