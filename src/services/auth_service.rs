use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::database::Store;
use crate::models::{
    AuthResponse, Company, Consultant, LoginRequest, Role, SafeUser, SignupRequest, User,
};
use crate::utils::validation::{normalize_email, optional, required, required_email};
use crate::utils::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id (hex ObjectId)
    pub email: String,
    pub role: Role,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
    pub aud: String, // audience
    pub iss: String, // issuer
}

/// Issues and verifies session tokens and owns the bcrypt work factor.
pub struct Authenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
    bcrypt_cost: u32,
    /// Checked against when the login email is unknown, so both failures cost
    /// one bcrypt verification.
    dummy_hash: String,
}

impl Authenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            ttl: Duration::hours(config.jwt_ttl_hours),
            bcrypt_cost: config.bcrypt_cost,
            dummy_hash: bcrypt::hash(Uuid::new_v4().to_string(), config.bcrypt_cost)
                .unwrap_or_default(),
        }
    }

    // Generate JWT token
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    // Verify JWT token
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.as_str()]);

        let mut issuers = HashSet::new();
        issuers.insert(self.issuer.clone());
        validation.iss = Some(issuers);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AppError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))
    }
}

/// Creates the account, then best-effort creates the matching role profile.
pub async fn signup(
    store: &dyn Store,
    auth: &Authenticator,
    request: SignupRequest,
) -> Result<AuthResponse, AppError> {
    let full_name = required(request.full_name.as_deref(), "fullName")?;
    let email = required_email(request.email.as_deref())?;
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::bad_request("password is required"))?;

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let role = match optional(request.role) {
        Some(raw) => raw.parse::<Role>().map_err(AppError::BadRequest)?,
        None => Role::User,
    };

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let now = BsonDateTime::now();
    let user = User {
        id: None,
        role,
        full_name,
        email,
        password_hash: auth.hash_password(password).await?,
        created_at: now,
        updated_at: now,
    };

    // A concurrent signup that slipped past the lookup hits the unique index
    let user = store.insert_user(user).await?;

    if let Err(e) = create_role_profile(store, &user, optional(request.company_name)).await {
        log::warn!(
            "⚠️  {} profile for {} not created: {}",
            user.role,
            user.email,
            e
        );
    }

    let token = auth.issue(&user)?;

    Ok(AuthResponse {
        success: true,
        token,
        user: SafeUser::from(user),
    })
}

/// Consultant and company accounts get a profile document linked by email.
/// An existing profile (e.g. from an earlier application) is left untouched.
async fn create_role_profile(
    store: &dyn Store,
    user: &User,
    company_name: Option<String>,
) -> Result<(), AppError> {
    match user.role {
        Role::User => {}
        Role::Consultant => {
            if store.find_consultant_by_email(&user.email).await?.is_none() {
                let profile = Consultant::stub(user.full_name.clone(), user.email.clone());
                store.insert_consultant(profile).await?;
                log::info!("👤 Consultant profile created for {}", user.email);
            }
        }
        Role::Company => {
            if store.find_company_by_email(&user.email).await?.is_none() {
                let now = BsonDateTime::now();
                let company = Company {
                    id: None,
                    name: company_name.unwrap_or_else(|| user.full_name.clone()),
                    email: Some(user.email.clone()),
                    industry: None,
                    size: None,
                    website: None,
                    description: None,
                    location: None,
                    created_at: now,
                    updated_at: now,
                };
                store.insert_company(company).await?;
                log::info!("🏢 Company profile created for {}", user.email);
            }
        }
    }
    Ok(())
}

// User login
pub async fn login(
    store: &dyn Store,
    auth: &Authenticator,
    request: LoginRequest,
) -> Result<AuthResponse, AppError> {
    let email = normalize_email(&required(request.email.as_deref(), "email")?);
    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::bad_request("password is required"))?;

    let Some(user) = store.find_user_by_email(&email).await? else {
        let _ = auth.verify_password(password, auth.dummy_hash.clone()).await;
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !auth.verify_password(password, user.password_hash.clone()).await? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = auth.issue(&user)?;

    Ok(AuthResponse {
        success: true,
        token,
        user: SafeUser::from(user),
    })
}

/// Current user behind a verified token.
pub async fn current_user(store: &dyn Store, claims: &Claims) -> Result<User, AppError> {
    store
        .find_user_by_email(&claims.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

#[cfg(test)]
pub(crate) fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        jwt_issuer: "consultant-marketplace".to_string(),
        jwt_audience: "consultant-marketplace-web".to_string(),
        jwt_ttl_hours: 1,
        bcrypt_cost: 4,
    }
}
