use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{format_datetime, hex_id};

/// Account kind. Every role-dependent branch in the service matches on this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Consultant,
    Company,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Consultant => "consultant",
            Role::Company => "company",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "consultant" => Ok(Role::Consultant),
            "company" => Ok(Role::Company),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// User account (stored in the `users` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub role: Role,
    pub full_name: String,
    /// Unique, lower-cased and trimmed
    pub email: String,
    pub password_hash: String,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

/// A user as returned to clients: never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafeUser {
    pub id: String,
    pub role: Role,
    pub full_name: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for SafeUser {
    fn from(user: User) -> Self {
        Self {
            id: hex_id(&user.id),
            role: user.role,
            full_name: user.full_name,
            email: user.email,
            created_at: format_datetime(user.created_at),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `user` (default), `consultant` or `company`
    pub role: Option<String>,
    /// Company name for `company` sign-ups; defaults to the full name
    pub company_name: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: SafeUser,
}
