use serde::Serialize;

use crate::database::Store;
use crate::models::{Availability, CompanyResponse, ConsultantResponse, Role, SafeUser};
use crate::services::auth_service::{self, Claims};
use crate::utils::AppError;

const FEATURED_LIMIT: usize = 6;

/// Role-specific landing data, resolved server-side from the authenticated
/// account; the client never picks its own dashboard.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    User {
        user: SafeUser,
        #[serde(rename = "featuredConsultants")]
        featured_consultants: Vec<ConsultantResponse>,
    },
    Consultant {
        user: SafeUser,
        profile: Option<ConsultantResponse>,
    },
    Company {
        user: SafeUser,
        profile: Option<CompanyResponse>,
    },
}

pub async fn load(store: &dyn Store, claims: &Claims) -> Result<Dashboard, AppError> {
    let user = auth_service::current_user(store, claims).await?;

    // Stored role wins over the one baked into an older token
    let dashboard = match user.role {
        Role::User => {
            let featured_consultants = store
                .list_consultants()
                .await?
                .into_iter()
                .filter(|c| c.availability == Availability::Available)
                .take(FEATURED_LIMIT)
                .map(ConsultantResponse::from)
                .collect();
            Dashboard::User {
                user: user.into(),
                featured_consultants,
            }
        }
        Role::Consultant => {
            let profile = store.find_consultant_by_email(&user.email).await?;
            Dashboard::Consultant {
                user: user.into(),
                profile: profile.map(ConsultantResponse::from),
            }
        }
        Role::Company => {
            let profile = store.find_company_by_email(&user.email).await?;
            Dashboard::Company {
                user: user.into(),
                profile: profile.map(CompanyResponse::from),
            }
        }
    };

    Ok(dashboard)
}
