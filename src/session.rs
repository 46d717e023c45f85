//! Per-request user context.
//!
//! The auth provider signs users in and stores a JSON claim set as the
//! identity of the shared identity cookie. [`AuthenticatedUser`] extracts and
//! checks those claims; [`SessionContext`] adds the user's profile flags and
//! is handed explicitly to the services that need it.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::profile::Profile;
use crate::domain::types::{DisplayName, UserId};
use crate::repository::ProfileReader;
use crate::services::{ServiceError, ServiceResult};

/// Claims stored in the identity cookie by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry as a unix timestamp in seconds.
    pub exp: i64,
}

/// A signed-in user whose session has not expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: Option<String>,
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Validates decoded claims against the current time.
    pub fn from_claims(claims: Claims, now: i64) -> Result<Self, ServiceError> {
        if claims.exp <= now {
            return Err(ServiceError::Unauthorized);
        }
        let user_id = UserId::new(claims.sub).map_err(|_| ServiceError::Unauthorized)?;
        Ok(Self {
            user_id,
            email: claims.email,
            expires_at: claims.exp,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let unauthorized = || actix_web::error::ErrorUnauthorized("unauthorized");

        let identity = match req.get_identity() {
            Ok(identity) => identity,
            Err(_) => return ready(Err(unauthorized())),
        };

        let claims = match identity.id() {
            Ok(raw) => match serde_json::from_str::<Claims>(&raw) {
                Ok(claims) => claims,
                Err(e) => {
                    log::warn!("Malformed identity claims: {e}");
                    return ready(Err(unauthorized()));
                }
            },
            Err(_) => return ready(Err(unauthorized())),
        };

        ready(
            AuthenticatedUser::from_claims(claims, Utc::now().timestamp())
                .map_err(|_| unauthorized()),
        )
    }
}

/// Everything services need to know about the current user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: UserId,
    pub email: Option<String>,
    pub display_name: Option<DisplayName>,
    pub is_admin: bool,
    pub expires_at: i64,
}

impl SessionContext {
    /// Joins the authenticated user with their profile. Users without a
    /// profile row are plain, non-admin users.
    pub fn load<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Self>
    where
        R: ProfileReader,
    {
        let profile = repo.get_profile(&user.user_id).map_err(|e| {
            log::error!("Failed to load profile for {}: {e}", user.user_id);
            ServiceError::Internal
        })?;

        Ok(Self::new(user, profile))
    }

    pub fn new(user: &AuthenticatedUser, profile: Option<Profile>) -> Self {
        let (display_name, is_admin) = match profile {
            Some(profile) => (profile.display_name, profile.is_admin),
            None => (None, false),
        };
        Self {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            display_name,
            is_admin,
            expires_at: user.expires_at,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    pub fn require_admin(&self) -> ServiceResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(ServiceError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::{TestRepository, sample_profile};

    fn claims(sub: &str, exp: i64) -> Claims {
        Claims {
            sub: sub.into(),
            email: Some("user@example.com".into()),
            exp,
        }
    }

    #[test]
    fn expired_claims_are_rejected() {
        assert_eq!(
            AuthenticatedUser::from_claims(claims("u1", 100), 100).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert!(AuthenticatedUser::from_claims(claims("u1", 101), 100).is_ok());
    }

    #[test]
    fn blank_subject_is_rejected() {
        assert!(AuthenticatedUser::from_claims(claims("  ", 200), 100).is_err());
    }

    #[test]
    fn claims_parse_without_email() {
        let parsed: Claims = serde_json::from_str(r#"{"sub":"abc","exp":10}"#).unwrap();
        assert_eq!(parsed.email, None);
    }

    #[test]
    fn context_reflects_profile() {
        let user = AuthenticatedUser::from_claims(claims("admin", 200), 100).unwrap();
        let repo = TestRepository::new().with_profiles(vec![sample_profile("admin", true)]);

        let context = SessionContext::load(&user, &repo).unwrap();

        assert!(context.is_admin);
        assert!(context.require_admin().is_ok());
        assert!(!context.is_expired(100));
        assert!(context.is_expired(200));
    }

    #[test]
    fn missing_profile_is_not_admin() {
        let user = AuthenticatedUser::from_claims(claims("u1", 200), 100).unwrap();
        let repo = TestRepository::new();

        let context = SessionContext::load(&user, &repo).unwrap();

        assert_eq!(context.require_admin().unwrap_err(), ServiceError::Forbidden);
    }

    #[test]
    fn profile_failure_is_internal() {
        let user = AuthenticatedUser::from_claims(claims("u1", 200), 100).unwrap();
        let repo = TestRepository::new().failing();

        assert_eq!(
            SessionContext::load(&user, &repo).unwrap_err(),
            ServiceError::Internal
        );
    }
}
