//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    auth::{
        ApiToken, ApiTokenMetadata, AuthServiceError, Caller, IssuedApiToken, NewApiToken,
        repository::PgAuthRepository,
    },
    permissions::Role,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for `subject` acting with `roles`.
    ///
    /// The raw token is only available in the returned value.
    pub async fn issue_api_token(
        &self,
        subject: &str,
        roles: Vec<Role>,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = ApiToken::generate();

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token.uuid,
                version: token.version,
                token_hash: token.verifier_hash(),
                subject: subject.to_string(),
                roles,
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken {
            token: token.expose(),
            metadata,
        })
    }

    /// List tokens, optionally only those issued to `subject`.
    pub async fn list_api_tokens(
        &self,
        subject: Option<&str>,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens(subject).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        Ok(self
            .repository
            .revoke_api_token(token_uuid)
            .await?
            .is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError> {
        let presented = bearer_token.parse::<ApiToken>().map_err(|error| {
            debug!(%error, "rejected malformed bearer token");

            AuthServiceError::NotFound
        })?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(presented.uuid, presented.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != presented.version
            || !presented.matches_verifier(&token.token_hash)
        {
            warn!(token_uuid = %presented.uuid, "bearer token secret mismatch");

            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self
            .repository
            .touch_api_token_last_used(presented.uuid)
            .await
        {
            warn!(%error, "failed to record token use");
        }

        Ok(Caller::new(token.subject, token.roles))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the caller behind a raw bearer token.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError>;
}
