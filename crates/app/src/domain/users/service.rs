//! Users service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::Caller,
    database::{Db, DeletedRows},
    domain::{
        ServiceError,
        users::{
            data::UserData,
            records::{UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
    pagination::{ListParameters, Page},
    permissions::{Permission, PermissionChecker, ensure_permitted},
};

#[derive(Clone)]
pub struct PgUsersService {
    db: Db,
    permissions: Arc<dyn PermissionChecker>,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db, permissions: Arc<dyn PermissionChecker>) -> Self {
        Self {
            db,
            permissions,
            repository: PgUsersRepository::new(),
        }
    }

    pub async fn find_user(
        &self,
        caller: &Caller,
        user: UserUuid,
        deleted: DeletedRows,
    ) -> Result<UserRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanReadUsers).await?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.get_user(&mut tx, user, deleted).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, caller: &Caller, user: UserUuid) -> Result<UserRecord, ServiceError> {
        self.find_user(caller, user, DeletedRows::Exclude).await
    }

    async fn list_users(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<UserRecord>, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanReadUsers).await?;

        let mut tx = self.db.begin().await?;

        let page = self.repository.list_users(&mut tx, &params).await?;

        tx.commit().await?;

        Ok(page)
    }

    async fn add_user(&self, caller: &Caller, data: UserData) -> Result<UserRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanAddUsers).await?;

        data.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_user(&mut tx, UserUuid::new(), &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_user(
        &self,
        caller: &Caller,
        user: UserUuid,
        data: UserData,
    ) -> Result<UserRecord, ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanUpdateUsers).await?;

        data.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_user(&mut tx, user, &data, &caller.subject)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_user(&self, caller: &Caller, user: UserUuid) -> Result<(), ServiceError> {
        ensure_permitted(self.permissions.as_ref(), caller, Permission::CanDeleteUsers).await?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_user(&mut tx, user, &caller.subject)
            .await?;

        if rows_affected == 0 {
            return Err(ServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    async fn get_user(&self, caller: &Caller, user: UserUuid) -> Result<UserRecord, ServiceError>;

    async fn list_users(
        &self,
        caller: &Caller,
        params: ListParameters,
    ) -> Result<Page<UserRecord>, ServiceError>;

    /// Register a user. Live users must have distinct identifiers.
    async fn add_user(&self, caller: &Caller, data: UserData) -> Result<UserRecord, ServiceError>;

    async fn update_user(
        &self,
        caller: &Caller,
        user: UserUuid,
        data: UserData,
    ) -> Result<UserRecord, ServiceError>;

    async fn delete_user(&self, caller: &Caller, user: UserUuid) -> Result<(), ServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::email::{Email, InvalidEmail},
        test::{
            TestContext,
            helpers::{denying_checker, unreachable_db},
        },
    };

    use super::*;

    fn ada() -> Result<UserData, InvalidEmail> {
        Ok(UserData {
            identifier: "idp|ada".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            username: Some("ada".to_string()),
            email: Some(Email::parse("ada@example.com")?),
        })
    }

    #[tokio::test]
    async fn add_then_get_returns_the_same_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let data = ada()?;

        let created = ctx.users.add_user(&ctx.admin, data.clone()).await?;
        let fetched = ctx.users.get_user(&ctx.admin, created.uuid).await?;

        assert_eq!(fetched.identifier, data.identifier);
        assert_eq!(fetched.first_name, data.first_name);
        assert_eq!(fetched.last_name, data.last_name);
        assert_eq!(fetched.username, data.username);
        assert_eq!(fetched.email, data.email);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_identifier_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.add_user(&ctx.admin, ada()?).await?;

        let result = ctx.users.add_user(&ctx.admin, ada()?).await;

        assert!(
            matches!(result, Err(ServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn identifier_can_be_reused_after_delete() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.users.add_user(&ctx.admin, ada()?).await?;

        ctx.users.delete_user(&ctx.admin, first.uuid).await?;

        let second = ctx.users.add_user(&ctx.admin, ada()?).await?;

        assert_ne!(first.uuid, second.uuid);

        let deleted = ctx
            .users
            .find_user(&ctx.admin, first.uuid, DeletedRows::Include)
            .await?;

        assert!(deleted.is_deleted());

        Ok(())
    }

    #[tokio::test]
    async fn update_user_clears_omitted_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let created = ctx.users.add_user(&ctx.admin, ada()?).await?;

        let update = UserData {
            identifier: "idp|ada".to_string(),
            username: Some("countess".to_string()),
            ..UserData::default()
        };

        let updated = ctx
            .users
            .update_user(&ctx.admin, created.uuid, update)
            .await?;

        assert_eq!(updated.username.as_deref(), Some("countess"));
        assert_eq!(updated.first_name, None);
        assert_eq!(updated.email, None);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_user_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.users.update_user(&ctx.admin, UserUuid::new(), ada()?).await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_user_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.delete_user(&ctx.admin, UserUuid::new()).await;

        assert!(
            matches!(result, Err(ServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_users_matches_email_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users.add_user(&ctx.admin, ada()?).await?;
        ctx.users
            .add_user(
                &ctx.admin,
                UserData {
                    identifier: "idp|grace".to_string(),
                    email: Some(Email::parse("grace@navy.example.org")?),
                    ..UserData::default()
                },
            )
            .await?;

        let page = ctx
            .users
            .list_users(
                &ctx.admin,
                ListParameters {
                    filters: Some("email@=*EXAMPLE.COM".to_string()),
                    ..ListParameters::default()
                },
            )
            .await?;

        assert_eq!(page.total_count, 1);
        assert_eq!(
            page.items.first().map(|u| u.identifier.as_str()),
            Some("idp|ada")
        );

        Ok(())
    }

    #[tokio::test]
    async fn forbidden_callers_never_reach_the_store() {
        let service = PgUsersService::new(
            unreachable_db(),
            denying_checker(Permission::CanAddUsers),
        );

        let result = service
            .add_user(&Caller::new("intruder", []), UserData::default())
            .await;

        assert!(
            matches!(result, Err(ServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }
}
