//! Account store: bank accounts scoped to their owner.
//!
//! Every read, update and delete filters on both the account id and the
//! owner id, so an account owned by someone else behaves exactly like one
//! that does not exist.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use super::constraint::map_unique_violation;
use super::entities::bank_account::{self, ActiveModel, Entity as BankAccountEntity};
use crate::domain::{AccountState, BankAccount};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Bank account repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Open an account with zero balance and `active` state.
    /// Fails with `DuplicateAccountName` if the owner already has `name`.
    async fn create(&self, owner_user_id: Uuid, name: String) -> AppResult<BankAccount>;

    /// Find an account by id, visible only to its owner
    async fn find_owned(&self, id: Uuid, owner_user_id: Uuid) -> AppResult<Option<BankAccount>>;

    /// Set name and state on an owned account and return the stored result.
    async fn update_owned(
        &self,
        id: Uuid,
        owner_user_id: Uuid,
        name: String,
        state: AccountState,
    ) -> AppResult<BankAccount>;

    /// Delete an owned account
    async fn delete_owned(&self, id: Uuid, owner_user_id: Uuid) -> AppResult<()>;

    /// All accounts of one owner, oldest first
    async fn list_by_owner(&self, owner_user_id: Uuid) -> AppResult<Vec<BankAccount>>;
}

/// SeaORM-backed bank account repository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn create(&self, owner_user_id: Uuid, name: String) -> AppResult<BankAccount> {
        let account = BankAccount::open(Uuid::new_v4(), owner_user_id, name);

        let model = ActiveModel::from(&account)
            .insert(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, AppError::DuplicateAccountName))?;

        BankAccount::try_from(model)
    }

    async fn find_owned(&self, id: Uuid, owner_user_id: Uuid) -> AppResult<Option<BankAccount>> {
        BankAccountEntity::find_by_id(id)
            .filter(bank_account::Column::OwnerUserId.eq(owner_user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .map(BankAccount::try_from)
            .transpose()
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner_user_id: Uuid,
        name: String,
        state: AccountState,
    ) -> AppResult<BankAccount> {
        let result = BankAccountEntity::update_many()
            .col_expr(bank_account::Column::Name, Expr::value(name))
            .col_expr(bank_account::Column::State, Expr::value(state.as_str()))
            .col_expr(bank_account::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(bank_account::Column::Id.eq(id))
            .filter(bank_account::Column::OwnerUserId.eq(owner_user_id))
            .exec(&self.db)
            .await
            .map_err(|e| map_unique_violation(e, AppError::DuplicateAccountName))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        // Read back what was stored; a concurrent delete in between is a NotFound.
        self.find_owned(id, owner_user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn delete_owned(&self, id: Uuid, owner_user_id: Uuid) -> AppResult<()> {
        let result = BankAccountEntity::delete_many()
            .filter(bank_account::Column::Id.eq(id))
            .filter(bank_account::Column::OwnerUserId.eq(owner_user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list_by_owner(&self, owner_user_id: Uuid) -> AppResult<Vec<BankAccount>> {
        let models = BankAccountEntity::find()
            .filter(bank_account::Column::OwnerUserId.eq(owner_user_id))
            .order_by_asc(bank_account::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(BankAccount::try_from).collect()
    }
}
