//! Account service - bank account use cases for an authenticated owner.
//!
//! Every operation takes the caller's user id; the store scopes on it.
//! Successful creation is announced on the notification hub.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::EVENT_BANK_ACCOUNT_CREATED;
use crate::domain::{AccountState, BankAccount};
use crate::errors::{AppResult, OptionExt};
use crate::infra::{Notifier, UnitOfWork};

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Open a new account for `owner_user_id`
    async fn create_account(&self, owner_user_id: Uuid, name: String) -> AppResult<BankAccount>;

    /// Get an account owned by the caller
    async fn get_account(&self, id: Uuid, owner_user_id: Uuid) -> AppResult<BankAccount>;

    /// Rename and/or relabel an account owned by the caller
    async fn update_account(
        &self,
        id: Uuid,
        owner_user_id: Uuid,
        name: String,
        state: AccountState,
    ) -> AppResult<BankAccount>;

    /// Delete an account owned by the caller
    async fn delete_account(&self, id: Uuid, owner_user_id: Uuid) -> AppResult<()>;

    /// List the caller's accounts
    async fn list_accounts(&self, owner_user_id: Uuid) -> AppResult<Vec<BankAccount>>;
}

/// Concrete implementation of AccountService using Unit of Work.
pub struct AccountManager<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<dyn Notifier>,
}

impl<U: UnitOfWork> AccountManager<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<dyn Notifier>) -> Self {
        Self { uow, notifier }
    }
}

#[async_trait]
impl<U: UnitOfWork> AccountService for AccountManager<U> {
    async fn create_account(&self, owner_user_id: Uuid, name: String) -> AppResult<BankAccount> {
        let account = self.uow.accounts().create(owner_user_id, name).await?;

        tracing::info!(account_id = %account.id, owner_id = %owner_user_id, "Bank account created");
        self.notifier
            .notify(EVENT_BANK_ACCOUNT_CREATED, &account.id.to_string());

        Ok(account)
    }

    async fn get_account(&self, id: Uuid, owner_user_id: Uuid) -> AppResult<BankAccount> {
        self.uow
            .accounts()
            .find_owned(id, owner_user_id)
            .await?
            .ok_or_not_found()
    }

    async fn update_account(
        &self,
        id: Uuid,
        owner_user_id: Uuid,
        name: String,
        state: AccountState,
    ) -> AppResult<BankAccount> {
        let account = self
            .uow
            .accounts()
            .update_owned(id, owner_user_id, name, state)
            .await?;

        tracing::info!(account_id = %id, state = %account.state, "Bank account updated");
        Ok(account)
    }

    async fn delete_account(&self, id: Uuid, owner_user_id: Uuid) -> AppResult<()> {
        self.uow.accounts().delete_owned(id, owner_user_id).await?;

        tracing::info!(account_id = %id, "Bank account deleted");
        Ok(())
    }

    async fn list_accounts(&self, owner_user_id: Uuid) -> AppResult<Vec<BankAccount>> {
        self.uow.accounts().list_by_owner(owner_user_id).await
    }
}
