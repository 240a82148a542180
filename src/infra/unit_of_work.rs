//! Unit of Work pattern implementation.
//!
//! Hands out the pooled member repository and runs closures inside a
//! database transaction. Writes that must re-read their own row go through
//! [`UnitOfWork::transaction`] so the read observes the write and a
//! concurrent delete cannot slip in between.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::repositories::{self, MemberRepository, MemberStore};
use crate::domain::{Member, MemberDraft};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method.
/// Service tests provide a hand-written implementation instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get member repository
    fn members(&self) -> Arc<dyn MemberRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed when the closure succeeds, rolled back when it fails.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get member repository for this transaction
    pub fn members(&self) -> TxMemberRepository<'a> {
        TxMemberRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    member_repo: Arc<MemberStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        let member_repo = Arc::new(MemberStore::new(db.clone()));
        Self { db, member_repo }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn members(&self) -> Arc<dyn MemberRepository> {
        self.member_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // Backend default isolation; SQLite rejects explicit levels
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware member repository.
///
/// Borrows the transaction so it cannot outlive it.
pub struct TxMemberRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxMemberRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Member>> {
        repositories::find_member(self.txn, id).await
    }

    /// Insert a member, returning the generated id
    pub async fn insert(&self, draft: MemberDraft) -> AppResult<i32> {
        repositories::insert_member(self.txn, draft).await
    }

    /// Full overwrite of the mutable fields
    pub async fn update(&self, id: i32, draft: MemberDraft) -> AppResult<()> {
        repositories::update_member(self.txn, id, draft).await
    }
}

/// Run a block inside `$uow.transaction`, boxing the future.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
