//! Member service - membership use cases.
//!
//! Creates and updates re-read their row inside the same transaction, so
//! the returned record is exactly what was committed.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Member, MemberDraft};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Member service trait for dependency injection.
#[async_trait]
pub trait MemberService: Send + Sync {
    /// All members, newest first
    async fn list_members(&self) -> AppResult<Vec<Member>>;

    /// One member, or `NotFound`
    async fn get_member(&self, id: i32) -> AppResult<Member>;

    /// Insert a member and return the stored record
    async fn create_member(&self, draft: MemberDraft) -> AppResult<Member>;

    /// Overwrite every mutable field of an existing member
    async fn update_member(&self, id: i32, draft: MemberDraft) -> AppResult<Member>;

    /// Remove a member, `NotFound` when nothing was deleted
    async fn delete_member(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of MemberService using Unit of Work.
pub struct MemberManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MemberManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> MemberService for MemberManager<U> {
    async fn list_members(&self) -> AppResult<Vec<Member>> {
        self.uow.members().list().await
    }

    async fn get_member(&self, id: i32) -> AppResult<Member> {
        self.uow.members().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_member(&self, draft: MemberDraft) -> AppResult<Member> {
        let member = with_transaction!(self.uow, |ctx| {
            let members = ctx.members();
            let id = members.insert(draft).await?;
            members
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::internal(format!("Unable to load newly created member {}", id)))
        })?;

        tracing::info!(member_id = member.id, "Member created");
        Ok(member)
    }

    async fn update_member(&self, id: i32, draft: MemberDraft) -> AppResult<Member> {
        let member = with_transaction!(self.uow, |ctx| {
            let members = ctx.members();
            if members.find_by_id(id).await?.is_none() {
                return Err(AppError::NotFound);
            }
            members.update(id, draft).await?;
            members.find_by_id(id).await?.ok_or_not_found()
        })?;

        tracing::info!(member_id = id, "Member updated");
        Ok(member)
    }

    async fn delete_member(&self, id: i32) -> AppResult<()> {
        if !self.uow.members().delete(id).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!(member_id = id, "Member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemberStatus;
    use crate::infra::{MemberRepository, MockMemberRepository, TransactionContext, TxFuture};
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    /// Unit of work over a mocked repository; transactions are unavailable.
    struct MockedUow {
        members: Arc<MockMemberRepository>,
    }

    #[async_trait]
    impl UnitOfWork for MockedUow {
        fn members(&self) -> Arc<dyn MemberRepository> {
            self.members.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("connection refused"))
        }
    }

    fn service(repo: MockMemberRepository) -> MemberManager<MockedUow> {
        MemberManager::new(Arc::new(MockedUow {
            members: Arc::new(repo),
        }))
    }

    fn member(id: i32) -> Member {
        Member {
            id,
            full_name: "Jane Doe".to_string(),
            membership_type: "Premium".to_string(),
            status: MemberStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_members_passes_through_order() {
        let mut repo = MockMemberRepository::new();
        repo.expect_list()
            .times(1)
            .returning(|| Ok(vec![member(2), member(1)]));

        let members = service(repo).list_members().await.unwrap();

        assert_eq!(members.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_get_member_found() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(member(id))));

        let found = service(repo).get_member(7).await.unwrap();
        assert_eq!(found.id, 7);
    }

    #[tokio::test]
    async fn test_get_member_missing_is_not_found() {
        let mut repo = MockMemberRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get_member(404).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_member_removed() {
        let mut repo = MockMemberRepository::new();
        repo.expect_delete().with(eq(3)).times(1).returning(|_| Ok(true));

        tokio_test::assert_ok!(service(repo).delete_member(3).await);
    }

    #[tokio::test]
    async fn test_delete_member_missing_is_not_found() {
        let mut repo = MockMemberRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let result = service(repo).delete_member(3).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_member_surfaces_transaction_failure() {
        let draft = member(0).draft();

        let result = service(MockMemberRepository::new()).create_member(draft).await;

        let err = result.unwrap_err();
        assert!(err.is_server_error());
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut repo = MockMemberRepository::new();
        repo.expect_list()
            .returning(|| Err(sea_orm::DbErr::Custom("pool timed out".to_string()).into()));

        let result = service(repo).list_members().await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
