//! Test fixtures
//!
//! One company with a requester, a director and a cashier, all reachable
//! on the notification channel, plus a user from another company.

use std::sync::Arc;

use rust_decimal::Decimal;

use expense_core::entities::{ExpenseRequest, User};
use expense_core::traits::NotificationChannel;
use expense_core::value_objects::{ChatId, CompanyId, Role, UserId};
use expense_notify::NotificationDispatcher;
use expense_service::{
    CreateExpenseRequest, ExpenseLifecycleEngine, ServiceContext, ServiceContextBuilder,
};

use crate::fakes::{InMemoryAuditLog, InMemoryDirectory, InMemoryExpenseStore, RecordingChannel};

pub const COMPANY: CompanyId = CompanyId::new(1);
pub const OTHER_COMPANY: CompanyId = CompanyId::new(2);

pub fn requester() -> User {
    User::new(UserId::new(10), Role::User, COMPANY)
        .with_full_name("Алишер Усманов")
        .with_login("alisher")
        .with_chat_id(ChatId::new(1010))
}

pub fn director() -> User {
    User::new(UserId::new(20), Role::Director, COMPANY)
        .with_full_name("Директор Каримов")
        .with_chat_id(ChatId::new(2020))
}

pub fn cashier() -> User {
    User::new(UserId::new(30), Role::Cashier, COMPANY)
        .with_full_name("Кассир Нурова")
        .with_chat_id(ChatId::new(3030))
}

pub fn foreign_director() -> User {
    User::new(UserId::new(40), Role::Director, OTHER_COMPANY)
        .with_full_name("Чужой Директор")
        .with_chat_id(ChatId::new(4040))
}

pub fn company_users() -> Vec<User> {
    vec![requester(), director(), cashier(), foreign_director()]
}

pub fn amount(units: i64) -> Decimal {
    Decimal::from(units)
}

/// Fakes wired into a ServiceContext
pub struct TestEnv {
    pub store: Arc<InMemoryExpenseStore>,
    pub audit: Arc<InMemoryAuditLog>,
    pub directory: Arc<InMemoryDirectory>,
    pub channel: Arc<RecordingChannel>,
    pub ctx: ServiceContext,
}

impl TestEnv {
    /// Notifications go to a `RecordingChannel`
    pub fn new() -> Self {
        let channel = Arc::new(RecordingChannel::new());
        Self::build(channel.clone(), channel)
    }

    /// Notifications go to `channel`; the recording channel stays empty
    pub fn with_channel(channel: Arc<dyn NotificationChannel>) -> Self {
        Self::build(channel, Arc::new(RecordingChannel::new()))
    }

    fn build(channel: Arc<dyn NotificationChannel>, recorder: Arc<RecordingChannel>) -> Self {
        let audit = Arc::new(InMemoryAuditLog::new());
        let store = Arc::new(InMemoryExpenseStore::new(audit.clone()));
        let directory = Arc::new(InMemoryDirectory::new(company_users()));

        let ctx = ServiceContextBuilder::new()
            .expense_store(store.clone())
            .audit_repo(audit.clone())
            .user_directory(directory.clone())
            .notifier(NotificationDispatcher::new(channel))
            .build()
            .expect("all dependencies provided");

        Self {
            store,
            audit,
            directory,
            channel: recorder,
            ctx,
        }
    }

    pub fn engine(&self) -> ExpenseLifecycleEngine<'_> {
        ExpenseLifecycleEngine::new(&self.ctx)
    }

    /// A pending request by the fixture requester
    pub async fn pending_request(&self, units: i64) -> ExpenseRequest {
        self.engine()
            .create(
                &requester(),
                CreateExpenseRequest::new("Канцелярия", amount(units)),
            )
            .await
            .expect("create pending request")
    }

    /// An approved request by the fixture requester
    pub async fn approved_request(&self, units: i64) -> ExpenseRequest {
        let pending = self.pending_request(units).await;
        self.engine()
            .approve(&director(), pending.id, None)
            .await
            .expect("approve request")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
