//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every mutation of an expense request goes
//! through an [`ExpenseUnitOfWork`], which is one database transaction.

use async_trait::async_trait;

use crate::entities::{
    ApprovalEvent, AuditLogEntry, ExpenseRequest, NewApprovalEvent, NewAuditEntry,
    NewExpenseRequest, User,
};
use crate::error::DomainError;
use crate::value_objects::{CompanyId, ExpenseId, ExpenseStatus, Role, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Expense Store
// ============================================================================

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Open a transaction
    async fn begin(&self) -> RepoResult<Box<dyn ExpenseUnitOfWork>>;

    /// Find request by ID (no lock)
    async fn find_by_id(&self, id: ExpenseId) -> RepoResult<Option<ExpenseRequest>>;

    /// List a company's requests in any of `statuses`, most recent activity first
    async fn find_by_company(
        &self,
        company_id: CompanyId,
        statuses: &[ExpenseStatus],
        limit: Option<i64>,
    ) -> RepoResult<Vec<ExpenseRequest>>;

    /// Approval ledger of a request, oldest first
    async fn find_approval_events(&self, id: ExpenseId) -> RepoResult<Vec<ApprovalEvent>>;
}

/// One transaction against the expense store
///
/// Dropping a unit of work without calling [`commit`](Self::commit) discards
/// every write made through it and releases its row lock.
#[async_trait]
pub trait ExpenseUnitOfWork: Send {
    /// Load a request and hold an exclusive lock on its row until the transaction ends
    async fn lock_for_update(&mut self, id: ExpenseId) -> RepoResult<Option<ExpenseRequest>>;

    /// Insert a request and return it with its assigned id
    async fn insert_request(&mut self, request: &NewExpenseRequest) -> RepoResult<ExpenseRequest>;

    /// Persist the mutable columns of a locked request
    async fn update_request(&mut self, request: &ExpenseRequest) -> RepoResult<()>;

    /// Delete a request together with its approval events
    async fn delete_request(&mut self, id: ExpenseId) -> RepoResult<()>;

    /// Append to the approval ledger
    async fn insert_approval_event(&mut self, event: &NewApprovalEvent)
        -> RepoResult<ApprovalEvent>;

    /// Append an audit entry
    ///
    /// A failure here must leave the transaction usable for the remaining writes.
    async fn append_audit(&mut self, entry: &NewAuditEntry) -> RepoResult<()>;

    /// Make every write visible and release the lock
    async fn commit(self: Box<Self>) -> RepoResult<()>;

    /// Discard every write and release the lock
    async fn rollback(self: Box<Self>) -> RepoResult<()>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

/// Read side of the audit log; writes happen inside a unit of work
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Entries for one audited row, oldest first
    async fn find_by_record(&self, table_name: &str, record_id: i64)
        -> RepoResult<Vec<AuditLogEntry>>;
}

// ============================================================================
// User Directory
// ============================================================================

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Users holding `role` in a company, ordered by id
    ///
    /// With `require_address` only users with a chat id are returned.
    async fn find_by_role(
        &self,
        company_id: CompanyId,
        role: Role,
        require_address: bool,
    ) -> RepoResult<Vec<User>>;
}
