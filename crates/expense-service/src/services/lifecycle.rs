//! Expense lifecycle engine
//!
//! Every transition runs the same way: validate input and authorize the actor,
//! open a unit of work, lock the row, re-check its status under the lock,
//! write the row, the approval event and the audit entry, commit, and only
//! then notify. Notification failures never undo a committed transition.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use validator::Validate;

use expense_core::entities::{ExpenseRequest, NewApprovalEvent, NewExpenseRequest, User};
use expense_core::traits::ExpenseUnitOfWork;
use expense_core::validation::{
    validate_amount_value, validate_comment, validate_not_empty, validate_optional_comment,
};
use expense_core::value_objects::{ApprovalAction, CompanyId, ExpenseId, ExpenseStatus, Role};
use expense_core::DomainError;
use expense_notify::format_amount;

use crate::dto::{CreateExpenseRequest, DirectIssueRequest};

use super::audit::AuditLogService;
use super::context::ServiceContext;
use super::directory::DirectoryService;
use super::error::{ServiceError, ServiceResult};

/// Director comment stored when a decline carries no reason
pub const DEFAULT_DECLINE_REASON: &str = "Отклонено директором";

/// Approval-event comment for a full issue
pub const ISSUED_COMMENT: &str = "Выдано кассиром";

/// Expense lifecycle engine
pub struct ExpenseLifecycleEngine<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ExpenseLifecycleEngine<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn audit(&self) -> AuditLogService<'a> {
        AuditLogService::new(self.ctx)
    }

    fn directory(&self) -> DirectoryService<'a> {
        DirectoryService::new(self.ctx)
    }

    /// Create a pending request and ask the company director to decide
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreateExpenseRequest,
    ) -> ServiceResult<ExpenseRequest> {
        request.validate()?;
        let description = validate_comment(&request.description)?;
        let company_id = actor.require_company()?;
        let amount = validate_amount_value(request.amount)?;
        let currency = request.currency.unwrap_or(self.ctx.default_currency());

        let new_request = NewExpenseRequest::pending(
            actor.id,
            company_id,
            description,
            amount,
            currency,
        );

        let mut uow = self.ctx.expense_store().begin().await?;
        let created = uow.insert_request(&new_request).await?;
        self.audit()
            .record_created(uow.as_mut(), &created, actor)
            .await;
        uow.commit().await?;

        info!(
            request_id = %created.id,
            requester_id = %actor.id,
            company_id = %company_id,
            amount = %created.amount,
            currency = %created.currency,
            "Expense request created"
        );

        match self.directory().director_for_company(company_id).await {
            Some(director) => {
                self.ctx
                    .notifier()
                    .notify_new_request(&created, actor, &director)
                    .await;
            }
            None => warn!(request_id = %created.id, "No director to route the new request to"),
        }

        Ok(created)
    }

    /// pending -> approved; notifies the requester and the cashier
    #[instrument(skip(self, actor, comment), fields(actor_id = %actor.id))]
    pub async fn approve(
        &self,
        actor: &User,
        request_id: ExpenseId,
        comment: Option<&str>,
    ) -> ServiceResult<ExpenseRequest> {
        let comment = validate_optional_comment(comment)?;
        authorize(actor, ApprovalAction::Approve)?;

        let now = Utc::now();
        let mut uow = self.ctx.expense_store().begin().await?;
        let mut request = lock_request(uow.as_mut(), actor, request_id).await?;

        let old_status = request.status;
        request.approve(actor.id, comment.clone(), now)?;
        uow.update_request(&request).await?;

        let mut event = NewApprovalEvent::new(request.id, actor, ApprovalAction::Approve).at(now);
        if let Some(comment) = comment {
            event = event.with_comment(comment);
        }
        uow.insert_approval_event(&event).await?;

        self.audit()
            .record_approved(uow.as_mut(), &request, actor, old_status)
            .await;
        uow.commit().await?;

        info!(request_id = %request.id, director_id = %actor.id, "Expense request approved");

        self.notify_approved(&request).await;
        Ok(request)
    }

    /// pending -> declined; notifies the requester
    #[instrument(skip(self, actor, reason), fields(actor_id = %actor.id))]
    pub async fn decline(
        &self,
        actor: &User,
        request_id: ExpenseId,
        reason: Option<&str>,
    ) -> ServiceResult<ExpenseRequest> {
        let reason = validate_optional_comment(reason)?
            .unwrap_or_else(|| DEFAULT_DECLINE_REASON.to_string());
        authorize(actor, ApprovalAction::Decline)?;

        let now = Utc::now();
        let mut uow = self.ctx.expense_store().begin().await?;
        let mut request = lock_request(uow.as_mut(), actor, request_id).await?;

        let old_status = request.status;
        request.decline(actor.id, reason.clone(), now)?;
        uow.update_request(&request).await?;

        let event = NewApprovalEvent::new(request.id, actor, ApprovalAction::Decline)
            .with_comment(reason)
            .at(now);
        uow.insert_approval_event(&event).await?;

        self.audit()
            .record_declined(uow.as_mut(), &request, actor, old_status)
            .await;
        uow.commit().await?;

        info!(request_id = %request.id, director_id = %actor.id, "Expense request declined");

        self.notify_requester(&request).await;
        Ok(request)
    }

    /// approved -> issued
    ///
    /// `amount` is what the cashier actually paid out; `None` means the
    /// approved amount.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn issue(
        &self,
        actor: &User,
        request_id: ExpenseId,
        amount: Option<Decimal>,
    ) -> ServiceResult<ExpenseRequest> {
        let amount = amount.map(validate_amount_value).transpose()?;
        authorize(actor, ApprovalAction::Issue)?;

        let now = Utc::now();
        let mut uow = self.ctx.expense_store().begin().await?;
        let mut request = lock_request(uow.as_mut(), actor, request_id).await?;

        let old_status = request.status;
        request.issue(actor.id, amount, now)?;
        uow.update_request(&request).await?;

        let comment = issue_comment(&request);
        let event = NewApprovalEvent::new(request.id, actor, ApprovalAction::Issue)
            .with_comment(comment.as_str())
            .at(now);
        uow.insert_approval_event(&event).await?;

        self.audit()
            .record_issued(uow.as_mut(), &request, actor, Some(old_status), Some(comment.as_str()))
            .await;
        uow.commit().await?;

        info!(
            request_id = %request.id,
            cashier_id = %actor.id,
            amount = %request.amount,
            issued_amount = %request.effective_amount(),
            "Expense request issued"
        );

        self.notify_requester(&request).await;
        Ok(request)
    }

    /// Create a request that is already issued, skipping approval
    ///
    /// The director is told after the fact; the recipient is told unless the
    /// cashier paid themselves.
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id))]
    pub async fn direct_issue(
        &self,
        actor: &User,
        request: DirectIssueRequest,
    ) -> ServiceResult<ExpenseRequest> {
        request.validate()?;
        let description = validate_not_empty(&request.description)?;
        let amount = validate_amount_value(request.amount)?;
        let comment = validate_optional_comment(request.comment.as_deref())?;
        let company_id = authorize(actor, ApprovalAction::DirectIssue)?;
        let currency = request.currency.unwrap_or(self.ctx.default_currency());

        let recipient = if request.recipient_id == actor.id {
            actor.clone()
        } else {
            self.ctx
                .user_directory()
                .find_by_id(request.recipient_id)
                .await?
                .ok_or(DomainError::UserNotFound(request.recipient_id))?
        };
        ensure_company(&recipient, company_id)?;

        let new_request = NewExpenseRequest::issued_directly(
            recipient.id,
            actor.id,
            company_id,
            description,
            amount,
            currency,
        );

        let mut uow = self.ctx.expense_store().begin().await?;
        let created = uow.insert_request(&new_request).await?;

        let event_comment = match &comment {
            Some(c) => format!("[Для: {}] {c}", recipient.display_name()),
            None => format!("[Для: {}]", recipient.display_name()),
        };
        let event = NewApprovalEvent::new(created.id, actor, ApprovalAction::DirectIssue)
            .with_comment(event_comment)
            .at(created.created_at);
        uow.insert_approval_event(&event).await?;

        let audit = self.audit();
        audit.record_created(uow.as_mut(), &created, actor).await;
        audit
            .record_issued(uow.as_mut(), &created, actor, None, comment.as_deref())
            .await;
        uow.commit().await?;

        info!(
            request_id = %created.id,
            cashier_id = %actor.id,
            recipient_id = %recipient.id,
            amount = %created.amount,
            currency = %created.currency,
            "Funds issued without approval"
        );

        let notifier = self.ctx.notifier();
        match self.directory().director_for_company(company_id).await {
            Some(director) => {
                notifier
                    .notify_direct_issue_director(
                        &created,
                        actor,
                        &recipient,
                        &director,
                        comment.as_deref(),
                    )
                    .await;
            }
            None => warn!(request_id = %created.id, "No director to inform about direct issue"),
        }
        if recipient.id != actor.id {
            notifier
                .notify_direct_issue_recipient(&created, actor, &recipient)
                .await;
        }

        Ok(created)
    }

    /// Remove a request and its approval events
    ///
    /// Allowed for the company director and for the requester while the
    /// request is still pending.
    #[instrument(skip(self, actor, reason), fields(actor_id = %actor.id))]
    pub async fn delete(
        &self,
        actor: &User,
        request_id: ExpenseId,
        reason: Option<&str>,
    ) -> ServiceResult<ExpenseRequest> {
        let reason = validate_optional_comment(reason)?;
        actor.require_company()?;

        let mut uow = self.ctx.expense_store().begin().await?;
        let request = lock_request(uow.as_mut(), actor, request_id).await?;

        let own_pending =
            request.requester_id == actor.id && request.status == ExpenseStatus::Pending;
        if actor.role != Role::Director && !own_pending {
            return Err(ServiceError::permission_denied("delete expense request"));
        }

        uow.delete_request(request.id).await?;
        self.audit()
            .record_deleted(uow.as_mut(), &request, actor, reason.as_deref())
            .await;
        uow.commit().await?;

        info!(request_id = %request.id, actor_id = %actor.id, "Expense request deleted");
        Ok(request)
    }

    async fn notify_approved(&self, request: &ExpenseRequest) {
        let directory = self.directory();
        let notifier = self.ctx.notifier();

        let Some(requester) = directory.find_user(request.requester_id).await else {
            warn!(request_id = %request.id, requester_id = %request.requester_id, "Requester not found");
            return;
        };
        notifier.notify_requester(request, &requester).await;

        match directory.cashier_for_company(request.company_id).await {
            Some(cashier) => {
                notifier.notify_cashier(request, &requester, &cashier).await;
            }
            None => warn!(request_id = %request.id, "No cashier to route the approved request to"),
        }
    }

    async fn notify_requester(&self, request: &ExpenseRequest) {
        match self.directory().find_user(request.requester_id).await {
            Some(requester) => {
                self.ctx.notifier().notify_requester(request, &requester).await;
            }
            None => warn!(request_id = %request.id, requester_id = %request.requester_id, "Requester not found"),
        }
    }
}

/// Check the actor's role for `action`; returns the actor's company
fn authorize(actor: &User, action: ApprovalAction) -> Result<CompanyId, DomainError> {
    if !actor.role.can_perform(action) {
        return Err(DomainError::RoleNotPermitted {
            role: actor.role,
            action,
        });
    }
    actor.require_company()
}

fn ensure_company(user: &User, company_id: CompanyId) -> Result<(), DomainError> {
    if user.company_id == Some(company_id) {
        Ok(())
    } else {
        Err(DomainError::CompanyMismatch {
            user_id: user.id,
            expected: company_id,
            actual: user.company_id,
        })
    }
}

/// Lock the row and check the actor may touch it
async fn lock_request(
    uow: &mut dyn ExpenseUnitOfWork,
    actor: &User,
    request_id: ExpenseId,
) -> ServiceResult<ExpenseRequest> {
    let request = uow
        .lock_for_update(request_id)
        .await?
        .ok_or(DomainError::RequestNotFound(request_id))?;
    ensure_company(actor, request.company_id)?;
    Ok(request)
}

fn issue_comment(request: &ExpenseRequest) -> String {
    match request.issued_amount.filter(|_| request.has_issued_delta()) {
        Some(issued) => format!(
            "{ISSUED_COMMENT}. Подтвержденная сумма: {} {cur}, выдана: {} {cur}",
            format_amount(request.amount),
            format_amount(issued),
            cur = request.currency,
        ),
        None => ISSUED_COMMENT.to_string(),
    }
}
