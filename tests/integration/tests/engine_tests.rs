//! Engine Integration Tests
//!
//! Drive the lifecycle engine end to end against the in-memory fakes.
//!
//! Run with: cargo test -p integration-tests --test engine_tests

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;

use expense_core::value_objects::{ApprovalAction, Currency, ExpenseId, ExpenseStatus, UserId};
use expense_core::DomainError;
use expense_notify::keyboards::{approval_keyboard, issue_keyboard};
use expense_service::services::error::INTERNAL_ERROR_MESSAGE;
use expense_service::{
    CreateExpenseRequest, DirectIssueRequest, ExpenseLifecycleEngine, ExpenseQueryService,
    ServiceContext, ServiceError, TransitionOutcome,
};
use integration_tests::*;

fn audit_actions(env: &TestEnv, id: ExpenseId) -> Vec<String> {
    env.audit
        .entries_for(id)
        .into_iter()
        .map(|e| e.action)
        .collect()
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_records_insert_and_notifies_director() {
    let env = TestEnv::new();

    let request = env
        .engine()
        .create(
            &requester(),
            CreateExpenseRequest::new("  Картриджи  ", amount(150_000)),
        )
        .await
        .unwrap();

    assert_eq!(request.status, ExpenseStatus::Pending);
    assert_eq!(request.currency, Currency::Uzs);
    assert_eq!(request.description, "Картриджи");
    assert_eq!(request.company_id, COMPANY);

    let audit = env.audit.entries_for(request.id);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, "insert");
    assert_eq!(audit[0].table_name, "expense_requests");
    assert_eq!(audit[0].payload["new_status"], "pending");
    assert_eq!(audit[0].payload["amount"], "150000.00");

    let sent = env.channel.sent_to(director().chat_id.unwrap());
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.starts_with(&format!("Новая заявка #{}", request.id)));
    assert_eq!(sent[0].keyboard, Some(approval_keyboard(request.id)));
}

#[tokio::test]
async fn test_create_rejects_invalid_amount_before_writing() {
    let env = TestEnv::new();

    for bad in [Decimal::ZERO, amount(-5), amount(10_000_000_001)] {
        let err = env
            .engine()
            .create(&requester(), CreateExpenseRequest::new("Канцелярия", bad))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)), "{bad}: {err}");
    }

    assert_eq!(env.store.request_count(), 0);
    assert!(env.audit.entries().is_empty());
    assert!(env.channel.sent().is_empty());
}

#[tokio::test]
async fn test_create_rejects_blank_or_short_description() {
    let env = TestEnv::new();

    for bad in ["", "   ", "ок"] {
        let err = env
            .engine()
            .create(&requester(), CreateExpenseRequest::new(bad, amount(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)), "{bad:?}: {err}");
    }

    assert_eq!(env.store.request_count(), 0);
    assert_eq!(env.store.commit_count(), 0);
    assert!(env.audit.entries().is_empty());
    assert!(env.channel.sent().is_empty());
}

#[tokio::test]
async fn test_create_accepts_upper_bound_and_explicit_currency() {
    let env = TestEnv::new();

    let request = env
        .engine()
        .create(
            &requester(),
            CreateExpenseRequest::new("Оборудование", amount(10_000_000_000))
                .with_currency(Currency::Usd),
        )
        .await
        .unwrap();

    assert_eq!(request.amount, amount(10_000_000_000));
    assert_eq!(request.currency, Currency::Usd);
}

#[tokio::test]
async fn test_create_without_reachable_director_still_commits() {
    let env = TestEnv::new();
    env.directory.set_failing(true);

    let request = env.pending_request(1_000).await;

    assert!(env.store.request(request.id).is_some());
    assert!(env.channel.sent().is_empty());
}

// ============================================================================
// Approve
// ============================================================================

#[tokio::test]
async fn test_approve_writes_event_audit_and_notifies() {
    let env = TestEnv::new();
    let pending = env.pending_request(500_000).await;

    let approved = env
        .engine()
        .approve(&director(), pending.id, Some("  до конца недели "))
        .await
        .unwrap();

    assert_eq!(approved.status, ExpenseStatus::Approved);
    assert_eq!(approved.director_id, Some(director().id));
    assert_eq!(approved.director_comment.as_deref(), Some("до конца недели"));
    assert!(approved.approved_at.is_some());

    let events = env.store.events(pending.id);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, ApprovalAction::Approve);
    assert_eq!(events[0].comment.as_deref(), Some("до конца недели"));

    let audit = env.audit.entries_for(pending.id);
    assert_eq!(audit.last().unwrap().action, "approved");
    assert_eq!(
        audit.last().unwrap().payload,
        json!({"old_status": "pending", "new_status": "approved", "comment": "до конца недели"})
    );

    let to_requester = env.channel.sent_to(requester().chat_id.unwrap());
    assert_eq!(to_requester.len(), 1);
    assert!(to_requester[0].text.contains("✅ подтверждена директором"));

    let to_cashier = env.channel.sent_to(cashier().chat_id.unwrap());
    assert_eq!(to_cashier.len(), 1);
    assert_eq!(to_cashier[0].keyboard, Some(issue_keyboard(pending.id)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approvals_exactly_one_wins() {
    let env = TestEnv::new();
    let pending = env.pending_request(75_000).await;
    let ctx = Arc::new(env.ctx.clone());

    let id = pending.id;

    let spawn_approve = move |ctx: Arc<ServiceContext>| {
        tokio::spawn(async move {
            ExpenseLifecycleEngine::new(&ctx)
                .approve(&director(), id, None)
                .await
        })
    };
    let first = spawn_approve(ctx.clone());
    let second = spawn_approve(ctx.clone());

    let results = [first.await.unwrap(), second.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let stale: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();

    assert_eq!(successes, 1);
    assert_eq!(stale.len(), 1);
    assert!(stale[0].is_stale_state());
    assert!(matches!(
        stale[0],
        ServiceError::Domain(DomainError::StaleState {
            expected: ExpenseStatus::Pending,
            actual: ExpenseStatus::Approved,
            ..
        })
    ));

    assert_eq!(
        env.store.request(pending.id).unwrap().status,
        ExpenseStatus::Approved
    );
    assert_eq!(env.store.events(pending.id).len(), 1);
    assert_eq!(
        audit_actions(&env, pending.id)
            .iter()
            .filter(|a| *a == "approved")
            .count(),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approve_and_decline_first_commit_wins() {
    let env = TestEnv::new();
    let pending = env.pending_request(75_000).await;
    let ctx = Arc::new(env.ctx.clone());

    let id = pending.id;

    let approve = {
        let ctx = ctx.clone();
        tokio::spawn(async move {
            ExpenseLifecycleEngine::new(&ctx)
                .approve(&director(), id, None)
                .await
        })
    };
    let decline = {
        let ctx = ctx.clone();
        tokio::spawn(async move {
            ExpenseLifecycleEngine::new(&ctx)
                .decline(&director(), id, None)
                .await
        })
    };

    let approve = approve.await.unwrap();
    let decline = decline.await.unwrap();
    assert!(approve.is_ok() ^ decline.is_ok());

    let final_status = env.store.request(pending.id).unwrap().status;
    if approve.is_ok() {
        assert_eq!(final_status, ExpenseStatus::Approved);
        assert!(decline.unwrap_err().is_stale_state());
    } else {
        assert_eq!(final_status, ExpenseStatus::Declined);
        assert!(approve.unwrap_err().is_stale_state());
    }
    assert_eq!(env.store.events(pending.id).len(), 1);
}

#[tokio::test]
async fn test_approve_requires_director_of_same_company() {
    let env = TestEnv::new();
    let pending = env.pending_request(1_000).await;

    let err = env
        .engine()
        .approve(&cashier(), pending.id, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::RoleNotPermitted { .. })
    ));

    let err = env
        .engine()
        .approve(&foreign_director(), pending.id, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::CompanyMismatch { .. })
    ));
    assert!(!err.is_stale_state());

    assert_eq!(
        env.store.request(pending.id).unwrap().status,
        ExpenseStatus::Pending
    );
    assert!(env.store.events(pending.id).is_empty());
}

#[tokio::test]
async fn test_approve_unknown_request_is_stale() {
    let env = TestEnv::new();

    let err = env
        .engine()
        .approve(&director(), ExpenseId::new(999), None)
        .await
        .unwrap_err();

    assert!(err.is_stale_state());
    assert_eq!(err.user_message(), "Заявка #999 не найдена.");
}

#[tokio::test]
async fn test_approve_rejects_short_comment() {
    let env = TestEnv::new();
    let pending = env.pending_request(1_000).await;

    let err = env
        .engine()
        .approve(&director(), pending.id, Some("ok"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(audit_actions(&env, pending.id), ["insert"]);
}

// ============================================================================
// Decline
// ============================================================================

#[tokio::test]
async fn test_decline_uses_default_reason() {
    let env = TestEnv::new();
    let pending = env.pending_request(2_000).await;

    let declined = env
        .engine()
        .decline(&director(), pending.id, None)
        .await
        .unwrap();

    assert_eq!(declined.status, ExpenseStatus::Declined);
    assert_eq!(
        declined.director_comment.as_deref(),
        Some("Отклонено директором")
    );

    let audit = env.audit.entries_for(pending.id);
    assert_eq!(audit.last().unwrap().payload["reason"], "Отклонено директором");

    let to_requester = env.channel.sent_to(requester().chat_id.unwrap());
    assert_eq!(to_requester.len(), 1);
    assert!(to_requester[0].text.contains("🚫 отклонена директором"));
    assert!(env.channel.sent_to(cashier().chat_id.unwrap()).is_empty());
}

#[tokio::test]
async fn test_decline_is_terminal() {
    let env = TestEnv::new();

    let declined = env.pending_request(2_000).await;
    env.engine()
        .decline(&director(), declined.id, Some("Нет бюджета"))
        .await
        .unwrap();

    let approved = env.approved_request(3_000).await;
    let issued = env
        .engine()
        .issue(&cashier(), approved.id, None)
        .await
        .unwrap();

    for id in [declined.id, issued.id] {
        let events_before = env.store.events(id).len();
        let err = env
            .engine()
            .decline(&director(), id, None)
            .await
            .unwrap_err();
        assert!(err.is_stale_state(), "{id}: {err}");
        assert_eq!(env.store.events(id).len(), events_before);
    }

    assert!(env
        .engine()
        .approve(&director(), declined.id, None)
        .await
        .unwrap_err()
        .is_stale_state());
    assert!(env
        .engine()
        .issue(&cashier(), declined.id, None)
        .await
        .unwrap_err()
        .is_stale_state());
}

// ============================================================================
// Issue
// ============================================================================

#[tokio::test]
async fn test_issue_full_amount() {
    let env = TestEnv::new();
    let approved = env.approved_request(40_000).await;

    let issued = env
        .engine()
        .issue(&cashier(), approved.id, Some(amount(40_000)))
        .await
        .unwrap();

    assert_eq!(issued.status, ExpenseStatus::Issued);
    assert_eq!(issued.cashier_id, Some(cashier().id));
    assert_eq!(issued.issued_amount, None);
    assert!(issued.issued_at.is_some());

    let events = env.store.events(approved.id);
    assert_eq!(events.last().unwrap().action, ApprovalAction::Issue);
    assert_eq!(events.last().unwrap().comment.as_deref(), Some("Выдано кассиром"));

    let entries = env.audit.entries_for(approved.id);
    let payload = &entries.last().unwrap().payload;
    assert!(payload.get("original_amount").is_none());
}

#[tokio::test]
async fn test_issue_different_amount_records_delta() {
    let env = TestEnv::new();
    let approved = env.approved_request(100).await;

    let issued = env
        .engine()
        .issue(&cashier(), approved.id, Some(Decimal::new(8_000, 2)))
        .await
        .unwrap();

    assert_eq!(issued.status, ExpenseStatus::Issued);
    assert_eq!(issued.amount, amount(100));
    assert_eq!(issued.issued_amount, Some(amount(80)));
    assert_eq!(issued.effective_amount(), amount(80));

    let stored = env.store.request(approved.id).unwrap();
    assert_eq!(stored.amount, amount(100));
    assert_eq!(stored.issued_amount, Some(amount(80)));

    let entry = env.audit.entries_for(approved.id).pop().unwrap();
    assert_eq!(entry.action, "issued");
    assert_eq!(entry.payload["original_amount"], "100.00");
    assert_eq!(entry.payload["issued_amount"], "80.00");
    assert_eq!(entry.payload["old_status"], "approved");

    let event = env.store.events(approved.id).pop().unwrap();
    assert_eq!(
        event.comment.as_deref(),
        Some("Выдано кассиром. Подтвержденная сумма: 100.00 UZS, выдана: 80.00 UZS")
    );

    let to_requester = env.channel.sent_to(requester().chat_id.unwrap());
    assert!(to_requester
        .last()
        .unwrap()
        .text
        .ends_with("Выдана сумма: 80.00 UZS (запрошено: 100.00 UZS)"));
}

#[tokio::test]
async fn test_issue_requires_approved_status_and_cashier() {
    let env = TestEnv::new();
    let pending = env.pending_request(1_000).await;

    let err = env
        .engine()
        .issue(&cashier(), pending.id, None)
        .await
        .unwrap_err();
    assert!(err.is_stale_state());

    let err = env
        .engine()
        .issue(&director(), pending.id, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::RoleNotPermitted { .. })
    ));
}

// ============================================================================
// Direct Issue
// ============================================================================

#[tokio::test]
async fn test_direct_issue_to_self() {
    let env = TestEnv::new();
    let cashier = cashier();

    let request = env
        .engine()
        .direct_issue(
            &cashier,
            DirectIssueRequest::new(cashier.id, "office chair", amount(50_000))
                .with_currency(Currency::Uzs),
        )
        .await
        .unwrap();

    assert_eq!(request.status, ExpenseStatus::Issued);
    assert_eq!(request.approved_at, request.issued_at);
    assert_eq!(request.requester_id, cashier.id);
    assert_eq!(request.cashier_id, Some(cashier.id));
    assert_eq!(env.store.request_count(), 1);

    assert_eq!(audit_actions(&env, request.id), ["insert", "issued"]);

    let events = env.store.events(request.id);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, ApprovalAction::DirectIssue);
    assert_eq!(events[0].comment.as_deref(), Some("[Для: Кассир Нурова]"));

    let to_director = env.channel.sent_to(director().chat_id.unwrap());
    assert_eq!(to_director.len(), 1);
    assert!(to_director[0].text.contains("выдал средства без подтверждения"));
    assert!(env.channel.sent_to(cashier.chat_id.unwrap()).is_empty());
}

#[tokio::test]
async fn test_direct_issue_to_other_user_notifies_recipient() {
    let env = TestEnv::new();

    let request = env
        .engine()
        .direct_issue(
            &cashier(),
            DirectIssueRequest::new(requester().id, "Командировка", amount(300_000))
                .with_comment("срочно"),
        )
        .await
        .unwrap();

    assert_eq!(request.requester_id, requester().id);
    let events = env.store.events(request.id);
    assert_eq!(events[0].comment.as_deref(), Some("[Для: Алишер Усманов] срочно"));

    let to_recipient = env.channel.sent_to(requester().chat_id.unwrap());
    assert_eq!(to_recipient.len(), 1);
    assert!(to_recipient[0].text.starts_with("💰 Вам выданы средства."));
    assert_eq!(env.channel.sent_to(director().chat_id.unwrap()).len(), 1);
}

#[tokio::test]
async fn test_direct_issue_rejects_foreign_or_unknown_recipient() {
    let env = TestEnv::new();

    let err = env
        .engine()
        .direct_issue(
            &cashier(),
            DirectIssueRequest::new(foreign_director().id, "x", amount(10)),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::CompanyMismatch { .. })
    ));

    let err = env
        .engine()
        .direct_issue(
            &cashier(),
            DirectIssueRequest::new(UserId::new(777), "x", amount(10)),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::UserNotFound(_))
    ));

    let err = env
        .engine()
        .direct_issue(
            &director(),
            DirectIssueRequest::new(director().id, "x", amount(10)),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::RoleNotPermitted { .. })
    ));

    assert_eq!(env.store.request_count(), 0);
}

// ============================================================================
// Failure Isolation
// ============================================================================

#[tokio::test]
async fn test_notification_failure_does_not_undo_approval() {
    let channel = Arc::new(FailingChannel::new());
    let env = TestEnv::with_channel(channel.clone());
    let pending = env.pending_request(10_000).await;

    let result = env.engine().approve(&director(), pending.id, None).await;
    let outcome = TransitionOutcome::from_result(result, "Заявка подтверждена");

    assert!(outcome.success);
    assert_eq!(outcome.request.unwrap().status, ExpenseStatus::Approved);
    assert_eq!(
        env.store.request(pending.id).unwrap().status,
        ExpenseStatus::Approved
    );
    assert_eq!(audit_actions(&env, pending.id), ["insert", "approved"]);

    // director (create), then requester and cashier (approve)
    assert_eq!(
        channel.attempts(),
        [
            director().chat_id.unwrap(),
            requester().chat_id.unwrap(),
            cashier().chat_id.unwrap()
        ]
    );
}

#[tokio::test]
async fn test_audit_failure_is_swallowed() {
    let env = TestEnv::new();
    let pending = env.pending_request(10_000).await;
    env.audit.set_failing(true);

    let approved = env
        .engine()
        .approve(&director(), pending.id, None)
        .await
        .unwrap();

    assert_eq!(approved.status, ExpenseStatus::Approved);
    assert_eq!(
        env.store.request(pending.id).unwrap().status,
        ExpenseStatus::Approved
    );
    assert_eq!(env.store.events(pending.id).len(), 1);
    assert_eq!(audit_actions(&env, pending.id), ["insert"]);
}

#[tokio::test]
async fn test_commit_failure_is_reported_generically() {
    let env = TestEnv::new();
    let pending = env.pending_request(10_000).await;
    let sent_before = env.channel.sent().len();
    env.store.fail_next_commit();

    let result = env.engine().approve(&director(), pending.id, None).await;
    assert!(result.as_ref().unwrap_err().is_infrastructure());

    let outcome = TransitionOutcome::from_result(result, "Заявка подтверждена");
    assert!(!outcome.success);
    assert_eq!(outcome.message.as_deref(), Some(INTERNAL_ERROR_MESSAGE));

    assert_eq!(
        env.store.request(pending.id).unwrap().status,
        ExpenseStatus::Pending
    );
    assert!(env.store.events(pending.id).is_empty());
    assert_eq!(env.channel.sent().len(), sent_before);

    // the row lock was released: a retry goes through
    env.engine()
        .approve(&director(), pending.id, None)
        .await
        .unwrap();
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_director_deletes_request_with_events() {
    let env = TestEnv::new();
    let approved = env.approved_request(5_000).await;
    let commits_before = env.store.commit_count();

    let deleted = env
        .engine()
        .delete(&director(), approved.id, Some("Дубликат заявки"))
        .await
        .unwrap();

    assert_eq!(deleted.id, approved.id);
    assert!(env.store.request(approved.id).is_none());
    assert!(env.store.events(approved.id).is_empty());
    assert_eq!(env.store.commit_count(), commits_before + 1);

    let entry = env.audit.entries_for(approved.id).pop().unwrap();
    assert_eq!(entry.action, "delete");
    assert_eq!(entry.payload["reason"], "Дубликат заявки");
    assert_eq!(entry.payload["old_status"], "approved");
}

#[tokio::test]
async fn test_requester_deletes_only_own_pending_request() {
    let env = TestEnv::new();

    let pending = env.pending_request(5_000).await;
    env.engine()
        .delete(&requester(), pending.id, None)
        .await
        .unwrap();
    assert!(env.store.request(pending.id).is_none());

    let approved = env.approved_request(5_000).await;
    let err = env
        .engine()
        .delete(&requester(), approved.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PermissionDenied { .. }));
    assert!(env.store.request(approved.id).is_some());

    let err = env
        .engine()
        .delete(&foreign_director(), approved.id, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::CompanyMismatch { .. })
    ));
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_queries_by_status_and_history() {
    let env = TestEnv::new();

    let pending = env.pending_request(1_000).await;
    let approved = env.approved_request(2_000).await;
    let issued = env.approved_request(3_000).await;
    env.engine()
        .issue(&cashier(), issued.id, Some(amount(2_500)))
        .await
        .unwrap();
    let declined = env.pending_request(4_000).await;
    env.engine()
        .decline(&director(), declined.id, None)
        .await
        .unwrap();

    let queries = ExpenseQueryService::new(&env.ctx);

    let pending_ids: Vec<_> = queries
        .pending_for_company(COMPANY)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(pending_ids, [pending.id]);

    let approved_ids: Vec<_> = queries
        .approved_for_company(COMPANY)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(approved_ids, [approved.id]);

    let history = queries.history_for_company(COMPANY, None).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, issued.id);
    assert_eq!(history[0].amount, amount(2_500));
    assert_eq!(history[0].requested_amount, amount(3_000));
    assert_eq!(history[1].id, approved.id);

    let limited = queries.history_for_company(COMPANY, Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);

    assert!(queries
        .history_for_company(OTHER_COMPANY, None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_get_and_audit_trail() {
    let env = TestEnv::new();
    let approved = env.approved_request(9_000).await;
    env.engine()
        .issue(&cashier(), approved.id, None)
        .await
        .unwrap();

    let queries = ExpenseQueryService::new(&env.ctx);

    let details = queries.get(approved.id).await.unwrap();
    assert_eq!(details.request.status, ExpenseStatus::Issued);
    let actions: Vec<_> = details.events.iter().map(|e| e.action).collect();
    assert_eq!(actions, [ApprovalAction::Approve, ApprovalAction::Issue]);

    let trail: Vec<_> = queries
        .audit_trail(approved.id)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(trail, ["insert", "approved", "issued"]);

    let err = queries.get(ExpenseId::new(404)).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}

// ============================================================================
// Status Invariant
// ============================================================================

#[tokio::test]
async fn test_status_never_returns_to_pending() {
    let env = TestEnv::new();
    let approved = env.approved_request(1_000).await;

    assert!(env
        .engine()
        .approve(&director(), approved.id, None)
        .await
        .unwrap_err()
        .is_stale_state());
    assert!(env
        .engine()
        .decline(&director(), approved.id, None)
        .await
        .unwrap_err()
        .is_stale_state());

    env.engine()
        .issue(&cashier(), approved.id, None)
        .await
        .unwrap();
    assert!(env
        .engine()
        .issue(&cashier(), approved.id, None)
        .await
        .unwrap_err()
        .is_stale_state());

    let stored = env.store.request(approved.id).unwrap();
    assert_eq!(stored.status, ExpenseStatus::Issued);
    let actions: Vec<_> = env
        .store
        .events(approved.id)
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(actions, [ApprovalAction::Approve, ApprovalAction::Issue]);
}
