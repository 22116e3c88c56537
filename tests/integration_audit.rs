//! 集成测试：审计日志
//!
//! 测试访问拒绝、角色分配与无效角色输入的记录和查询。

use std::sync::Arc;

use chrono::{Duration, Utc};
use tasknest_access::audit::{
    AccessEvent, AuditLogger, EventSeverity, EventType, InMemoryAuditLogger, NoOpAuditLogger,
    record_role_assignment,
};
use tasknest_access::guard::{DenialCategory, Guard, GuardStack, RoleGuard, WorkspaceGuard};
use tasknest_access::rbac::{Action, PermissionQuery, Resource, Role};
use tasknest_access::render::PermissionRenderer;
use tasknest_access::{AccessContext, WorkspaceRef};

fn context(role: Option<Role>, logger: &Arc<InMemoryAuditLogger>) -> AccessContext {
    AccessContext::new(role)
        .with_user_id("user_7")
        .with_workspace(WorkspaceRef::new("ws_1", "Acme"))
        .with_audit_logger(logger.clone())
}

/// Guard 拒绝会记录事件，并补充上下文信息
#[test]
fn test_guard_denial_is_recorded() {
    let logger = Arc::new(InMemoryAuditLogger::new());
    let ctx = context(Some(Role::Member), &logger);

    let guard = RoleGuard::new().require_role(Role::Admin);
    let _ = guard.render(&ctx, || "billing", None);

    let events = logger.get_events_by_type(&EventType::AccessDenied);
    assert_eq!(events.len(), 1);

    let event = &events[0];
    assert!(event.is_denial());
    assert_eq!(event.category, Some(DenialCategory::InsufficientRole));
    assert_eq!(event.user_id.as_deref(), Some("user_7"));
    assert_eq!(event.workspace_id.as_deref(), Some("ws_1"));
    assert_eq!(event.role, Some(Role::Member));
    assert_eq!(event.details.get("required").map(String::as_str), Some("Admin"));
}

/// 通过的 Guard 不产生事件
#[test]
fn test_granted_guard_records_nothing() {
    let logger = Arc::new(InMemoryAuditLogger::new());
    let ctx = context(Some(Role::Admin), &logger);

    let guards = GuardStack::new()
        .workspace(WorkspaceGuard::new())
        .role(RoleGuard::new().require_role(Role::Admin));
    assert!(guards.render(&ctx, || (), None).is_children());
    assert_eq!(logger.event_count(), 0);
}

/// 组合只记录失败的那一层
#[test]
fn test_stack_records_failing_layer_only() {
    let logger = Arc::new(InMemoryAuditLogger::new());
    let ctx = AccessContext::new(Some(Role::Member)).with_audit_logger(logger.clone());

    let guards = GuardStack::new()
        .workspace(WorkspaceGuard::new())
        .role(RoleGuard::new().require_role(Role::Admin));
    let _ = guards.render(&ctx, || (), Some(()));

    assert_eq!(logger.event_count(), 1);
    assert_eq!(
        logger.get_events_by_category(DenialCategory::NoWorkspace).len(),
        1
    );
}

/// 内联渲染是静默的，不记录事件
#[test]
fn test_inline_render_is_silent() {
    let logger = Arc::new(InMemoryAuditLogger::new());
    let ctx = context(Some(Role::Member), &logger);

    let renderer =
        PermissionRenderer::permission(PermissionQuery::new(Resource::User, Action::Delete));
    assert!(renderer.render(&ctx, || (), None).is_nothing());
    assert_eq!(logger.event_count(), 0);
}

/// 角色分配记录
#[test]
fn test_role_assignment_events() {
    let logger = Arc::new(InMemoryAuditLogger::new());

    let admin = context(Some(Role::Admin), &logger);
    assert!(record_role_assignment(&admin, "user_9", Role::Supervisor));

    let supervisor = context(Some(Role::Supervisor), &logger);
    assert!(!record_role_assignment(&supervisor, "user_9", Role::Admin));

    let assigned = logger.get_events_by_type(&EventType::RoleAssigned);
    assert_eq!(assigned.len(), 1);
    assert_eq!(
        assigned[0].details.get("assigned_role").map(String::as_str),
        Some("supervisor")
    );

    let rejected = logger.get_events_by_type(&EventType::RoleAssignmentRejected);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].severity, EventSeverity::Warning);
    assert_eq!(rejected[0].role, Some(Role::Supervisor));
}

/// 无效的角色输入
#[test]
fn test_invalid_role_input() {
    let logger = Arc::new(InMemoryAuditLogger::new());
    let ctx = context(Some(Role::Admin), &logger);

    assert_eq!(ctx.parse_role("supervisor").unwrap(), Role::Supervisor);
    assert!(ctx.parse_role("owner").is_err());

    let events = logger.get_events_by_type(&EventType::InvalidRoleInput);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].details.get("value").map(String::as_str), Some("owner"));
}

/// 查询与统计
#[test]
fn test_queries_and_stats() {
    let logger = InMemoryAuditLogger::new();
    logger.log_batch(vec![
        AccessEvent::role_assigned("u1", Role::Member).with_user_id("admin_1"),
        AccessEvent::invalid_role_input("root").with_workspace_id("ws_2"),
        AccessEvent::custom("export", EventSeverity::Info).with_user_id("admin_1"),
    ]);

    assert_eq!(logger.get_events_by_user("admin_1").len(), 2);
    assert_eq!(logger.get_events_by_workspace("ws_2").len(), 1);
    assert_eq!(logger.get_events_by_severity(EventSeverity::Warning).len(), 1);
    assert_eq!(logger.get_recent_events(2).len(), 2);

    let now = Utc::now();
    let in_range =
        logger.get_events_in_range(now - Duration::minutes(1), now + Duration::minutes(1));
    assert_eq!(in_range.len(), 3);

    let stats = logger.get_stats();
    assert_eq!(stats.total_events, 3);
    assert_eq!(stats.denied_count, 0);

    logger.clear();
    assert_eq!(logger.event_count(), 0);
}

/// 事件上限
#[test]
fn test_max_events() {
    let logger = InMemoryAuditLogger::with_max_events(2);
    for value in ["a", "b", "c"] {
        logger.log(AccessEvent::invalid_role_input(value));
    }

    let events = logger.get_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].details.get("value").map(String::as_str), Some("b"));
}

/// NoOp 记录器
#[test]
fn test_noop_logger() {
    let ctx = AccessContext::new(Some(Role::Member))
        .with_audit_logger(Arc::new(NoOpAuditLogger::new()));
    let guard = RoleGuard::new().require_role(Role::Admin);
    assert!(guard.check(&ctx).is_denied());
    assert!(guard.render(&ctx, || (), None).is_error_panel());
}
