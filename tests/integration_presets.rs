//! 集成测试：预配置 Guard
//!
//! 测试常用 资源/操作 组合在各角色下的结果。

#![cfg(feature = "presets")]

use tasknest_access::guard::presets::{
    admin_only, can_assign_task, can_create_task, can_delete_task, can_manage_team,
    can_manage_users, can_manage_workspace, can_remove_users, can_update_task, member_or_above,
    requires_workspace, supervisor_or_above,
};
use tasknest_access::guard::{DenialCategory, Guard, GuardStack};
use tasknest_access::rbac::{Role, Scope};
use tasknest_access::{AccessContext, WorkspaceRef};

fn ctx(role: Role) -> AccessContext {
    AccessContext::new(Some(role)).with_workspace(WorkspaceRef::new("ws_1", "Acme"))
}

/// 在三个角色下检查预设，`expected` 依次对应 member、supervisor、admin
fn assert_matrix(name: &str, guard: impl Guard, expected: [bool; 3]) {
    for (role, want) in Role::ALL.into_iter().zip(expected) {
        assert_eq!(guard.check(&ctx(role)).is_granted(), want, "{} for {}", name, role);
    }
}

/// 每个角色能通过的预设
#[test]
fn test_preset_matrix() {
    assert_matrix("admin_only", admin_only(), [false, false, true]);
    assert_matrix("supervisor_or_above", supervisor_or_above(), [false, true, true]);
    assert_matrix("member_or_above", member_or_above(), [true, true, true]);
    assert_matrix("can_create_task", can_create_task(), [true, true, true]);
    assert_matrix(
        "can_update_task(workspace)",
        can_update_task(Scope::Workspace),
        [false, true, true],
    );
    assert_matrix("can_delete_task(own)", can_delete_task(Scope::Own), [true, true, true]);
    assert_matrix("can_assign_task", can_assign_task(), [false, true, true]);
    assert_matrix("can_manage_team", can_manage_team(), [false, true, true]);
    assert_matrix("can_manage_users", can_manage_users(), [false, false, true]);
    assert_matrix("can_remove_users", can_remove_users(), [false, false, true]);
    assert_matrix("can_manage_workspace", can_manage_workspace(), [false, false, true]);
    assert_matrix("requires_workspace", requires_workspace(), [true, true, true]);
}

/// 预设可以组合
#[test]
fn test_presets_compose() {
    let guards = GuardStack::new()
        .workspace(requires_workspace())
        .role(supervisor_or_above())
        .permission(can_remove_users());

    assert_eq!(
        guards.check(&AccessContext::new(Some(Role::Admin))).category(),
        Some(DenialCategory::NoWorkspace)
    );
    assert_eq!(
        guards.check(&ctx(Role::Supervisor)).category(),
        Some(DenialCategory::InsufficientPermission)
    );
    assert!(guards.check(&ctx(Role::Admin)).is_granted());
}
