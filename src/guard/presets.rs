//! 预配置的 Guard
//!
//! 常用 资源/操作 组合的工厂函数，全部构建在通用 Guard 之上。

use super::{PermissionGuard, RoleGuard, WorkspaceGuard};
use crate::rbac::{Action, PermissionQuery, Resource, Role, Scope};

/// 仅管理员
pub fn admin_only() -> RoleGuard {
    RoleGuard::new().require_role(Role::Admin)
}

/// 主管及以上
pub fn supervisor_or_above() -> RoleGuard {
    RoleGuard::new().require_minimum_role(Role::Supervisor)
}

/// 任意工作区成员
pub fn member_or_above() -> RoleGuard {
    RoleGuard::new().require_minimum_role(Role::Member)
}

/// 可以创建任务
pub fn can_create_task() -> PermissionGuard {
    PermissionGuard::new().require_permission((Resource::Task, Action::Create))
}

/// 可以在给定范围内更新任务
pub fn can_update_task(scope: Scope) -> PermissionGuard {
    PermissionGuard::new().require_permission((Resource::Task, Action::Update, scope))
}

/// 可以在给定范围内删除任务
pub fn can_delete_task(scope: Scope) -> PermissionGuard {
    PermissionGuard::new().require_permission((Resource::Task, Action::Delete, scope))
}

/// 可以分配任务
pub fn can_assign_task() -> PermissionGuard {
    PermissionGuard::new().require_permission((Resource::Task, Action::Assign))
}

/// 可以管理团队（更新并分配成员）
pub fn can_manage_team() -> PermissionGuard {
    PermissionGuard::new().require_all_permissions([
        PermissionQuery::new(Resource::Team, Action::Update),
        PermissionQuery::new(Resource::Team, Action::Assign),
    ])
}

/// 可以管理工作区内的用户
pub fn can_manage_users() -> PermissionGuard {
    PermissionGuard::new().require_all_permissions([
        PermissionQuery::scoped(Resource::User, Action::Update, Scope::Workspace),
        PermissionQuery::scoped(Resource::User, Action::Assign, Scope::Workspace),
    ])
}

/// 可以移除用户
pub fn can_remove_users() -> PermissionGuard {
    PermissionGuard::new().require_permission((Resource::User, Action::Delete))
}

/// 可以修改工作区设置
pub fn can_manage_workspace() -> PermissionGuard {
    PermissionGuard::new().require_permission((Resource::Workspace, Action::Update))
}

/// 需要选中工作区
pub fn requires_workspace() -> WorkspaceGuard {
    WorkspaceGuard::new()
}
