//! 角色与权限的展示文本
//!
//! 这些字符串只用于构造错误面板文本，不属于任何线上协议。

use super::catalog::get_permissions_for_role;
use super::permission::{Permission, PermissionQuery};
use super::role::Role;
use serde::Serialize;

/// 角色展示信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDisplay {
    /// 显示名称
    pub label: &'static str,
    /// 描述
    pub description: &'static str,
    /// 徽章颜色（十六进制）
    pub color: &'static str,
}

impl Role {
    /// 获取角色展示信息
    pub fn display(self) -> RoleDisplay {
        match self {
            Role::Member => RoleDisplay {
                label: "Member",
                description: "Can create and manage their own tasks and view their team",
                color: "#3b82f6",
            },
            Role::Supervisor => RoleDisplay {
                label: "Supervisor",
                description: "Can manage tasks and teams across the workspace",
                color: "#8b5cf6",
            },
            Role::Admin => RoleDisplay {
                label: "Admin",
                description: "Full access to the workspace, its members and settings",
                color: "#ef4444",
            },
        }
    }
}

/// 角色显示名称
pub fn role_label(role: Role) -> &'static str {
    role.display().label
}

/// 角色描述
pub fn role_description(role: Role) -> &'static str {
    role.display().description
}

/// 角色颜色
pub fn role_color(role: Role) -> &'static str {
    role.display().color
}

/// 权限描述，格式为 `"<action> <resource> (<scope>)"`
///
/// ```rust
/// use tasknest_access::rbac::{Action, Permission, Resource, Scope, permission_description};
///
/// let perm = Permission::new(Resource::Task, Action::Update, Scope::Own);
/// assert_eq!(permission_description(&perm), "update task (own)");
/// ```
pub fn permission_description(permission: &Permission) -> String {
    format!(
        "{} {} ({})",
        permission.action, permission.resource, permission.scope
    )
}

/// 查询描述；未指定范围时省略括号部分
pub fn query_description(query: &PermissionQuery) -> String {
    match query.scope {
        Some(scope) => format!("{} {} ({})", query.action, query.resource, scope),
        None => format!("{} {}", query.action, query.resource),
    }
}

/// 列出角色所有 grant 的描述
pub fn describe_role_permissions(role: Role) -> Vec<String> {
    get_permissions_for_role(role)
        .iter()
        .map(permission_description)
        .collect()
}
