//! 权限目录模块
//!
//! 静态的 角色 -> grant 列表 映射表。
//!
//! 目录在编译期确定，运行期只读。修改时必须保持单调性：对于授予 member 的每个
//! (resource, action)，supervisor 和 admin 也必须以相同或更宽的范围拥有它。

use super::permission::{Action, Permission, Resource, Scope};
use super::role::Role;

const fn grant(resource: Resource, action: Action, scope: Scope) -> Permission {
    Permission::new(resource, action, scope)
}

const MEMBER_PERMISSIONS: &[Permission] = &[
    grant(Resource::Task, Action::Create, Scope::Own),
    grant(Resource::Task, Action::Read, Scope::Team),
    grant(Resource::Task, Action::Update, Scope::Own),
    grant(Resource::Task, Action::Delete, Scope::Own),
    grant(Resource::Team, Action::Read, Scope::Team),
    grant(Resource::User, Action::Read, Scope::Team),
    grant(Resource::User, Action::Update, Scope::Own),
    grant(Resource::Workspace, Action::Read, Scope::Workspace),
];

// supervisor 不能删除用户
const SUPERVISOR_PERMISSIONS: &[Permission] = &[
    grant(Resource::Task, Action::Create, Scope::Workspace),
    grant(Resource::Task, Action::Read, Scope::Workspace),
    grant(Resource::Task, Action::Update, Scope::Workspace),
    grant(Resource::Task, Action::Assign, Scope::Workspace),
    grant(Resource::Task, Action::Delete, Scope::Team),
    grant(Resource::Task, Action::Delete, Scope::Own),
    grant(Resource::Team, Action::Create, Scope::Workspace),
    grant(Resource::Team, Action::Read, Scope::Workspace),
    grant(Resource::Team, Action::Update, Scope::Team),
    grant(Resource::Team, Action::Assign, Scope::Team),
    grant(Resource::User, Action::Read, Scope::Workspace),
    grant(Resource::User, Action::Update, Scope::Own),
    grant(Resource::Workspace, Action::Read, Scope::Workspace),
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    grant(Resource::Task, Action::Create, Scope::Workspace),
    grant(Resource::Task, Action::Read, Scope::Workspace),
    grant(Resource::Task, Action::Update, Scope::Workspace),
    grant(Resource::Task, Action::Delete, Scope::Workspace),
    grant(Resource::Task, Action::Assign, Scope::Workspace),
    grant(Resource::Team, Action::Create, Scope::Workspace),
    grant(Resource::Team, Action::Read, Scope::Workspace),
    grant(Resource::Team, Action::Update, Scope::Workspace),
    grant(Resource::Team, Action::Delete, Scope::Workspace),
    grant(Resource::Team, Action::Assign, Scope::Workspace),
    grant(Resource::User, Action::Create, Scope::Workspace),
    grant(Resource::User, Action::Read, Scope::Workspace),
    grant(Resource::User, Action::Update, Scope::Workspace),
    grant(Resource::User, Action::Delete, Scope::Workspace),
    grant(Resource::User, Action::Assign, Scope::Workspace),
    grant(Resource::Workspace, Action::Create, Scope::Workspace),
    grant(Resource::Workspace, Action::Read, Scope::Workspace),
    grant(Resource::Workspace, Action::Update, Scope::Workspace),
    grant(Resource::Workspace, Action::Delete, Scope::Workspace),
    grant(Resource::Workspace, Action::Assign, Scope::Workspace),
];

/// 获取角色的 grant 列表
///
/// ```rust
/// use tasknest_access::rbac::{Role, get_permissions_for_role};
///
/// assert!(!get_permissions_for_role(Role::Member).is_empty());
/// ```
pub fn get_permissions_for_role(role: Role) -> &'static [Permission] {
    match role {
        Role::Member => MEMBER_PERMISSIONS,
        Role::Supervisor => SUPERVISOR_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
    }
}

/// 按字符串角色名获取 grant 列表
///
/// 未知角色返回空列表：调用方必须把“没有 grant”视为“无权访问”，而不是错误。
pub fn get_permissions_for_role_name(role: &str) -> &'static [Permission] {
    permissions_for(Role::parse(role))
}

/// 可选角色的 grant 列表，缺失角色得到空列表
pub fn permissions_for(role: Option<Role>) -> &'static [Permission] {
    match role {
        Some(role) => get_permissions_for_role(role),
        None => &[],
    }
}
