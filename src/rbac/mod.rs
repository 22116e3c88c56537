//! # RBAC 模块
//!
//! taskNest 工作区的权限引擎：
//!
//! - **权限目录**: 静态的 角色 -> (resource, action, scope) grant 表
//! - **权限检查**: 带范围包含语义的 grant 匹配
//! - **角色校验**: 层级比较、角色分配资格
//! - **展示文本**: 角色名称、描述、颜色与权限描述
//!
//! ## 基本概念
//!
//! - **Role（角色）**: member < supervisor < admin
//! - **Permission（grant）**: 角色被允许以某个范围对某类资源执行某个操作
//! - **Scope（范围）**: own < team < workspace；workspace 范围的 grant 满足任何更窄的查询
//!
//! ## 使用示例
//!
//! ```rust
//! use tasknest_access::rbac::{
//!     Action, PermissionChecker, Resource, Role, Scope, can_assign_role, has_minimum_role,
//! };
//!
//! let supervisor = PermissionChecker::for_role(Some(Role::Supervisor));
//! assert!(supervisor.has_permission(Resource::Task, Action::Assign, Some(Scope::Team)));
//! assert!(!supervisor.has_permission(Resource::User, Action::Delete, None));
//!
//! assert!(has_minimum_role(Some(Role::Supervisor), Role::Member));
//! assert!(!can_assign_role(Some(Role::Supervisor), Role::Member));
//! ```

mod catalog;
mod checker;
mod display;
mod permission;
mod role;

pub use catalog::{get_permissions_for_role, get_permissions_for_role_name, permissions_for};
pub use checker::PermissionChecker;
pub use display::{
    RoleDisplay, describe_role_permissions, permission_description, query_description,
    role_color, role_description, role_label,
};
pub use permission::{Action, Permission, PermissionQuery, Resource, Scope};
pub use role::{
    Role, RoleRequirement, can_assign_role, get_assignable_roles, get_role_level, has_minimum_role,
    has_role, is_valid_role,
};
