//! # taskNest Access
//!
//! taskNest 工作区的角色与权限引擎。
//!
//! ## 功能特性
//!
//! - **权限目录**: 每个角色（member / supervisor / admin）静态的 grant 表
//! - **权限检查**: 带范围包含语义的权限匹配（workspace ⊇ team / own）
//! - **角色校验**: 角色层级、最低角色、角色分配资格
//! - **展示文本**: 角色名称、描述、颜色与权限描述
//! - **Guard**: 角色、权限、工作区 Guard 及其组合，拒绝时渲染 fallback、空或错误面板
//! - **内联渲染**: 以隐藏、禁用或替换的方式门控单个界面元素
//! - **审计日志**: 记录访问拒绝与角色分配
//!
//! ## Features
//!
//! - `presets` - 预配置的 Guard 工厂函数（默认启用）
//! - `full` - 启用所有功能
//!
//! ## 权限检查示例
//!
//! ```rust
//! use tasknest_access::rbac::{Action, PermissionChecker, Resource, Role, Scope};
//!
//! let member = PermissionChecker::for_role(Some(Role::Member));
//! assert!(member.has_permission(Resource::Task, Action::Update, Some(Scope::Own)));
//! assert!(!member.has_permission(Resource::Task, Action::Update, Some(Scope::Team)));
//!
//! // 没有角色时拒绝一切
//! let nobody = PermissionChecker::for_role(None);
//! assert!(!nobody.has_permission(Resource::Workspace, Action::Read, None));
//! ```
//!
//! ## Guard 示例
//!
//! ```rust
//! use tasknest_access::{AccessContext, WorkspaceRef};
//! use tasknest_access::guard::{Guard, WorkspaceGuard};
//! use tasknest_access::rbac::{Action, PermissionQuery, Resource, Role};
//!
//! let guard = WorkspaceGuard::new()
//!     .require_permission(PermissionQuery::new(Resource::Team, Action::Create));
//!
//! let ctx = AccessContext::new(Some(Role::Supervisor))
//!     .with_workspace(WorkspaceRef::new("ws_1", "Acme"));
//!
//! let out = guard.render(&ctx, || "new team form", None);
//! assert!(out.is_children());
//! ```

pub mod audit;
pub mod context;
pub mod error;
pub mod guard;
pub mod rbac;
pub mod render;

pub use context::{AccessContext, WorkspaceRef};
pub use error::{Error, Result};

// ============================================================================
// RBAC 相关导出
// ============================================================================

pub use rbac::{
    Action, Permission, PermissionChecker, PermissionQuery, Resource, Role, RoleRequirement,
    Scope,
};

// ============================================================================
// Guard 与渲染相关导出
// ============================================================================

pub use guard::{
    AccessDenial, DenialCategory, ErrorPanel, Guard, GuardDecision, GuardStack, PermissionGuard,
    Rendered, RoleGuard, WorkspaceGuard, check_guards,
};
pub use render::{PermissionRenderer, RenderMode, RendererConfig};

// ============================================================================
// 审计相关导出
// ============================================================================

pub use audit::{AccessEvent, AuditLogger, InMemoryAuditLogger};
