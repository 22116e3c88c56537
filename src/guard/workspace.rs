//! 工作区组合 Guard
//!
//! 按固定顺序短路评估，返回第一个失败：
//!
//! 1. 需要工作区
//! 2. 指定工作区的访问
//! 3. 角色
//! 4. 权限
//! 5. 自定义校验

use super::{
    AccessDenial, DenialCategory, ErrorPanelConfig, Guard, GuardDecision, GuardOptions,
    PermissionRequirements, RoleRequirements, Validator,
};
use crate::context::AccessContext;
use crate::rbac::{PermissionQuery, Role, RoleRequirement};
use std::fmt;
use std::sync::Arc;

const DEFAULT_CUSTOM_MESSAGE: &str = "You do not meet the requirements to view this content.";

/// 工作区 Guard
///
/// 默认要求存在选中的工作区。
///
/// # 示例
///
/// ```rust
/// use tasknest_access::{AccessContext, WorkspaceRef};
/// use tasknest_access::guard::{DenialCategory, Guard, WorkspaceGuard};
/// use tasknest_access::rbac::Role;
///
/// let guard = WorkspaceGuard::new().require_minimum_role(Role::Supervisor);
///
/// let no_workspace = AccessContext::new(Some(Role::Admin));
/// assert_eq!(guard.check(&no_workspace).category(), Some(DenialCategory::NoWorkspace));
///
/// let ok = no_workspace.with_workspace(WorkspaceRef::new("ws_1", "Acme"));
/// assert!(guard.check(&ok).is_granted());
/// ```
#[derive(Clone)]
pub struct WorkspaceGuard {
    require_workspace: bool,
    workspace_id: Option<String>,
    roles: RoleRequirements,
    permissions: PermissionRequirements,
    custom_validation: Option<Validator>,
    custom_message: Option<String>,
    options: GuardOptions,
}

impl Default for WorkspaceGuard {
    fn default() -> Self {
        Self {
            require_workspace: true,
            workspace_id: None,
            roles: RoleRequirements::default(),
            permissions: PermissionRequirements::default(),
            custom_validation: None,
            custom_message: None,
            options: GuardOptions::default(),
        }
    }
}

impl WorkspaceGuard {
    /// 创建 Guard（默认要求选中工作区）
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否要求选中工作区
    pub fn require_workspace(mut self, required: bool) -> Self {
        self.require_workspace = required;
        self
    }

    /// 要求可以访问指定的工作区
    pub fn require_workspace_access(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    /// 要求具体角色或可接受的角色列表
    pub fn require_role(mut self, requirement: impl Into<RoleRequirement>) -> Self {
        self.roles.set_requirement(requirement.into());
        self
    }

    /// 要求最低角色
    pub fn require_minimum_role(mut self, minimum: Role) -> Self {
        self.roles.minimum = Some(minimum);
        self
    }

    /// 要求单个权限
    pub fn require_permission(mut self, query: impl Into<PermissionQuery>) -> Self {
        self.permissions.permission = Some(query.into());
        self
    }

    /// 要求至少一个权限
    pub fn require_any_permission(
        mut self,
        queries: impl IntoIterator<Item = PermissionQuery>,
    ) -> Self {
        self.permissions.any_of = Some(queries.into_iter().collect());
        self
    }

    /// 要求全部权限
    pub fn require_all_permissions(
        mut self,
        queries: impl IntoIterator<Item = PermissionQuery>,
    ) -> Self {
        self.permissions.all_of = Some(queries.into_iter().collect());
        self
    }

    /// 自定义校验
    pub fn custom_validation<F>(mut self, validate: F) -> Self
    where
        F: Fn(&AccessContext) -> bool + Send + Sync + 'static,
    {
        self.custom_validation = Some(Arc::new(validate));
        self
    }

    /// 自定义校验失败时的说明
    pub fn custom_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    /// 拒绝且无 fallback 时是否显示错误面板
    pub fn show_error(mut self, show: bool) -> Self {
        self.options.show_error = show;
        self
    }

    /// 设置错误面板配置
    pub fn panel_config(mut self, config: ErrorPanelConfig) -> Self {
        self.options.panel = config;
        self
    }

    fn check_workspace(&self, ctx: &AccessContext) -> Option<AccessDenial> {
        if self.require_workspace && !ctx.has_workspace() {
            return Some(AccessDenial::new(
                DenialCategory::NoWorkspace,
                "Select a workspace to continue.",
            ));
        }

        if let Some(id) = &self.workspace_id {
            if !ctx.can_access_workspace(id) {
                return Some(
                    AccessDenial::new(
                        DenialCategory::WorkspaceAccess,
                        "You do not have access to this workspace.",
                    )
                    .with_required(vec![id.clone()]),
                );
            }
        }

        None
    }

    fn check_custom(&self, ctx: &AccessContext) -> Option<AccessDenial> {
        let validate = self.custom_validation.as_ref()?;
        if validate(ctx) {
            return None;
        }
        let message = self
            .custom_message
            .as_deref()
            .unwrap_or(DEFAULT_CUSTOM_MESSAGE);
        Some(AccessDenial::new(DenialCategory::CustomValidation, message))
    }
}

impl Guard for WorkspaceGuard {
    fn check(&self, ctx: &AccessContext) -> GuardDecision {
        let denial = self
            .check_workspace(ctx)
            .or_else(|| self.roles.check(ctx.role()))
            .or_else(|| self.permissions.check(&ctx.checker()))
            .or_else(|| self.check_custom(ctx));
        GuardDecision::from_denial(denial)
    }

    fn options(&self) -> &GuardOptions {
        &self.options
    }
}

impl fmt::Debug for WorkspaceGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceGuard")
            .field("require_workspace", &self.require_workspace)
            .field("workspace_id", &self.workspace_id)
            .field("roles", &self.roles)
            .field("permissions", &self.permissions)
            .field("custom_validation", &self.custom_validation.is_some())
            .field("custom_message", &self.custom_message)
            .field("options", &self.options)
            .finish()
    }
}
