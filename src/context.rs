//! 访问上下文模块
//!
//! 显式传递的“当前角色”快照。当前角色由外部的工作区成员关系模块提供，
//! 可能在切换工作区或被管理员修改角色时改变；每个 [`AccessContext`] 只是某一时刻的快照，
//! 所有检查都以它为参数，不使用任何全局或线程局部状态。

use crate::audit::{AccessEvent, AuditLogger};
use crate::error::{ContextError, Error, Result, ValidationError};
use crate::rbac::{PermissionChecker, PermissionQuery, Role, RoleRequirement};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 工作区引用
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceRef {
    /// 工作区 ID
    pub id: String,
    /// 工作区名称
    pub name: String,
}

impl WorkspaceRef {
    /// 创建工作区引用
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// 访问上下文
///
/// # 示例
///
/// ```rust
/// use tasknest_access::{AccessContext, WorkspaceRef};
/// use tasknest_access::rbac::{Action, PermissionQuery, Resource, Role};
///
/// let ctx = AccessContext::new(Some(Role::Supervisor))
///     .with_user_id("user_42")
///     .with_workspace(WorkspaceRef::new("ws_1", "Acme"));
///
/// assert!(ctx.has_permission(PermissionQuery::new(Resource::Team, Action::Create)));
/// assert_eq!(ctx.require_workspace().unwrap().id, "ws_1");
/// ```
#[derive(Clone, Default)]
pub struct AccessContext {
    role: Option<Role>,
    user_id: Option<String>,
    current_workspace: Option<WorkspaceRef>,
    accessible_workspaces: Vec<WorkspaceRef>,
    audit_logger: Option<Arc<dyn AuditLogger>>,
}

impl AccessContext {
    /// 创建上下文
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }

    /// 没有角色的上下文
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 设置角色
    pub fn with_role(mut self, role: Option<Role>) -> Self {
        self.role = role;
        self
    }

    /// 设置用户 ID
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// 设置当前工作区（同时视为可访问）
    pub fn with_workspace(mut self, workspace: WorkspaceRef) -> Self {
        if !self.accessible_workspaces.iter().any(|w| w.id == workspace.id) {
            self.accessible_workspaces.push(workspace.clone());
        }
        self.current_workspace = Some(workspace);
        self
    }

    /// 设置用户可访问的工作区列表
    pub fn with_accessible_workspaces(
        mut self,
        workspaces: impl IntoIterator<Item = WorkspaceRef>,
    ) -> Self {
        for workspace in workspaces {
            if !self.accessible_workspaces.iter().any(|w| w.id == workspace.id) {
                self.accessible_workspaces.push(workspace);
            }
        }
        self
    }

    /// 挂接审计日志记录器
    pub fn with_audit_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.audit_logger = Some(logger);
        self
    }

    /// 当前角色
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// 用户 ID
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// 当前工作区
    pub fn workspace(&self) -> Option<&WorkspaceRef> {
        self.current_workspace.as_ref()
    }

    /// 可访问的工作区
    pub fn accessible_workspaces(&self) -> &[WorkspaceRef] {
        &self.accessible_workspaces
    }

    /// 是否有选中的工作区
    pub fn has_workspace(&self) -> bool {
        self.current_workspace.is_some()
    }

    /// 检查是否可以访问指定工作区
    pub fn can_access_workspace(&self, workspace_id: &str) -> bool {
        self.accessible_workspaces.iter().any(|w| w.id == workspace_id)
    }

    /// 为当前角色构建权限检查器
    pub fn checker(&self) -> PermissionChecker {
        PermissionChecker::for_role(self.role)
    }

    /// 检查当前角色是否满足权限查询
    pub fn has_permission(&self, query: impl Into<PermissionQuery>) -> bool {
        self.checker().allows(&query.into())
    }

    /// 检查当前角色是否属于要求的角色集合
    pub fn has_role(&self, required: impl Into<RoleRequirement>) -> bool {
        crate::rbac::has_role(self.role, required)
    }

    /// 检查当前角色是否不低于最低要求
    pub fn has_minimum_role(&self, minimum: Role) -> bool {
        crate::rbac::has_minimum_role(self.role, minimum)
    }

    /// 获取当前工作区
    ///
    /// 工作区范围的 helper 使用此方法；没有工作区时返回
    /// [`ContextError::NoWorkspace`]。这是调用方的使用错误，不应作为正常控制流。
    pub fn require_workspace(&self) -> Result<&WorkspaceRef> {
        self.current_workspace
            .as_ref()
            .ok_or(Error::Context(ContextError::NoWorkspace))
    }

    /// 获取当前角色，没有角色时返回 [`ContextError::NoRole`]
    pub fn require_role(&self) -> Result<Role> {
        self.role.ok_or(Error::Context(ContextError::NoRole))
    }

    /// 解析来自外部的角色字符串
    ///
    /// 无效输入会被记录到审计日志。
    pub fn parse_role(&self, value: &str) -> Result<Role> {
        match Role::parse(value) {
            Some(role) => Ok(role),
            None => {
                tracing::debug!(value, "rejected invalid role input");
                self.record(AccessEvent::invalid_role_input(value));
                Err(ValidationError::UnknownRole(value.to_string()).into())
            }
        }
    }

    /// 记录审计事件，自动补充用户、工作区与角色信息
    pub fn record(&self, event: AccessEvent) {
        let Some(logger) = &self.audit_logger else {
            return;
        };

        let mut event = event;
        if event.user_id.is_none() {
            event.user_id = self.user_id.clone();
        }
        if event.workspace_id.is_none() {
            event.workspace_id = self.current_workspace.as_ref().map(|w| w.id.clone());
        }
        if event.role.is_none() {
            event.role = self.role;
        }
        logger.log(event);
    }
}

impl fmt::Debug for AccessContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessContext")
            .field("role", &self.role)
            .field("user_id", &self.user_id)
            .field("current_workspace", &self.current_workspace)
            .field("accessible_workspaces", &self.accessible_workspaces)
            .field("audit_logger", &self.audit_logger.is_some())
            .finish()
    }
}
