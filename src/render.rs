//! 内联权限渲染
//!
//! 与 Guard 使用相同的要求词汇（权限、角色、最低角色、自定义校验，全部 AND），
//! 但不产生错误面板，用于隐藏单个按钮这类静默的内联门控。失败时的行为由 [`RenderMode`] 决定：
//!
//! - `Hide`: 不渲染，或渲染 fallback
//! - `Disable`: 渲染子内容，但不可交互且降低透明度
//! - `Replace`: 只渲染 fallback，绝不同时渲染子内容

use crate::context::AccessContext;
use crate::error::{ConfigError, Result};
use crate::guard::{DisabledContent, PermissionRequirements, Rendered, RoleRequirements, Validator};
use crate::rbac::{PermissionQuery, Role, RoleRequirement};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 失败时的渲染方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// 隐藏
    #[default]
    Hide,
    /// 禁用
    Disable,
    /// 替换为 fallback
    Replace,
}

/// 渲染配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// 禁用状态的透明度，取值 0.0..=1.0
    pub disabled_opacity: f32,
    /// 禁用状态附加的样式类
    pub disabled_class: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            disabled_opacity: 0.5,
            disabled_class: "pointer-events-none opacity-50".to_string(),
        }
    }
}

impl RendererConfig {
    /// 设置禁用状态的透明度
    pub fn with_disabled_opacity(mut self, opacity: f32) -> Self {
        self.disabled_opacity = opacity;
        self
    }

    /// 设置禁用状态的样式类
    pub fn with_disabled_class(mut self, class: impl Into<String>) -> Self {
        self.disabled_class = class.into();
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.disabled_opacity) {
            return Err(ConfigError::InvalidValue {
                key: "disabled_opacity".to_string(),
                message: format!("must be within 0.0..=1.0, got {}", self.disabled_opacity),
            }
            .into());
        }
        if self.disabled_class.trim().is_empty() {
            return Err(ConfigError::MissingRequired("disabled_class".to_string()).into());
        }
        Ok(())
    }
}

/// 内联权限渲染器
///
/// # 示例
///
/// ```rust
/// use tasknest_access::AccessContext;
/// use tasknest_access::rbac::{Action, PermissionQuery, Resource, Role};
/// use tasknest_access::render::{PermissionRenderer, RenderMode};
///
/// let delete_button = PermissionRenderer::permission(
///     PermissionQuery::new(Resource::User, Action::Delete),
/// )
/// .mode(RenderMode::Disable);
///
/// let out = delete_button.render(&AccessContext::new(Some(Role::Supervisor)), || "Remove", None);
/// assert!(out.is_disabled());
/// assert_eq!(out.content(), Some(&"Remove"));
/// assert!(!out.is_interactive());
/// ```
#[derive(Clone, Default)]
pub struct PermissionRenderer {
    permissions: PermissionRequirements,
    roles: RoleRequirements,
    custom: Option<Validator>,
    mode: RenderMode,
    config: RendererConfig,
}

impl PermissionRenderer {
    /// 创建没有任何要求的渲染器
    pub fn new() -> Self {
        Self::default()
    }

    /// 只要求单个权限
    pub fn permission(query: impl Into<PermissionQuery>) -> Self {
        Self::new().require_permission(query)
    }

    /// 只要求角色
    pub fn role(requirement: impl Into<RoleRequirement>) -> Self {
        Self::new().require_role(requirement)
    }

    /// 只要求最低角色
    pub fn minimum_role(minimum: Role) -> Self {
        Self::new().require_minimum_role(minimum)
    }

    /// 只使用自定义校验
    pub fn custom<F>(validate: F) -> Self
    where
        F: Fn(&AccessContext) -> bool + Send + Sync + 'static,
    {
        Self::new().require(validate)
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

    /// 自定义校验
    pub fn require<F>(mut self, validate: F) -> Self
    where
        F: Fn(&AccessContext) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(validate));
        self
    }

    /// 设置失败时的渲染方式
    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// 设置渲染配置
    pub fn config(mut self, config: RendererConfig) -> Self {
        self.config = config;
        self
    }

    /// 当前上下文是否满足所有要求
    pub fn is_allowed(&self, ctx: &AccessContext) -> bool {
        if self.permissions.check(&ctx.checker()).is_some() {
            return false;
        }
        if self.roles.check(ctx.role()).is_some() {
            return false;
        }
        self.custom.as_ref().is_none_or(|validate| validate(ctx))
    }

    /// 渲染内容
    ///
    /// `Disable` 模式下即使失败也会调用 `children`。
    pub fn render<T>(
        &self,
        ctx: &AccessContext,
        children: impl FnOnce() -> T,
        fallback: Option<T>,
    ) -> Rendered<T> {
        if self.is_allowed(ctx) {
            return Rendered::Children(children());
        }

        tracing::debug!(role = ?ctx.role(), mode = ?self.mode, "inline content gated");

        match self.mode {
            RenderMode::Hide | RenderMode::Replace => match fallback {
                Some(fallback) => Rendered::Fallback(fallback),
                None => Rendered::Nothing,
            },
            RenderMode::Disable => Rendered::Disabled(DisabledContent {
                content: children(),
                opacity: self.config.disabled_opacity,
                class: self.config.disabled_class.clone(),
            }),
        }
    }
}

impl fmt::Debug for PermissionRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionRenderer")
            .field("permissions", &self.permissions)
            .field("roles", &self.roles)
            .field("custom", &self.custom.is_some())
            .field("mode", &self.mode)
            .field("config", &self.config)
            .finish()
    }
}
