//! # Guard 模块
//!
//! 为一个内容子树做授权门控：根据当前角色与声明的要求计算是否通过，
//! 通过则渲染子内容，否则按以下优先级渲染：
//!
//! 1. 调用方提供的 fallback
//! 2. 什么都不渲染（显式关闭了错误展示时）
//! 3. 默认错误面板，说明缺少什么访问权限并给出补救操作
//!
//! Guard 没有内部状态，每次渲染都会重新评估，角色变化在下一次渲染时自然生效。
//!
//! ## 使用示例
//!
//! ```rust
//! use tasknest_access::AccessContext;
//! use tasknest_access::guard::{Guard, Rendered, RoleGuard};
//! use tasknest_access::rbac::Role;
//!
//! let guard = RoleGuard::new().require_minimum_role(Role::Supervisor);
//!
//! let member = AccessContext::new(Some(Role::Member));
//! let out = guard.render(&member, || "team settings", None);
//! assert!(out.is_error_panel());
//!
//! let admin = AccessContext::new(Some(Role::Admin));
//! assert_eq!(guard.render(&admin, || "team settings", None), Rendered::Children("team settings"));
//! ```

mod compose;
mod panel;
mod permission;
#[cfg(feature = "presets")]
pub mod presets;
mod role;
mod workspace;

pub use compose::{GuardStack, Guarded, check_guards};
pub use panel::{ErrorPanel, ErrorPanelConfig, PanelIcon, RemedialAction};
pub use permission::{PermissionGuard, PermissionRequirements};
pub use role::{RoleGuard, RoleRequirements};
pub use workspace::WorkspaceGuard;

use crate::audit::AccessEvent;
use crate::context::AccessContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 调用方提供的自定义校验
pub type Validator = Arc<dyn Fn(&AccessContext) -> bool + Send + Sync>;

// ============================================================================
// 拒绝类别与结果
// ============================================================================

/// 拒绝类别
///
/// 用于选择错误面板的图标、标题和补救操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DenialCategory {
    /// 需要工作区但当前没有选中
    NoWorkspace,
    /// 无法访问指定的工作区
    WorkspaceAccess,
    /// 角色不满足
    InsufficientRole,
    /// 权限不满足
    InsufficientPermission,
    /// 自定义校验返回 false
    CustomValidation,
}

impl DenialCategory {
    /// 类别名称
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialCategory::NoWorkspace => "no-workspace",
            DenialCategory::WorkspaceAccess => "workspace-access",
            DenialCategory::InsufficientRole => "insufficient-role",
            DenialCategory::InsufficientPermission => "insufficient-permission",
            DenialCategory::CustomValidation => "custom-validation",
        }
    }
}

impl fmt::Display for DenialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次访问拒绝
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDenial {
    /// 拒绝类别
    pub category: DenialCategory,
    /// 面向用户的说明
    pub message: String,
    /// 缺少的角色或权限描述
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl AccessDenial {
    /// 创建拒绝
    pub fn new(category: DenialCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            required: Vec::new(),
        }
    }

    /// 设置缺少的角色或权限描述
    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = required;
        self
    }
}

/// Guard 评估结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 通过
    Granted,
    /// 拒绝
    Denied(AccessDenial),
}

impl GuardDecision {
    /// 从可选的拒绝构造
    pub fn from_denial(denial: Option<AccessDenial>) -> Self {
        match denial {
            Some(denial) => GuardDecision::Denied(denial),
            None => GuardDecision::Granted,
        }
    }

    /// 是否通过
    pub fn is_granted(&self) -> bool {
        matches!(self, GuardDecision::Granted)
    }

    /// 是否拒绝
    pub fn is_denied(&self) -> bool {
        !self.is_granted()
    }

    /// 拒绝详情
    pub fn denial(&self) -> Option<&AccessDenial> {
        match self {
            GuardDecision::Granted => None,
            GuardDecision::Denied(denial) => Some(denial),
        }
    }

    /// 拒绝类别
    pub fn category(&self) -> Option<DenialCategory> {
        self.denial().map(|d| d.category)
    }
}

// ============================================================================
// 渲染结果
// ============================================================================

/// 被禁用的内容
///
/// 内容仍然可见，但不可交互并降低透明度。
#[derive(Debug, Clone, PartialEq)]
pub struct DisabledContent<T> {
    /// 原始内容
    pub content: T,
    /// 透明度
    pub opacity: f32,
    /// 附加的样式类
    pub class: String,
}

impl<T> DisabledContent<T> {
    /// 被禁用的内容永远不可交互
    pub fn is_interactive(&self) -> bool {
        false
    }
}

/// 渲染结果
///
/// `T` 是嵌入方用来表示一个内容子树的类型。
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<T> {
    /// 受保护的子内容
    Children(T),
    /// 以禁用状态渲染的子内容（仅 PermissionRenderer 产生）
    Disabled(DisabledContent<T>),
    /// 调用方提供的 fallback
    Fallback(T),
    /// 什么都不渲染
    Nothing,
    /// 错误面板（仅 Guard 产生）
    ErrorPanel(ErrorPanel),
}

impl<T> Rendered<T> {
    /// 是否渲染了子内容（包括禁用状态）
    pub fn has_children(&self) -> bool {
        matches!(self, Rendered::Children(_) | Rendered::Disabled(_))
    }

    /// 是否渲染了可交互的子内容
    pub fn is_children(&self) -> bool {
        matches!(self, Rendered::Children(_))
    }

    /// 是否是禁用状态
    pub fn is_disabled(&self) -> bool {
        matches!(self, Rendered::Disabled(_))
    }

    /// 是否是 fallback
    pub fn is_fallback(&self) -> bool {
        matches!(self, Rendered::Fallback(_))
    }

    /// 是否什么都没有渲染
    pub fn is_nothing(&self) -> bool {
        matches!(self, Rendered::Nothing)
    }

    /// 是否是错误面板
    pub fn is_error_panel(&self) -> bool {
        matches!(self, Rendered::ErrorPanel(_))
    }

    /// 错误面板
    pub fn error_panel(&self) -> Option<&ErrorPanel> {
        match self {
            Rendered::ErrorPanel(panel) => Some(panel),
            _ => None,
        }
    }

    /// 渲染出的内容（子内容、禁用内容或 fallback）
    pub fn content(&self) -> Option<&T> {
        match self {
            Rendered::Children(content) | Rendered::Fallback(content) => Some(content),
            Rendered::Disabled(disabled) => Some(&disabled.content),
            Rendered::Nothing | Rendered::ErrorPanel(_) => None,
        }
    }

    /// 渲染出的内容是否可交互
    pub fn is_interactive(&self) -> bool {
        matches!(self, Rendered::Children(_) | Rendered::Fallback(_))
    }
}

// ============================================================================
// Guard trait
// ============================================================================

/// Guard 选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardOptions {
    /// 拒绝且没有 fallback 时是否显示错误面板
    pub show_error: bool,
    /// 错误面板配置
    pub panel: ErrorPanelConfig,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            show_error: true,
            panel: ErrorPanelConfig::default(),
        }
    }
}

/// Guard trait
///
/// 实现者只需给出评估逻辑与选项，渲染逻辑由默认实现提供。
pub trait Guard {
    /// 评估当前上下文
    fn check(&self, ctx: &AccessContext) -> GuardDecision;

    /// Guard 选项
    fn options(&self) -> &GuardOptions;

    /// 渲染受保护的内容
    ///
    /// 只有通过时才会调用 `children`。
    fn render<T>(
        &self,
        ctx: &AccessContext,
        children: impl FnOnce() -> T,
        fallback: Option<T>,
    ) -> Rendered<T>
    where
        Self: Sized,
    {
        match self.check(ctx) {
            GuardDecision::Granted => {
                tracing::trace!(role = ?ctx.role(), "guard granted access");
                Rendered::Children(children())
            }
            GuardDecision::Denied(denial) => deny(ctx, &denial, self.options(), fallback),
        }
    }
}

/// 拒绝时的渲染：fallback > 空 > 错误面板
pub(crate) fn deny<T>(
    ctx: &AccessContext,
    denial: &AccessDenial,
    options: &GuardOptions,
    fallback: Option<T>,
) -> Rendered<T> {
    tracing::debug!(
        category = %denial.category,
        role = ?ctx.role(),
        message = %denial.message,
        "guard denied access"
    );
    ctx.record(AccessEvent::access_denied(denial));

    match fallback {
        Some(fallback) => Rendered::Fallback(fallback),
        None if !options.show_error => Rendered::Nothing,
        None => Rendered::ErrorPanel(ErrorPanel::from_denial(denial, &options.panel)),
    }
}
