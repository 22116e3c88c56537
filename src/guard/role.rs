//! 基于角色的 Guard

use super::{AccessDenial, DenialCategory, ErrorPanelConfig, Guard, GuardDecision, GuardOptions};
use crate::context::AccessContext;
use crate::rbac::{Role, RoleRequirement, role_label};
use serde::{Deserialize, Serialize};

/// 角色要求集合
///
/// 可同时声明具体角色、可接受角色列表与最低角色；声明的每一类都必须满足
/// （类别之间 AND，列表内部 OR）。没有声明任何要求时总是通过；
/// 声明了但为空的角色列表没有任何角色能满足。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleRequirements {
    /// 必须是此角色
    pub role: Option<Role>,
    /// 必须属于其中之一
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Role>>,
    /// 最低角色
    pub minimum: Option<Role>,
}

impl RoleRequirements {
    /// 是否没有声明任何要求
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.any_of.is_none() && self.minimum.is_none()
    }

    /// 按角色要求设置（单个角色或角色列表）
    pub fn set_requirement(&mut self, requirement: RoleRequirement) {
        match requirement {
            RoleRequirement::One(role) => self.role = Some(role),
            RoleRequirement::AnyOf(roles) => self.any_of = Some(roles),
        }
    }

    /// 评估角色，返回第一个不满足的要求
    pub fn check(&self, role: Option<Role>) -> Option<AccessDenial> {
        if self.is_empty() {
            return None;
        }

        let Some(current) = role else {
            return Some(
                AccessDenial::new(
                    DenialCategory::InsufficientRole,
                    "You do not have a role in this workspace.",
                )
                .with_required(self.required_labels()),
            );
        };

        if let Some(required) = self.role {
            if current != required {
                return Some(
                    AccessDenial::new(
                        DenialCategory::InsufficientRole,
                        format!(
                            "This area requires the {} role. Your current role is {}.",
                            role_label(required),
                            role_label(current)
                        ),
                    )
                    .with_required(vec![role_label(required).to_string()]),
                );
            }
        }

        if let Some(any_of) = &self.any_of {
            if !any_of.contains(&current) {
                let labels: Vec<String> =
                    any_of.iter().map(|r| role_label(*r).to_string()).collect();
                let message = if labels.is_empty() {
                    "No role is allowed to access this area.".to_string()
                } else {
                    format!(
                        "This area requires one of the following roles: {}. \
                         Your current role is {}.",
                        labels.join(", "),
                        role_label(current)
                    )
                };
                return Some(
                    AccessDenial::new(DenialCategory::InsufficientRole, message)
                        .with_required(labels),
                );
            }
        }

        if let Some(minimum) = self.minimum {
            if !current.is_at_least(minimum) {
                return Some(
                    AccessDenial::new(
                        DenialCategory::InsufficientRole,
                        format!(
                            "This area requires at least the {} role. Your current role is {}.",
                            role_label(minimum),
                            role_label(current)
                        ),
                    )
                    .with_required(vec![role_label(minimum).to_string()]),
                );
            }
        }

        None
    }

    fn required_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        let roles = self
            .role
            .iter()
            .chain(self.any_of.iter().flatten())
            .chain(self.minimum.iter());
        for role in roles {
            let label = role_label(*role).to_string();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}

/// 角色 Guard
///
/// # 示例
///
/// ```rust
/// use tasknest_access::AccessContext;
/// use tasknest_access::guard::{Guard, RoleGuard};
/// use tasknest_access::rbac::Role;
///
/// let guard = RoleGuard::new().require_role([Role::Supervisor, Role::Admin]);
///
/// assert!(guard.check(&AccessContext::new(Some(Role::Admin))).is_granted());
/// assert!(guard.check(&AccessContext::new(Some(Role::Member))).is_denied());
/// assert!(guard.check(&AccessContext::anonymous()).is_denied());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleGuard {
    requirements: RoleRequirements,
    options: GuardOptions,
}

impl RoleGuard {
    /// 创建没有任何要求的 Guard
    pub fn new() -> Self {
        Self::default()
    }

    /// 要求具体角色或可接受的角色列表
    pub fn require_role(mut self, requirement: impl Into<RoleRequirement>) -> Self {
        self.requirements.set_requirement(requirement.into());
        self
    }

    /// 要求最低角色
    pub fn require_minimum_role(mut self, minimum: Role) -> Self {
        self.requirements.minimum = Some(minimum);
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

    /// 角色要求
    pub fn requirements(&self) -> &RoleRequirements {
        &self.requirements
    }
}

impl From<RoleRequirements> for RoleGuard {
    fn from(requirements: RoleRequirements) -> Self {
        Self {
            requirements,
            options: GuardOptions::default(),
        }
    }
}

impl Guard for RoleGuard {
    fn check(&self, ctx: &AccessContext) -> GuardDecision {
        GuardDecision::from_denial(self.requirements.check(ctx.role()))
    }

    fn options(&self) -> &GuardOptions {
        &self.options
    }
}
