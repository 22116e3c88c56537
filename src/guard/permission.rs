//! 基于权限的 Guard

use super::{AccessDenial, DenialCategory, ErrorPanelConfig, Guard, GuardDecision, GuardOptions};
use crate::context::AccessContext;
use crate::rbac::{PermissionChecker, PermissionQuery, query_description};
use serde::{Deserialize, Serialize};

/// 权限要求集合
///
/// 单个权限、任意一个权限、全部权限三类要求可以同时声明，
/// 声明的每一类都必须独立满足。声明了但为空的 `any_of` 无法满足，
/// 空的 `all_of` 总是满足；没有任何 grant 时，声明了任何要求都会被拒绝。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionRequirements {
    /// 必须拥有此权限
    pub permission: Option<PermissionQuery>,
    /// 至少拥有其中一个
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<PermissionQuery>>,
    /// 必须全部拥有
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<PermissionQuery>>,
}

impl PermissionRequirements {
    /// 是否没有声明任何要求
    pub fn is_empty(&self) -> bool {
        self.permission.is_none() && self.any_of.is_none() && self.all_of.is_none()
    }

    /// 评估检查器，返回第一个不满足的要求
    pub fn check(&self, checker: &PermissionChecker) -> Option<AccessDenial> {
        if self.is_empty() {
            return None;
        }

        if checker.is_empty() {
            return Some(
                AccessDenial::new(
                    DenialCategory::InsufficientPermission,
                    "You do not have any permissions in this workspace.",
                )
                .with_required(self.required_descriptions()),
            );
        }

        if let Some(query) = &self.permission {
            if !checker.allows(query) {
                let description = query_description(query);
                return Some(
                    AccessDenial::new(
                        DenialCategory::InsufficientPermission,
                        format!("You need permission to {}.", description),
                    )
                    .with_required(vec![description]),
                );
            }
        }

        if let Some(any_of) = &self.any_of {
            if !checker.has_any_permission(any_of) {
                let required = describe(any_of);
                let message = if required.is_empty() {
                    "No permission grants access to this area.".to_string()
                } else {
                    format!(
                        "You need at least one of these permissions: {}.",
                        required.join(", ")
                    )
                };
                return Some(
                    AccessDenial::new(DenialCategory::InsufficientPermission, message)
                        .with_required(required),
                );
            }
        }

        if let Some(all_of) = self.all_of.as_deref() {
            let missing: Vec<PermissionQuery> = all_of
                .iter()
                .filter(|q| !checker.allows(q))
                .copied()
                .collect();
            if !missing.is_empty() {
                let required = describe(&missing);
                return Some(
                    AccessDenial::new(
                        DenialCategory::InsufficientPermission,
                        format!(
                            "You are missing these permissions: {}.",
                            required.join(", ")
                        ),
                    )
                    .with_required(required),
                );
            }
        }

        None
    }

    fn required_descriptions(&self) -> Vec<String> {
        let queries: Vec<PermissionQuery> = self
            .permission
            .iter()
            .chain(self.any_of.iter().flatten())
            .chain(self.all_of.iter().flatten())
            .copied()
            .collect();
        describe(&queries)
    }
}

fn describe(queries: &[PermissionQuery]) -> Vec<String> {
    queries.iter().map(query_description).collect()
}

/// 权限 Guard
///
/// # 示例
///
/// ```rust
/// use tasknest_access::AccessContext;
/// use tasknest_access::guard::{Guard, PermissionGuard};
/// use tasknest_access::rbac::{Action, PermissionQuery, Resource, Role};
///
/// let guard = PermissionGuard::new()
///     .require_permission(PermissionQuery::new(Resource::User, Action::Delete));
///
/// assert!(guard.check(&AccessContext::new(Some(Role::Admin))).is_granted());
/// assert!(guard.check(&AccessContext::new(Some(Role::Supervisor))).is_denied());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionGuard {
    requirements: PermissionRequirements,
    options: GuardOptions,
}

impl PermissionGuard {
    /// 创建没有任何要求的 Guard
    pub fn new() -> Self {
        Self::default()
    }

    /// 要求单个权限
    pub fn require_permission(mut self, query: impl Into<PermissionQuery>) -> Self {
        self.requirements.permission = Some(query.into());
        self
    }

    /// 要求至少一个权限
    pub fn require_any_permission(
        mut self,
        queries: impl IntoIterator<Item = PermissionQuery>,
    ) -> Self {
        self.requirements.any_of = Some(queries.into_iter().collect());
        self
    }

    /// 要求全部权限
    pub fn require_all_permissions(
        mut self,
        queries: impl IntoIterator<Item = PermissionQuery>,
    ) -> Self {
        self.requirements.all_of = Some(queries.into_iter().collect());
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

    /// 权限要求
    pub fn requirements(&self) -> &PermissionRequirements {
        &self.requirements
    }
}

impl From<PermissionRequirements> for PermissionGuard {
    fn from(requirements: PermissionRequirements) -> Self {
        Self {
            requirements,
            options: GuardOptions::default(),
        }
    }
}

impl Guard for PermissionGuard {
    fn check(&self, ctx: &AccessContext) -> GuardDecision {
        if self.requirements.is_empty() {
            return GuardDecision::Granted;
        }
        GuardDecision::from_denial(self.requirements.check(&ctx.checker()))
    }

    fn options(&self) -> &GuardOptions {
        &self.options
    }
}
