//! 角色定义模块
//!
//! 提供工作区角色以及角色层级比较、角色分配资格等校验函数。
//!
//! 所有校验函数都是全函数：不会 panic，无效或缺失的输入总是得到拒绝访问的结果。

use crate::error::{Error, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 工作区角色
///
/// 按权限等级全序：`Member < Supervisor < Admin`。
/// 用户在一个工作区中同一时刻只持有一个角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 普通成员
    Member,
    /// 主管
    Supervisor,
    /// 管理员
    Admin,
}

impl Role {
    /// 所有角色，按等级从低到高
    pub const ALL: [Role; 3] = [Role::Member, Role::Supervisor, Role::Admin];

    /// 角色的字符串名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Supervisor => "supervisor",
            Role::Admin => "admin",
        }
    }

    /// 角色等级：member=1, supervisor=2, admin=3
    pub const fn level(self) -> u8 {
        match self {
            Role::Member => 1,
            Role::Supervisor => 2,
            Role::Admin => 3,
        }
    }

    /// 从不可信输入解析角色，未知值返回 `None`
    pub fn parse(value: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == value)
    }

    /// 是否是管理员
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// 此角色的等级是否不低于 `minimum`
    pub const fn is_at_least(self, minimum: Role) -> bool {
        self.level() >= minimum.level()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| ValidationError::UnknownRole(s.to_string()).into())
    }
}

// ============================================================================
// RoleRequirement
// ============================================================================

/// 角色要求
///
/// 一个具体角色，或一组可接受的角色（满足其中任意一个即可）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRequirement {
    /// 必须是此角色
    One(Role),
    /// 属于其中任意一个
    AnyOf(Vec<Role>),
}

impl RoleRequirement {
    /// 检查角色是否满足此要求
    pub fn is_satisfied_by(&self, role: Role) -> bool {
        match self {
            RoleRequirement::One(required) => *required == role,
            RoleRequirement::AnyOf(roles) => roles.contains(&role),
        }
    }

    /// 要求中包含的角色
    pub fn roles(&self) -> &[Role] {
        match self {
            RoleRequirement::One(role) => std::slice::from_ref(role),
            RoleRequirement::AnyOf(roles) => roles,
        }
    }
}

impl From<Role> for RoleRequirement {
    fn from(role: Role) -> Self {
        RoleRequirement::One(role)
    }
}

impl From<Vec<Role>> for RoleRequirement {
    fn from(roles: Vec<Role>) -> Self {
        RoleRequirement::AnyOf(roles)
    }
}

impl From<&[Role]> for RoleRequirement {
    fn from(roles: &[Role]) -> Self {
        RoleRequirement::AnyOf(roles.to_vec())
    }
}

impl<const N: usize> From<[Role; N]> for RoleRequirement {
    fn from(roles: [Role; N]) -> Self {
        RoleRequirement::AnyOf(roles.to_vec())
    }
}

// ============================================================================
// 校验函数
// ============================================================================

/// 检查字符串是否是已知角色
///
/// 用于在把外部输入当作 [`Role`] 之前进行校验。
pub fn is_valid_role(value: &str) -> bool {
    Role::parse(value).is_some()
}

/// 检查用户角色是否属于要求的角色集合
///
/// 缺失的角色总是失败。
///
/// ```rust
/// use tasknest_access::rbac::{Role, has_role};
///
/// assert!(has_role(Some(Role::Admin), Role::Admin));
/// assert!(has_role(Some(Role::Member), [Role::Member, Role::Supervisor]));
/// assert!(!has_role(None, Role::Member));
/// ```
pub fn has_role(user_role: Option<Role>, required: impl Into<RoleRequirement>) -> bool {
    let required = required.into();
    user_role.is_some_and(|role| required.is_satisfied_by(role))
}

/// 检查用户角色等级是否不低于最低要求
pub fn has_minimum_role(user_role: Option<Role>, minimum: Role) -> bool {
    user_role.is_some_and(|role| role.is_at_least(minimum))
}

/// 获取角色等级
pub fn get_role_level(role: Role) -> u8 {
    role.level()
}

/// 检查当前用户是否可以分配目标角色
///
/// 只有管理员可以分配角色（包括 admin 本身）；主管和成员不能分配任何角色。
/// 这比“可以分配不高于自身等级的角色”更严格。
pub fn can_assign_role(current_user_role: Option<Role>, target_role: Role) -> bool {
    let allowed = matches!(current_user_role, Some(Role::Admin));
    if !allowed {
        tracing::debug!(
            current_role = ?current_user_role,
            target_role = %target_role,
            "role assignment not permitted"
        );
    }
    allowed
}

/// 获取当前用户可分配的角色列表
///
/// 管理员得到全部三个角色（按等级从低到高），其他情况为空列表。
pub fn get_assignable_roles(current_user_role: Option<Role>) -> Vec<Role> {
    match current_user_role {
        Some(Role::Admin) => Role::ALL.to_vec(),
        _ => Vec::new(),
    }
}
