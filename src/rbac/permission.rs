//! 权限定义模块
//!
//! 提供资源、操作、范围以及权限（grant）与权限查询的定义。

use crate::error::{Error, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Resource 类型
// ============================================================================

/// 资源类型
///
/// 标识被操作的实体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// 任务
    Task,
    /// 团队
    Team,
    /// 用户
    User,
    /// 工作区
    Workspace,
}

impl Resource {
    /// 所有资源，顺序固定
    pub const ALL: [Resource; 4] = [
        Resource::Task,
        Resource::Team,
        Resource::User,
        Resource::Workspace,
    ];

    /// 资源的字符串名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Task => "task",
            Resource::Team => "team",
            Resource::User => "user",
            Resource::Workspace => "workspace",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownResource(s.to_string()).into())
    }
}

// ============================================================================
// Action 类型
// ============================================================================

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// 创建
    Create,
    /// 读取
    Read,
    /// 更新
    Update,
    /// 删除
    Delete,
    /// 分配
    Assign,
}

impl Action {
    /// 所有操作，顺序固定
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Assign,
    ];

    /// 操作的字符串名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Assign => "assign",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownAction(s.to_string()).into())
    }
}

// ============================================================================
// Scope 类型
// ============================================================================

/// 权限范围
///
/// 按广度排序：`Own < Team < Workspace`。
///
/// 匹配关系是非对称的：`Workspace` 范围的 grant 可以满足任何更窄范围的查询，
/// 而 `Own` 或 `Team` 范围的 grant 只能满足相同范围的查询。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// 仅限自己的对象
    Own,
    /// 团队内的对象
    Team,
    /// 整个工作区
    Workspace,
}

impl Scope {
    /// 所有范围，从窄到宽
    pub const ALL: [Scope; 3] = [Scope::Own, Scope::Team, Scope::Workspace];

    /// 范围的字符串名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Own => "own",
            Scope::Team => "team",
            Scope::Workspace => "workspace",
        }
    }

    /// 以此范围授予的 grant 是否满足对 `requested` 范围的查询
    ///
    /// ```rust
    /// use tasknest_access::rbac::Scope;
    ///
    /// assert!(Scope::Workspace.satisfies(Scope::Own));
    /// assert!(Scope::Team.satisfies(Scope::Team));
    /// assert!(!Scope::Own.satisfies(Scope::Team));
    /// assert!(!Scope::Team.satisfies(Scope::Own));
    /// ```
    pub fn satisfies(self, requested: Scope) -> bool {
        self == requested || self == Scope::Workspace
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|sc| sc.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownScope(s.to_string()).into())
    }
}

// ============================================================================
// Permission 类型
// ============================================================================

/// 权限定义（grant）
///
/// 由资源、操作和范围组成，字符串格式为 `resource:action:scope`。
///
/// ## 示例
///
/// ```rust
/// use tasknest_access::rbac::{Action, Permission, Resource, Scope};
///
/// let perm = Permission::new(Resource::Task, Action::Update, Scope::Own);
/// assert_eq!(perm.to_string(), "task:update:own");
/// assert_eq!("task:update:own".parse::<Permission>().unwrap(), perm);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// 资源
    pub resource: Resource,
    /// 操作
    pub action: Action,
    /// 范围
    pub scope: Scope,
}

impl Permission {
    /// 创建新的权限
    pub const fn new(resource: Resource, action: Action, scope: Scope) -> Self {
        Self {
            resource,
            action,
            scope,
        }
    }

    /// 检查此 grant 是否满足给定的查询
    ///
    /// 资源和操作必须相等；若查询指定了范围，则需满足范围包含关系。
    pub fn covers(&self, query: &PermissionQuery) -> bool {
        self.resource == query.resource
            && self.action == query.action
            && query.scope.is_none_or(|scope| self.scope.satisfies(scope))
    }

    /// 转换为查询（带范围）
    pub fn as_query(&self) -> PermissionQuery {
        PermissionQuery::scoped(self.resource, self.action, self.scope)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.resource, self.action, self.scope)
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let query: PermissionQuery = s.parse()?;
        match query.scope {
            Some(scope) => Ok(Permission::new(query.resource, query.action, scope)),
            None => Err(ValidationError::InvalidPermission(s.to_string()).into()),
        }
    }
}

// ============================================================================
// PermissionQuery 类型
// ============================================================================

/// 权限查询
///
/// 调用方希望针对某个角色的 grant 列表测试的 (resource, action, scope?)。
/// 未指定范围表示“该角色是否拥有此资源和操作的任意 grant”。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionQuery {
    /// 资源
    pub resource: Resource,
    /// 操作
    pub action: Action,
    /// 可选的范围
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl PermissionQuery {
    /// 创建不限范围的查询
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self {
            resource,
            action,
            scope: None,
        }
    }

    /// 创建指定范围的查询
    pub const fn scoped(resource: Resource, action: Action, scope: Scope) -> Self {
        Self {
            resource,
            action,
            scope: Some(scope),
        }
    }
}

impl From<Permission> for PermissionQuery {
    fn from(permission: Permission) -> Self {
        permission.as_query()
    }
}

impl From<(Resource, Action)> for PermissionQuery {
    fn from((resource, action): (Resource, Action)) -> Self {
        PermissionQuery::new(resource, action)
    }
}

impl From<(Resource, Action, Scope)> for PermissionQuery {
    fn from((resource, action, scope): (Resource, Action, Scope)) -> Self {
        PermissionQuery::scoped(resource, action, scope)
    }
}

impl fmt::Display for PermissionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            Some(scope) => write!(f, "{}:{}:{}", self.resource, self.action, scope),
            None => write!(f, "{}:{}", self.resource, self.action),
        }
    }
}

impl FromStr for PermissionQuery {
    type Err = Error;

    /// 解析 `resource:action` 或 `resource:action:scope`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [resource, action] => Ok(PermissionQuery::new(resource.parse()?, action.parse()?)),
            [resource, action, scope] => Ok(PermissionQuery::scoped(
                resource.parse()?,
                action.parse()?,
                scope.parse()?,
            )),
            _ => Err(ValidationError::InvalidPermission(s.to_string()).into()),
        }
    }
}
