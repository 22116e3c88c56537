//! 权限检查模块
//!
//! 针对一组 grant 评估权限查询。检查器只依赖 grant 列表而不依赖角色，
//! 便于用任意 grant 组合进行测试。

use super::catalog::permissions_for;
use super::permission::{Action, Permission, PermissionQuery, Resource, Scope};
use super::role::Role;
use std::collections::BTreeSet;

/// 权限检查器
///
/// 找不到匹配的 grant 只是普通的 `false`，从来不是错误。
///
/// # 示例
///
/// ```rust
/// use tasknest_access::rbac::{Action, PermissionChecker, Resource, Role, Scope};
///
/// let checker = PermissionChecker::for_role(Some(Role::Member));
///
/// assert!(checker.has_permission(Resource::Task, Action::Update, Some(Scope::Own)));
/// assert!(!checker.has_permission(Resource::Task, Action::Update, Some(Scope::Workspace)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionChecker {
    permissions: Vec<Permission>,
}

impl PermissionChecker {
    /// 从 grant 列表创建检查器
    pub fn new(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            permissions: permissions.into_iter().collect(),
        }
    }

    /// 为角色创建检查器，缺失角色得到空检查器
    pub fn for_role(role: Option<Role>) -> Self {
        Self::new(permissions_for(role).iter().copied())
    }

    /// 检查是否拥有权限
    ///
    /// 当存在 grant 满足：资源相等、操作相等，且（未指定范围，或范围相等，
    /// 或 grant 范围为 workspace）时返回 `true`。
    pub fn has_permission(&self, resource: Resource, action: Action, scope: Option<Scope>) -> bool {
        self.allows(&PermissionQuery {
            resource,
            action,
            scope,
        })
    }

    /// 检查是否满足查询
    pub fn allows(&self, query: &PermissionQuery) -> bool {
        self.permissions.iter().any(|p| p.covers(query))
    }

    /// 不限范围的简写
    pub fn can(&self, resource: Resource, action: Action) -> bool {
        self.has_permission(resource, action, None)
    }

    /// 检查是否满足任意一个查询
    pub fn has_any_permission(&self, queries: &[PermissionQuery]) -> bool {
        queries.iter().any(|q| self.allows(q))
    }

    /// 检查是否满足所有查询
    pub fn has_all_permissions(&self, queries: &[PermissionQuery]) -> bool {
        queries.iter().all(|q| self.allows(q))
    }

    /// 获取某个资源的所有 grant
    pub fn get_resource_permissions(&self, resource: Resource) -> Vec<Permission> {
        self.permissions
            .iter()
            .filter(|p| p.resource == resource)
            .copied()
            .collect()
    }

    /// 获取某个操作的所有 grant
    pub fn get_action_permissions(&self, action: Action) -> Vec<Permission> {
        self.permissions
            .iter()
            .filter(|p| p.action == action)
            .copied()
            .collect()
    }

    /// 有 grant 的资源（去重，按固定顺序）
    pub fn resources(&self) -> Vec<Resource> {
        self.permissions
            .iter()
            .map(|p| p.resource)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 所有 grant
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// 是否没有任何 grant
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl FromIterator<Permission> for PermissionChecker {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(grants: &[Permission]) -> PermissionChecker {
        grants.iter().copied().collect()
    }

    #[test]
    fn test_unscoped_query_matches_any_scope() {
        let c = checker(&[Permission::new(Resource::Task, Action::Delete, Scope::Own)]);
        assert!(c.has_permission(Resource::Task, Action::Delete, None));
        assert!(c.can(Resource::Task, Action::Delete));
        assert!(!c.can(Resource::Task, Action::Update));
    }

    #[test]
    fn test_workspace_grant_satisfies_narrower_queries() {
        let c = checker(&[Permission::new(
            Resource::Team,
            Action::Update,
            Scope::Workspace,
        )]);
        for scope in Scope::ALL {
            assert!(c.has_permission(Resource::Team, Action::Update, Some(scope)));
        }
    }

    #[test]
    fn test_narrow_grant_does_not_satisfy_wider_queries() {
        let c = checker(&[Permission::new(Resource::Task, Action::Update, Scope::Own)]);
        assert!(c.has_permission(Resource::Task, Action::Update, Some(Scope::Own)));
        assert!(!c.has_permission(Resource::Task, Action::Update, Some(Scope::Team)));
        assert!(!c.has_permission(Resource::Task, Action::Update, Some(Scope::Workspace)));
    }

    #[test]
    fn test_team_grant_is_exact_match_only() {
        let c = checker(&[Permission::new(Resource::Task, Action::Read, Scope::Team)]);
        assert!(c.has_permission(Resource::Task, Action::Read, Some(Scope::Team)));
        assert!(!c.has_permission(Resource::Task, Action::Read, Some(Scope::Own)));
        assert!(!c.has_permission(Resource::Task, Action::Read, Some(Scope::Workspace)));
    }

    #[test]
    fn test_any_and_all() {
        let c = PermissionChecker::for_role(Some(Role::Member));
        let queries = [
            PermissionQuery::scoped(Resource::Task, Action::Create, Scope::Own),
            PermissionQuery::new(Resource::User, Action::Delete),
        ];
        assert!(c.has_any_permission(&queries));
        assert!(!c.has_all_permissions(&queries));

        assert!(!c.has_any_permission(&[]));
        assert!(c.has_all_permissions(&[]));
    }

    #[test]
    fn test_filtered_views() {
        let c = PermissionChecker::for_role(Some(Role::Member));
        let task = c.get_resource_permissions(Resource::Task);
        assert_eq!(task.len(), 4);
        assert!(task.iter().all(|p| p.resource == Resource::Task));

        let reads = c.get_action_permissions(Action::Read);
        assert!(reads.iter().all(|p| p.action == Action::Read));
        assert_eq!(reads.len(), 4);
    }

    #[test]
    fn test_resources() {
        let c = checker(&[
            Permission::new(Resource::User, Action::Read, Scope::Team),
            Permission::new(Resource::Task, Action::Read, Scope::Team),
            Permission::new(Resource::Task, Action::Create, Scope::Own),
        ]);
        assert_eq!(c.resources(), vec![Resource::Task, Resource::User]);
    }

    #[test]
    fn test_absent_role_has_nothing() {
        let c = PermissionChecker::for_role(None);
        assert!(c.is_empty());
        for resource in Resource::ALL {
            for action in Action::ALL {
                assert!(!c.can(resource, action));
            }
        }
    }
}
