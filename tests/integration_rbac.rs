//! 集成测试：RBAC
//!
//! 测试权限目录、权限检查、角色校验与展示文本的完整流程。

use tasknest_access::rbac::{
    Action, Permission, PermissionChecker, PermissionQuery, Resource, Role, Scope,
    can_assign_role, describe_role_permissions, get_assignable_roles, get_permissions_for_role,
    get_permissions_for_role_name, get_role_level, has_minimum_role, has_role, is_valid_role,
    permission_description, role_color, role_description, role_label,
};

/// member 只能更新自己的任务
#[test]
fn test_member_task_update_scopes() {
    let member = PermissionChecker::for_role(Some(Role::Member));

    assert!(member.has_permission(Resource::Task, Action::Update, Some(Scope::Own)));
    assert!(!member.has_permission(Resource::Task, Action::Update, Some(Scope::Team)));
    assert!(!member.has_permission(Resource::Task, Action::Update, Some(Scope::Workspace)));
    // 不限定范围时任何 grant 都算
    assert!(member.has_permission(Resource::Task, Action::Update, None));
}

/// 只有 admin 可以移除用户
#[test]
fn test_only_admin_removes_users() {
    for scope in [None, Some(Scope::Own), Some(Scope::Team), Some(Scope::Workspace)] {
        let supervisor = PermissionChecker::for_role(Some(Role::Supervisor));
        assert!(!supervisor.has_permission(Resource::User, Action::Delete, scope));

        let admin = PermissionChecker::for_role(Some(Role::Admin));
        assert!(admin.has_permission(Resource::User, Action::Delete, scope));
    }
}

/// workspace 范围的 grant 满足更窄的查询，反之不成立
#[test]
fn test_scope_containment() {
    let checker = PermissionChecker::new([
        Permission::new(Resource::Task, Action::Read, Scope::Workspace),
        Permission::new(Resource::Team, Action::Update, Scope::Team),
    ]);

    for scope in Scope::ALL {
        assert!(checker.has_permission(Resource::Task, Action::Read, Some(scope)));
    }

    assert!(checker.has_permission(Resource::Team, Action::Update, Some(Scope::Team)));
    assert!(!checker.has_permission(Resource::Team, Action::Update, Some(Scope::Own)));
    assert!(!checker.has_permission(Resource::Team, Action::Update, Some(Scope::Workspace)));
}

/// 没有角色时拒绝一切
#[test]
fn test_absent_role_fails_closed() {
    let checker = PermissionChecker::for_role(None);
    assert!(checker.is_empty());

    for resource in Resource::ALL {
        for action in Action::ALL {
            assert!(!checker.has_permission(resource, action, None));
        }
    }

    assert!(!has_role(None, Role::Member));
    assert!(!has_minimum_role(None, Role::Member));
}

/// 更高的角色拥有更低角色的全部能力
#[test]
fn test_capabilities_are_monotonic() {
    let pairs = [(Role::Member, Role::Supervisor), (Role::Supervisor, Role::Admin)];

    for (lower, higher) in pairs {
        let lower_checker = PermissionChecker::for_role(Some(lower));
        let higher_checker = PermissionChecker::for_role(Some(higher));

        for resource in Resource::ALL {
            for action in Action::ALL {
                for scope in Scope::ALL {
                    if lower_checker.has_permission(resource, action, Some(scope)) {
                        assert!(
                            higher_checker.has_permission(resource, action, Some(scope)),
                            "{} can {}:{}:{} but {} cannot",
                            lower,
                            resource,
                            action,
                            scope,
                            higher
                        );
                    }
                }
            }
        }
    }
}

/// admin 拥有所有资源与操作的 workspace 范围权限
#[test]
fn test_admin_has_everything() {
    let admin = get_permissions_for_role(Role::Admin);
    assert_eq!(admin.len(), Resource::ALL.len() * Action::ALL.len());
    assert!(admin.iter().all(|p| p.scope == Scope::Workspace));
}

/// 字符串形式的查询
#[test]
fn test_role_name_lookup_and_parsing() {
    assert_eq!(
        get_permissions_for_role_name("supervisor"),
        get_permissions_for_role(Role::Supervisor)
    );
    assert!(get_permissions_for_role_name("owner").is_empty());

    let query: PermissionQuery = "task:assign:team".parse().unwrap();
    let supervisor = PermissionChecker::for_role(Some(Role::Supervisor));
    assert!(supervisor.allows(&query));

    assert!("task:fly".parse::<PermissionQuery>().is_err());
    assert!(is_valid_role("admin"));
    assert!(!is_valid_role("Admin "));
}

/// 多个查询的 any / all
#[test]
fn test_any_and_all_queries() {
    let member = PermissionChecker::for_role(Some(Role::Member));
    let queries = [
        PermissionQuery::new(Resource::Team, Action::Create),
        PermissionQuery::new(Resource::Task, Action::Create),
    ];

    assert!(member.has_any_permission(&queries));
    assert!(!member.has_all_permissions(&queries));
    assert!(!member.has_any_permission(&[]));
    assert!(member.has_all_permissions(&[]));
}

/// 角色分配只允许 admin
#[test]
fn test_role_assignment() {
    for role in Role::ALL {
        assert!(can_assign_role(Some(Role::Admin), role));
        assert!(!can_assign_role(Some(Role::Supervisor), role));
        assert!(!can_assign_role(Some(Role::Member), role));
        assert!(!can_assign_role(None, role));
    }

    assert_eq!(get_assignable_roles(Some(Role::Admin)), Role::ALL.to_vec());
    assert!(get_assignable_roles(Some(Role::Supervisor)).is_empty());
}

/// 角色要求
#[test]
fn test_role_requirements() {
    assert!(has_role(Some(Role::Supervisor), [Role::Supervisor, Role::Admin]));
    assert!(!has_role(Some(Role::Member), [Role::Supervisor, Role::Admin]));
    assert!(has_role(Some(Role::Admin), Role::Admin));
    assert!(!has_role(Some(Role::Admin), Vec::<Role>::new()));

    assert!(has_minimum_role(Some(Role::Admin), Role::Supervisor));
    assert!(!has_minimum_role(Some(Role::Member), Role::Supervisor));
    assert_eq!(get_role_level(Role::Supervisor), 2);
}

/// 展示文本
#[test]
fn test_display_strings() {
    assert_eq!(role_label(Role::Supervisor), "Supervisor");
    assert!(!role_description(Role::Member).is_empty());
    assert!(role_color(Role::Admin).starts_with('#'));

    let grant = Permission::new(Resource::Task, Action::Update, Scope::Own);
    assert_eq!(permission_description(&grant), "update task (own)");

    let lines = describe_role_permissions(Role::Member);
    assert_eq!(lines.len(), get_permissions_for_role(Role::Member).len());
    assert!(lines.contains(&"read workspace (workspace)".to_string()));
}
