//! 集成测试：内联权限渲染
//!
//! 测试 hide / disable / replace 三种模式以及与上下文的配合。

use tasknest_access::guard::Rendered;
use tasknest_access::rbac::{Action, PermissionQuery, Resource, Role, Scope};
use tasknest_access::render::{PermissionRenderer, RenderMode, RendererConfig};
use tasknest_access::{AccessContext, WorkspaceRef};

fn ctx(role: Role) -> AccessContext {
    AccessContext::new(Some(role)).with_workspace(WorkspaceRef::new("ws_1", "Acme"))
}

/// disable 模式保留子内容但不可交互，hide 模式省略子内容
#[test]
fn test_disable_keeps_children_hide_omits_them() {
    let remove_user = PermissionQuery::new(Resource::User, Action::Delete);

    let disabled = PermissionRenderer::permission(remove_user).mode(RenderMode::Disable);
    let out = disabled.render(&ctx(Role::Supervisor), || "Remove member", None);
    assert!(out.has_children());
    assert_eq!(out.content(), Some(&"Remove member"));
    assert!(!out.is_interactive());

    let hidden = PermissionRenderer::permission(remove_user).mode(RenderMode::Hide);
    let out = hidden.render(&ctx(Role::Supervisor), || "Remove member", None);
    assert!(!out.has_children());
    assert!(out.content().is_none());

    // 通过时两种模式都渲染可交互的子内容
    for renderer in [disabled, hidden] {
        let out = renderer.render(&ctx(Role::Admin), || "Remove member", None);
        assert_eq!(out, Rendered::Children("Remove member"));
        assert!(out.is_interactive());
    }
}

/// replace 模式渲染 fallback
#[test]
fn test_replace_mode() {
    let renderer = PermissionRenderer::permission(PermissionQuery::scoped(
        Resource::Task,
        Action::Delete,
        Scope::Team,
    ))
    .mode(RenderMode::Replace);

    let out = renderer.render(&ctx(Role::Member), || "Delete", Some("Ask your supervisor"));
    assert_eq!(out, Rendered::Fallback("Ask your supervisor"));

    let out = renderer.render(&ctx(Role::Supervisor), || "Delete", Some("Ask your supervisor"));
    assert_eq!(out, Rendered::Children("Delete"));
}

/// 不会产生错误面板
#[test]
fn test_never_renders_error_panel() {
    let renderer = PermissionRenderer::minimum_role(Role::Admin);
    for mode in [RenderMode::Hide, RenderMode::Disable, RenderMode::Replace] {
        let out = renderer.clone().mode(mode).render(&ctx(Role::Member), || 1, None);
        assert!(!out.is_error_panel());
    }
}

/// 权限、角色与自定义校验全部 AND
#[test]
fn test_requirements_combined() {
    let renderer = PermissionRenderer::role([Role::Supervisor, Role::Admin])
        .require_any_permission([
            PermissionQuery::new(Resource::Team, Action::Assign),
            PermissionQuery::new(Resource::User, Action::Assign),
        ])
        .require(|ctx| ctx.workspace().is_some_and(|w| w.id == "ws_1"));

    assert!(renderer.is_allowed(&ctx(Role::Supervisor)));
    assert!(!renderer.is_allowed(&ctx(Role::Member)));
    assert!(!renderer.is_allowed(&AccessContext::new(Some(Role::Admin))));
}

/// 自定义禁用样式
#[test]
fn test_custom_disabled_style() {
    let config = RendererConfig::default()
        .with_disabled_opacity(0.4)
        .with_disabled_class("is-disabled");
    assert!(config.validate().is_ok());

    let renderer = PermissionRenderer::custom(|_| false)
        .mode(RenderMode::Disable)
        .config(config);

    match renderer.render(&ctx(Role::Admin), || "Archive", None) {
        Rendered::Disabled(disabled) => {
            assert_eq!(disabled.opacity, 0.4);
            assert_eq!(disabled.class, "is-disabled");
            assert_eq!(disabled.content, "Archive");
        }
        other => panic!("expected disabled content, got {:?}", other),
    }
}

/// 渲染模式的序列化名称
#[test]
fn test_render_mode_serde() {
    let mode: RenderMode = serde_json::from_str("\"disable\"").unwrap();
    assert_eq!(mode, RenderMode::Disable);
    assert_eq!(RenderMode::default(), RenderMode::Hide);
}
