//! Guard 组合
//!
//! 在一个组件外依次包裹权限 Guard、角色 Guard、工作区 Guard（由内到外）。
//! 评估从最外层开始并在第一个失败处短路，因此当角色与权限同时不满足时，
//! 渲染的是角色 Guard 的错误面板。未配置的层会被直接跳过。

use super::{
    Guard, GuardDecision, GuardOptions, PermissionGuard, Rendered, RoleGuard, WorkspaceGuard, deny,
};
use crate::context::AccessContext;

/// 按固定顺序组合的 Guard 集合
///
/// # 示例
///
/// ```rust
/// use tasknest_access::{AccessContext, WorkspaceRef};
/// use tasknest_access::guard::{DenialCategory, GuardStack, PermissionGuard, RoleGuard};
/// use tasknest_access::rbac::{Action, PermissionQuery, Resource, Role};
///
/// let team_admin = GuardStack::new()
///     .permission(PermissionGuard::new().require_permission(
///         PermissionQuery::new(Resource::Team, Action::Delete),
///     ))
///     .role(RoleGuard::new().require_role(Role::Admin))
///     .wrap(|ctx: &AccessContext| format!("team admin for {:?}", ctx.role()));
///
/// let member = AccessContext::new(Some(Role::Member));
/// let out = team_admin.render(&member);
/// assert_eq!(
///     out.error_panel().map(|p| p.category),
///     Some(DenialCategory::InsufficientRole)
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct GuardStack {
    permission: Option<PermissionGuard>,
    role: Option<RoleGuard>,
    workspace: Option<WorkspaceGuard>,
}

impl GuardStack {
    /// 创建空的组合（所有层都跳过）
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置最内层的权限 Guard
    pub fn permission(mut self, guard: PermissionGuard) -> Self {
        self.permission = Some(guard);
        self
    }

    /// 设置中间层的角色 Guard
    pub fn role(mut self, guard: RoleGuard) -> Self {
        self.role = Some(guard);
        self
    }

    /// 设置最外层的工作区 Guard
    pub fn workspace(mut self, guard: WorkspaceGuard) -> Self {
        self.workspace = Some(guard);
        self
    }

    /// 是否没有配置任何层
    pub fn is_empty(&self) -> bool {
        self.permission.is_none() && self.role.is_none() && self.workspace.is_none()
    }

    /// 由外到内的已配置层
    fn layers(&self) -> impl Iterator<Item = &dyn Guard> {
        let workspace = self.workspace.as_ref().map(|g| g as &dyn Guard);
        let role = self.role.as_ref().map(|g| g as &dyn Guard);
        let permission = self.permission.as_ref().map(|g| g as &dyn Guard);
        [workspace, role, permission].into_iter().flatten()
    }

    /// 评估所有层，返回第一个失败的层及其结果
    fn evaluate(&self, ctx: &AccessContext) -> Option<(GuardDecision, &GuardOptions)> {
        self.layers().find_map(|guard| {
            let decision = guard.check(ctx);
            decision.is_denied().then(|| (decision, guard.options()))
        })
    }

    /// 评估但不渲染
    pub fn check(&self, ctx: &AccessContext) -> GuardDecision {
        self.evaluate(ctx)
            .map_or(GuardDecision::Granted, |(decision, _)| decision)
    }

    /// 渲染受保护的内容
    ///
    /// 拒绝时使用失败那一层的选项决定是否展示错误面板。
    pub fn render<T>(
        &self,
        ctx: &AccessContext,
        children: impl FnOnce() -> T,
        fallback: Option<T>,
    ) -> Rendered<T> {
        match self.evaluate(ctx) {
            None => Rendered::Children(children()),
            Some((GuardDecision::Denied(denial), options)) => deny(ctx, &denial, options, fallback),
            Some((GuardDecision::Granted, _)) => Rendered::Children(children()),
        }
    }

    /// 用此组合包裹一个组件
    pub fn wrap<T, F>(self, component: F) -> Guarded<T, F>
    where
        F: Fn(&AccessContext) -> T,
    {
        Guarded {
            guards: self,
            component,
            fallback: None,
        }
    }
}

/// 被 Guard 包裹的组件
///
/// 每次 `render` 都重新评估，没有缓存。
#[derive(Debug, Clone)]
pub struct Guarded<T, F> {
    guards: GuardStack,
    component: F,
    fallback: Option<T>,
}

impl<T, F> Guarded<T, F>
where
    F: Fn(&AccessContext) -> T,
{
    /// 设置拒绝时的 fallback
    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Guard 组合
    pub fn guards(&self) -> &GuardStack {
        &self.guards
    }

    /// 渲染组件
    pub fn render(&self, ctx: &AccessContext) -> Rendered<T>
    where
        T: Clone,
    {
        self.guards
            .render(ctx, || (self.component)(ctx), self.fallback.clone())
    }
}

/// 不渲染，只评估一组 Guard
///
/// 与 Guard 渲染使用相同的判定逻辑；未配置任何层时通过。
pub fn check_guards(ctx: &AccessContext, guards: &GuardStack) -> GuardDecision {
    guards.check(ctx)
}
