//! 审计日志模块
//!
//! 记录访问控制相关的安全事件，包括：
//!
//! - **访问事件**: 授权通过、拒绝、角色分配、无效角色输入
//! - **审计日志 Trait**: 定义日志记录接口
//! - **内存实现**: 用于测试和开发的简单实现
//!
//! ## 使用示例
//!
//! ```rust
//! use std::sync::Arc;
//! use tasknest_access::audit::{EventType, InMemoryAuditLogger};
//! use tasknest_access::{AccessContext, rbac::Role};
//!
//! let logger = InMemoryAuditLogger::new();
//! let ctx = AccessContext::new(Some(Role::Supervisor))
//!     .with_user_id("user_7")
//!     .with_audit_logger(Arc::new(logger.clone()));
//!
//! // supervisor 不能分配角色
//! let assigned = tasknest_access::audit::record_role_assignment(&ctx, "user_9", Role::Admin);
//! assert!(!assigned);
//!
//! let events = logger.get_events_by_type(&EventType::RoleAssignmentRejected);
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].user_id.as_deref(), Some("user_7"));
//! ```

use crate::context::AccessContext;
use crate::guard::{AccessDenial, DenialCategory};
use crate::rbac::{Role, can_assign_role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// 事件严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventSeverity {
    /// 调试信息
    Debug,
    /// 一般信息
    #[default]
    Info,
    /// 警告
    Warning,
    /// 错误
    Error,
}

impl std::fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventSeverity::Debug => write!(f, "DEBUG"),
            EventSeverity::Info => write!(f, "INFO"),
            EventSeverity::Warning => write!(f, "WARNING"),
            EventSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// 访问事件类型
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// 访问通过
    AccessGranted,
    /// 访问被拒绝
    AccessDenied,
    /// 角色已分配
    RoleAssigned,
    /// 角色分配被拒绝
    RoleAssignmentRejected,
    /// 无效的角色输入
    InvalidRoleInput,
    /// 自定义事件
    Custom(String),
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::AccessGranted => write!(f, "access_granted"),
            EventType::AccessDenied => write!(f, "access_denied"),
            EventType::RoleAssigned => write!(f, "role_assigned"),
            EventType::RoleAssignmentRejected => write!(f, "role_assignment_rejected"),
            EventType::InvalidRoleInput => write!(f, "invalid_role_input"),
            EventType::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// 访问事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessEvent {
    /// 事件 ID
    pub id: String,
    /// 事件类型
    pub event_type: EventType,
    /// 严重程度
    pub severity: EventSeverity,
    /// 发起访问的用户 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// 工作区 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// 发起访问时的角色
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// 拒绝类别
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DenialCategory>,
    /// 事件消息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 额外详情
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
    /// 事件时间
    pub timestamp: DateTime<Utc>,
}

impl AccessEvent {
    /// 创建新的事件
    pub fn new(event_type: EventType, severity: EventSeverity) -> Self {
        Self {
            id: generate_event_id(),
            event_type,
            severity,
            user_id: None,
            workspace_id: None,
            role: None,
            category: None,
            message: None,
            details: HashMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// 创建自定义事件
    pub fn custom(name: impl Into<String>, severity: EventSeverity) -> Self {
        Self::new(EventType::Custom(name.into()), severity)
    }

    // ========================================================================
    // 便捷构造方法
    // ========================================================================

    /// 访问通过
    pub fn access_granted(target: impl Into<String>) -> Self {
        Self::new(EventType::AccessGranted, EventSeverity::Debug).with_detail("target", target)
    }

    /// 访问被拒绝
    pub fn access_denied(denial: &AccessDenial) -> Self {
        let mut event = Self::new(EventType::AccessDenied, EventSeverity::Warning)
            .with_message(denial.message.clone());
        event.category = Some(denial.category);
        if !denial.required.is_empty() {
            event = event.with_detail("required", denial.required.join(", "));
        }
        event
    }

    /// 角色已分配
    pub fn role_assigned(target_user_id: impl Into<String>, role: Role) -> Self {
        Self::new(EventType::RoleAssigned, EventSeverity::Info)
            .with_detail("target_user_id", target_user_id)
            .with_detail("assigned_role", role.as_str())
            .with_message("Role assigned")
    }

    /// 角色分配被拒绝
    pub fn role_assignment_rejected(target_user_id: impl Into<String>, role: Role) -> Self {
        Self::new(EventType::RoleAssignmentRejected, EventSeverity::Warning)
            .with_detail("target_user_id", target_user_id)
            .with_detail("requested_role", role.as_str())
            .with_message("Only admins can assign roles")
    }

    /// 无效的角色输入
    pub fn invalid_role_input(value: impl Into<String>) -> Self {
        Self::new(EventType::InvalidRoleInput, EventSeverity::Warning)
            .with_detail("value", value)
            .with_message("Unknown role value rejected")
    }

    // ========================================================================
    // Builder 方法
    // ========================================================================

    /// 设置用户 ID
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// 设置工作区 ID
    pub fn with_workspace_id(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    /// 设置角色
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// 设置消息
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// 添加详情
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// 设置严重程度
    pub fn with_severity(mut self, severity: EventSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// 获取事件类型名称
    pub fn event_name(&self) -> String {
        self.event_type.to_string()
    }

    /// 是否是拒绝类事件
    pub fn is_denial(&self) -> bool {
        matches!(
            self.event_type,
            EventType::AccessDenied | EventType::RoleAssignmentRejected
        )
    }
}

/// 生成事件 ID
fn generate_event_id() -> String {
    format!("evt_{:016x}", rand::random::<u64>())
}

/// 按分配资格记录一次角色分配
///
/// 返回是否允许分配。只有管理员可以分配角色。
pub fn record_role_assignment(ctx: &AccessContext, target_user_id: &str, role: Role) -> bool {
    let allowed = can_assign_role(ctx.role(), role);
    let event = if allowed {
        AccessEvent::role_assigned(target_user_id, role)
    } else {
        AccessEvent::role_assignment_rejected(target_user_id, role)
    };
    ctx.record(event);
    allowed
}

// ============================================================================
// AuditLogger Trait
// ============================================================================

/// 审计日志记录器 trait
pub trait AuditLogger: Send + Sync {
    /// 记录事件
    fn log(&self, event: AccessEvent);

    /// 批量记录事件
    fn log_batch(&self, events: Vec<AccessEvent>) {
        for event in events {
            self.log(event);
        }
    }
}

// ============================================================================
// InMemoryAuditLogger
// ============================================================================

/// [`InMemoryAuditLogger::new`] 保留的最大事件数
pub const DEFAULT_MAX_EVENTS: usize = 10_000;

/// 内存审计日志记录器
///
/// 用于测试和开发环境。克隆的实例共享同一份事件列表。
/// 事件数总是有上限的，超出时丢弃最早的事件。
#[derive(Debug)]
pub struct InMemoryAuditLogger {
    events: Arc<RwLock<Vec<AccessEvent>>>,
    max_events: usize,
}

impl InMemoryAuditLogger {
    /// 创建新的内存日志记录器，最多保留 [`DEFAULT_MAX_EVENTS`] 个事件
    pub fn new() -> Self {
        Self::with_max_events(DEFAULT_MAX_EVENTS)
    }

    /// 创建带有最大事件数限制的日志记录器
    pub fn with_max_events(max: usize) -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            max_events: max,
        }
    }

    /// 最大事件数
    pub fn max_events(&self) -> usize {
        self.max_events
    }

    fn filtered(&self, predicate: impl Fn(&AccessEvent) -> bool) -> Vec<AccessEvent> {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| predicate(*e))
            .cloned()
            .collect()
    }

    /// 获取所有事件
    pub fn get_events(&self) -> Vec<AccessEvent> {
        self.filtered(|_| true)
    }

    /// 获取事件数量
    pub fn event_count(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// 按用户 ID 获取事件
    pub fn get_events_by_user(&self, user_id: &str) -> Vec<AccessEvent> {
        self.filtered(|e| e.user_id.as_deref() == Some(user_id))
    }

    /// 按工作区获取事件
    pub fn get_events_by_workspace(&self, workspace_id: &str) -> Vec<AccessEvent> {
        self.filtered(|e| e.workspace_id.as_deref() == Some(workspace_id))
    }

    /// 按事件类型获取事件
    pub fn get_events_by_type(&self, event_type: &EventType) -> Vec<AccessEvent> {
        self.filtered(|e| &e.event_type == event_type)
    }

    /// 按拒绝类别获取事件
    pub fn get_events_by_category(&self, category: DenialCategory) -> Vec<AccessEvent> {
        self.filtered(|e| e.category == Some(category))
    }

    /// 按严重程度获取事件
    pub fn get_events_by_severity(&self, severity: EventSeverity) -> Vec<AccessEvent> {
        self.filtered(|e| e.severity == severity)
    }

    /// 获取时间范围内的事件
    pub fn get_events_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<AccessEvent> {
        self.filtered(|e| e.timestamp >= start && e.timestamp <= end)
    }

    /// 获取最近 N 个事件（最新的在前）
    pub fn get_recent_events(&self, count: usize) -> Vec<AccessEvent> {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        events.iter().rev().take(count).cloned().collect()
    }

    /// 清空所有事件
    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> AuditStats {
        let events = self.events.read().unwrap_or_else(PoisonError::into_inner);
        let mut stats = AuditStats {
            total_events: events.len(),
            ..Default::default()
        };

        for event in events.iter() {
            if event.is_denial() {
                stats.denied_count += 1;
            }
            if let Some(category) = event.category {
                *stats.denials_by_category.entry(category).or_insert(0) += 1;
            }
            *stats.events_by_type.entry(event.event_name()).or_insert(0) += 1;
        }

        stats
    }
}

impl AuditLogger for InMemoryAuditLogger {
    fn log(&self, event: AccessEvent) {
        let mut events = self.events.write().unwrap_or_else(PoisonError::into_inner);

        if self.max_events == 0 {
            return;
        }
        if events.len() >= self.max_events {
            let excess = events.len() + 1 - self.max_events;
            events.drain(..excess);
        }

        events.push(event);
    }
}

impl Default for InMemoryAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryAuditLogger {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            max_events: self.max_events,
        }
    }
}

/// 审计统计信息
#[derive(Debug, Default, Clone)]
pub struct AuditStats {
    /// 总事件数
    pub total_events: usize,
    /// 拒绝类事件数
    pub denied_count: usize,
    /// 按拒绝类别统计
    pub denials_by_category: HashMap<DenialCategory, usize>,
    /// 按类型统计
    pub events_by_type: HashMap<String, usize>,
}

// ============================================================================
// NoOpAuditLogger
// ============================================================================

/// 空操作日志记录器
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpAuditLogger;

impl NoOpAuditLogger {
    /// 创建新的空操作日志记录器
    pub fn new() -> Self {
        Self
    }
}

impl AuditLogger for NoOpAuditLogger {
    fn log(&self, _event: AccessEvent) {}
}
