//! 错误面板模块
//!
//! 被拒绝的 Guard 展示说明面板，而不是空白页面：按拒绝类别选择图标、标题和补救操作。

use super::{AccessDenial, DenialCategory};
use serde::{Deserialize, Serialize};

/// 面板图标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelIcon {
    /// 工作区
    Building,
    /// 锁
    Lock,
    /// 盾牌
    Shield,
    /// 警告
    Alert,
}

/// 补救操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemedialAction {
    /// 返回上一页
    GoBack,
    /// 切换工作区
    SwitchWorkspace,
    /// 联系管理员
    ContactAdmin,
}

/// 错误面板配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPanelConfig {
    /// “返回”按钮文本
    pub back_label: String,
    /// “切换工作区”按钮文本
    pub switch_workspace_label: String,
    /// “联系管理员”按钮文本
    pub contact_admin_label: String,
    /// 管理员联系方式，附加在角色不足的说明后面
    pub admin_contact: Option<String>,
}

impl Default for ErrorPanelConfig {
    fn default() -> Self {
        Self {
            back_label: "Go Back".to_string(),
            switch_workspace_label: "Switch Workspace".to_string(),
            contact_admin_label: "Contact Admin".to_string(),
            admin_contact: None,
        }
    }
}

impl ErrorPanelConfig {
    /// 设置“返回”按钮文本
    pub fn with_back_label(mut self, label: impl Into<String>) -> Self {
        self.back_label = label.into();
        self
    }

    /// 设置“切换工作区”按钮文本
    pub fn with_switch_workspace_label(mut self, label: impl Into<String>) -> Self {
        self.switch_workspace_label = label.into();
        self
    }

    /// 设置“联系管理员”按钮文本
    pub fn with_contact_admin_label(mut self, label: impl Into<String>) -> Self {
        self.contact_admin_label = label.into();
        self
    }

    /// 设置管理员联系方式
    pub fn with_admin_contact(mut self, contact: impl Into<String>) -> Self {
        self.admin_contact = Some(contact.into());
        self
    }

    fn action_label(&self, action: RemedialAction) -> &str {
        match action {
            RemedialAction::GoBack => &self.back_label,
            RemedialAction::SwitchWorkspace => &self.switch_workspace_label,
            RemedialAction::ContactAdmin => &self.contact_admin_label,
        }
    }
}

/// 错误面板
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPanel {
    /// 拒绝类别
    pub category: DenialCategory,
    /// 图标
    pub icon: PanelIcon,
    /// 标题
    pub title: String,
    /// 说明
    pub message: String,
    /// 补救操作
    pub action: RemedialAction,
    /// 补救操作按钮文本
    pub action_label: String,
    /// 缺少的角色或权限描述
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ErrorPanel {
    /// 根据拒绝构造错误面板
    pub fn from_denial(denial: &AccessDenial, config: &ErrorPanelConfig) -> Self {
        let (icon, title, action) = match denial.category {
            DenialCategory::NoWorkspace => (
                PanelIcon::Building,
                "No Workspace Selected",
                RemedialAction::SwitchWorkspace,
            ),
            DenialCategory::WorkspaceAccess => (
                PanelIcon::Lock,
                "Workspace Access Denied",
                RemedialAction::SwitchWorkspace,
            ),
            DenialCategory::InsufficientRole => (
                PanelIcon::Shield,
                "Insufficient Role",
                RemedialAction::ContactAdmin,
            ),
            DenialCategory::InsufficientPermission => {
                (PanelIcon::Shield, "Access Denied", RemedialAction::GoBack)
            }
            DenialCategory::CustomValidation => {
                (PanelIcon::Alert, "Access Restricted", RemedialAction::GoBack)
            }
        };

        let message = match (&config.admin_contact, action) {
            (Some(contact), RemedialAction::ContactAdmin) => format!(
                "{} Contact {} to request access.",
                denial.message, contact
            ),
            _ => denial.message.clone(),
        };

        Self {
            category: denial.category,
            icon,
            title: title.to_string(),
            message,
            action,
            action_label: config.action_label(action).to_string(),
            required: denial.required.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(category: DenialCategory) -> ErrorPanel {
        ErrorPanel::from_denial(
            &AccessDenial::new(category, "message"),
            &ErrorPanelConfig::default(),
        )
    }

    #[test]
    fn test_panel_per_category() {
        let p = panel(DenialCategory::NoWorkspace);
        assert_eq!(p.icon, PanelIcon::Building);
        assert_eq!(p.action, RemedialAction::SwitchWorkspace);
        assert_eq!(p.action_label, "Switch Workspace");

        let p = panel(DenialCategory::WorkspaceAccess);
        assert_eq!(p.icon, PanelIcon::Lock);
        assert_eq!(p.title, "Workspace Access Denied");

        let p = panel(DenialCategory::InsufficientRole);
        assert_eq!(p.action, RemedialAction::ContactAdmin);
        assert_eq!(p.title, "Insufficient Role");

        let p = panel(DenialCategory::InsufficientPermission);
        assert_eq!(p.action, RemedialAction::GoBack);
        assert_eq!(p.action_label, "Go Back");

        let p = panel(DenialCategory::CustomValidation);
        assert_eq!(p.icon, PanelIcon::Alert);
    }

    #[test]
    fn test_admin_contact_only_for_role_denials() {
        let config = ErrorPanelConfig::default().with_admin_contact("it@tasknest.io");

        let role = ErrorPanel::from_denial(
            &AccessDenial::new(DenialCategory::InsufficientRole, "Admins only."),
            &config,
        );
        assert_eq!(
            role.message,
            "Admins only. Contact it@tasknest.io to request access."
        );

        let perm = ErrorPanel::from_denial(
            &AccessDenial::new(DenialCategory::InsufficientPermission, "Nope."),
            &config,
        );
        assert_eq!(perm.message, "Nope.");
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: ErrorPanelConfig =
            serde_json::from_str(r#"{"back_label":"Zurück"}"#).unwrap();
        assert_eq!(config.back_label, "Zurück");
        assert_eq!(config.contact_admin_label, "Contact Admin");
        assert!(config.admin_contact.is_none());
    }
}
