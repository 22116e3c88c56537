//! 统一错误类型模块
//!
//! 权限拒绝不是错误：检查失败总是返回普通的 `false` 或分类的拒绝结果。
//! 这里的错误只覆盖三类情况：
//!
//! - 解析不可信输入（例如来自网络的角色字符串）失败
//! - helper 层的使用错误（例如在没有工作区上下文时调用工作区 helper）
//! - 配置值校验失败

use std::fmt;

/// tasknest-access 的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// tasknest-access 的错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// 输入校验错误
    Validation(ValidationError),

    /// 访问上下文使用错误
    Context(ContextError),

    /// 配置错误
    Config(ConfigError),
}

impl Error {
    /// 是否是 helper 层的使用错误
    pub fn is_context_error(&self) -> bool {
        matches!(self, Error::Context(_))
    }
}

/// 输入校验相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 未知角色
    UnknownRole(String),
    /// 未知资源
    UnknownResource(String),
    /// 未知操作
    UnknownAction(String),
    /// 未知范围
    UnknownScope(String),
    /// 权限字符串格式无效
    InvalidPermission(String),
}

/// 访问上下文相关错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// 当前没有选中的工作区
    NoWorkspace,
    /// 当前用户在工作区中没有角色
    NoRole,
}

/// 配置相关错误
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 缺少必需的配置
    MissingRequired(String),
    /// 无效的配置值
    InvalidValue { key: String, message: String },
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Context(e) => write!(f, "Context error: {}", e),
            Error::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownRole(role) => write!(f, "unknown role: {}", role),
            ValidationError::UnknownResource(resource) => {
                write!(f, "unknown resource: {}", resource)
            }
            ValidationError::UnknownAction(action) => write!(f, "unknown action: {}", action),
            ValidationError::UnknownScope(scope) => write!(f, "unknown scope: {}", scope),
            ValidationError::InvalidPermission(value) => {
                write!(
                    f,
                    "invalid permission '{}': expected resource:action[:scope]",
                    value
                )
            }
        }
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::NoWorkspace => {
                write!(f, "workspace helper used without an active workspace")
            }
            ContextError::NoRole => write!(f, "role helper used without a workspace role"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingRequired(key) => {
                write!(f, "missing required configuration: {}", key)
            }
            ConfigError::InvalidValue { key, message } => {
                write!(f, "invalid configuration value for '{}': {}", key, message)
            }
        }
    }
}

// ============================================================================
// std::error::Error 实现
// ============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validation(e) => Some(e),
            Error::Context(e) => Some(e),
            Error::Config(e) => Some(e),
        }
    }
}

impl std::error::Error for ValidationError {}
impl std::error::Error for ContextError {}
impl std::error::Error for ConfigError {}

// ============================================================================
// From 实现
// ============================================================================

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<ContextError> for Error {
    fn from(err: ContextError) -> Self {
        Error::Context(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Validation(ValidationError::UnknownRole("owner".to_string()));
        assert_eq!(err.to_string(), "Validation error: unknown role: owner");
    }

    #[test]
    fn test_context_error_display() {
        let err: Error = ContextError::NoWorkspace.into();
        assert!(err.is_context_error());
        assert_eq!(
            err.to_string(),
            "Context error: workspace helper used without an active workspace"
        );
    }

    #[test]
    fn test_invalid_permission_display() {
        let err = ValidationError::InvalidPermission("task".to_string());
        assert_eq!(
            err.to_string(),
            "invalid permission 'task': expected resource:action[:scope]"
        );
    }

    #[test]
    fn test_error_source() {
        use std::error::Error as _;

        let err: Error = ConfigError::MissingRequired("disabled_class".to_string()).into();
        assert!(err.source().is_some());
        let err: Error = ValidationError::UnknownScope("global".to_string()).into();
        assert!(err.source().is_some());
    }
}
