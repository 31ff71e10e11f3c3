//! 全局错误处理模块
//!
//! 提供统一的应用错误类型和用户友好的错误消息
//!
//! # 功能
//!
//! - 统一的 `AppError` 类型，聚合所有模块错误
//! - 用户友好的错误消息（支持多语言）
//! - 错误代码用于前端处理
//! - 错误恢复建议
//!
//! # 使用示例
//!
//! ```
//! use courseflow_lib::utils::error::{AppError, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     // 从其他错误类型自动转换
//!     // let next = editor.dispatch_value(value)?;
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::course::CourseError;
use crate::editor::{ConfigError, EditorError};

/// 应用错误类型
///
/// 聚合所有模块的错误类型，提供统一的错误处理接口
#[derive(Error, Debug)]
pub enum AppError {
    /// 状态机错误
    #[error("Course error: {0}")]
    Course(#[from] CourseError),

    /// 编辑会话错误
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 错误代码
///
/// 用于前端识别和处理特定错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // 动作错误 (1xxx)
    /// 无法识别的动作种类
    UnrecognizedAction,
    /// 动作载荷不合法
    MalformedAction,

    // 会话错误 (2xxx)
    /// 编辑会话已关闭
    EditorClosed,

    // 配置错误 (3xxx)
    /// 配置加载失败
    ConfigLoadFailed,
    /// 配置无效
    ConfigInvalid,

    // 通用错误 (9xxx)
    /// 内部错误
    InternalError,
    /// 未知错误
    Unknown,
}

/// 错误上下文信息
///
/// 提供用户友好的错误信息和恢复建议
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// 错误代码
    pub code: ErrorCode,
    /// 用户友好的错误消息
    pub message: String,
    /// 详细错误信息（用于日志）
    pub detail: Option<String>,
    /// 恢复建议
    pub recovery_hint: Option<String>,
    /// 是否可恢复
    pub recoverable: bool,
}

impl ErrorContext {
    /// 创建新的错误上下文
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
            recovery_hint: None,
            recoverable: true,
        }
    }

    /// 设置详细信息
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// 设置恢复建议
    pub fn with_recovery_hint(mut self, hint: impl Into<String>) -> Self {
        self.recovery_hint = Some(hint.into());
        self
    }

    /// 标记为不可恢复
    pub fn not_recoverable(mut self) -> Self {
        self.recoverable = false;
        self
    }
}

impl AppError {
    /// 获取错误代码
    pub fn code(&self) -> ErrorCode {
        match self {
            // 动作错误
            AppError::Course(CourseError::UnrecognizedAction { .. }) => {
                ErrorCode::UnrecognizedAction
            }
            AppError::Editor(EditorError::Course(_)) => ErrorCode::UnrecognizedAction,
            AppError::Editor(EditorError::MalformedAction(_)) => ErrorCode::MalformedAction,

            // 会话错误
            AppError::Editor(EditorError::Closed) => ErrorCode::EditorClosed,

            // 配置错误
            AppError::Config(ConfigError::Io(_)) => ErrorCode::ConfigLoadFailed,
            AppError::Config(ConfigError::Json(_)) => ErrorCode::ConfigInvalid,

            // 通用错误
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// 获取用户友好的错误消息
    ///
    /// 返回适合直接显示给用户的错误消息
    pub fn user_message(&self) -> String {
        match self {
            // 动作错误
            AppError::Course(CourseError::UnrecognizedAction { .. }) => {
                "无法识别的编辑动作，请刷新页面后重试".to_string()
            }
            AppError::Editor(EditorError::Course(_)) => {
                "无法识别的编辑动作，请刷新页面后重试".to_string()
            }
            AppError::Editor(EditorError::MalformedAction(_)) => {
                "编辑动作数据格式错误".to_string()
            }

            // 会话错误
            AppError::Editor(EditorError::Closed) => {
                "编辑会话已结束，请重新打开课程".to_string()
            }

            // 配置错误
            AppError::Config(ConfigError::Io(_)) => {
                "无法读取配置文件".to_string()
            }
            AppError::Config(ConfigError::Json(_)) => {
                "配置文件格式错误".to_string()
            }

            // 通用错误
            AppError::Internal(msg) => {
                format!("内部错误: {}", msg)
            }
        }
    }

    /// 获取完整的错误上下文
    pub fn context(&self) -> ErrorContext {
        let code = self.code();
        let message = self.user_message();

        let mut ctx = ErrorContext::new(code, message)
            .with_detail(self.to_string());

        // 添加恢复建议
        ctx.recovery_hint = self.recovery_hint();

        // 某些错误不可恢复
        if matches!(self, AppError::Config(_) | AppError::Internal(_)) {
            ctx = ctx.not_recoverable();
        }

        ctx
    }

    /// 获取恢复建议
    pub fn recovery_hint(&self) -> Option<String> {
        match self {
            AppError::Course(CourseError::UnrecognizedAction { .. })
            | AppError::Editor(EditorError::Course(_)) => {
                Some("请刷新页面，使用最新版本的编辑器重新操作".to_string())
            }
            AppError::Editor(EditorError::MalformedAction(_)) => {
                Some("请检查动作数据是否包含全部必需字段".to_string())
            }
            AppError::Editor(EditorError::Closed) => {
                Some("请重新打开课程进入编辑".to_string())
            }
            _ => None,
        }
    }

    /// 检查错误是否可恢复
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Config(_) | AppError::Internal(_))
    }

    /// 检查是否是无法识别的动作
    pub fn is_unrecognized_action(&self) -> bool {
        matches!(
            self,
            AppError::Course(CourseError::UnrecognizedAction { .. })
                | AppError::Editor(EditorError::Course(_))
        )
    }

    /// 检查是否是会话已关闭错误
    pub fn is_closed(&self) -> bool {
        matches!(self, AppError::Editor(EditorError::Closed))
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 将任意错误转换为内部错误
impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unrecognized() -> CourseError {
        CourseError::UnrecognizedAction {
            kind: "SET_PRICE".to_string(),
        }
    }

    #[test]
    fn test_error_code() {
        let err = AppError::Course(unrecognized());
        assert_eq!(err.code(), ErrorCode::UnrecognizedAction);

        let err = AppError::Editor(EditorError::Closed);
        assert_eq!(err.code(), ErrorCode::EditorClosed);

        let err = AppError::Editor(EditorError::Course(unrecognized()));
        assert_eq!(err.code(), ErrorCode::UnrecognizedAction);
    }

    #[test]
    fn test_user_message() {
        let err = AppError::Course(unrecognized());
        assert!(err.user_message().contains("无法识别"));

        let err = AppError::Editor(EditorError::Closed);
        assert!(err.user_message().contains("已结束"));
    }

    #[test]
    fn test_error_context() {
        let err = AppError::Editor(EditorError::Closed);
        let ctx = err.context();

        assert_eq!(ctx.code, ErrorCode::EditorClosed);
        assert!(!ctx.message.is_empty());
        assert!(ctx.detail.is_some());
        assert!(ctx.recovery_hint.is_some());
        assert!(ctx.recoverable);
    }

    #[test]
    fn test_recoverable() {
        // 可恢复的错误
        let err = AppError::Course(unrecognized());
        assert!(err.is_recoverable());

        // 不可恢复的错误
        let err = AppError::Internal("fatal".to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_predicates() {
        let err = AppError::Course(unrecognized());
        assert!(err.is_unrecognized_action());
        assert!(!err.is_closed());

        let err = AppError::Editor(EditorError::Closed);
        assert!(err.is_closed());
        assert!(!err.is_unrecognized_action());
    }

    #[test]
    fn test_from_string() {
        let err: AppError = "test error".into();
        match err {
            AppError::Internal(msg) => assert_eq!(msg, "test error"),
            _ => panic!("Expected Internal error"),
        }
    }

    #[test]
    fn test_error_code_serialization() {
        let code = ErrorCode::UnrecognizedAction;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"UNRECOGNIZED_ACTION\"");

        let deserialized: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, code);
    }

    #[test]
    fn test_error_context_serialization() {
        let ctx = ErrorContext::new(ErrorCode::EditorClosed, "Test message")
            .with_detail("Detailed error")
            .with_recovery_hint("Try again");

        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("EDITOR_CLOSED"));
        assert!(json.contains("Test message"));

        let deserialized: ErrorContext = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.code, ErrorCode::EditorClosed);
        assert_eq!(deserialized.message, "Test message");
    }
}
