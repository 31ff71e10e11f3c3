//! 课程状态机错误类型

use thiserror::Error;

/// 课程状态机错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CourseError {
    /// 无法识别的动作种类
    #[error("Unrecognized action kind: {kind:?}")]
    UnrecognizedAction {
        /// 线上 `type` 标签的原始值（标签缺失时为空字符串）
        kind: String,
    },
}

/// 课程状态机的结果类型
pub type CourseResult<T> = Result<T, CourseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CourseError::UnrecognizedAction {
            kind: "SET_PRICE".to_string(),
        };
        assert_eq!(err.to_string(), "Unrecognized action kind: \"SET_PRICE\"");
    }

    #[test]
    fn test_error_equality() {
        let a = CourseError::UnrecognizedAction {
            kind: "X".to_string(),
        };
        let b = CourseError::UnrecognizedAction {
            kind: "X".to_string(),
        };
        assert_eq!(a, b);
    }
}
