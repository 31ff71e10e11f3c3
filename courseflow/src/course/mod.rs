//! 课程状态机模块
//!
//! 课程编辑状态机的核心：数据模型、动作词汇与纯转换函数。
//! 本模块不含任何会话或 IO 逻辑，所有函数都是纯函数，
//! 便于单独测试与复用。
//!
//! # 模块结构
//!
//! - `model` - 课程、课时、分类与标识符
//! - `action` - 编辑动作词汇与线上识别
//! - `transition` - 初始化与状态转换
//! - `error` - 状态机错误类型

mod action;
mod error;
mod model;
mod transition;

pub use action::{CourseAction, RECOGNIZED_KINDS};
pub use error::{CourseError, CourseResult};
pub use model::{Category, Course, CourseId, Lesson, LessonDraft, LessonId};
pub use transition::{init_state, transition};
