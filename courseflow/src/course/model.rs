//! 课程数据模型
//!
//! 定义课程编辑状态机的核心数据结构：课程、课时、分类与标识符。
//! `Course` 是状态机的完整状态快照，转换函数只在这些结构上工作，
//! 不依赖任何外部环境。
//!
//! 线上表示与协作方约定保持一致：字段使用 camelCase，分类使用
//! 展示名（如 "UI/UX"、"Node.js"）。

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 课程唯一标识符
///
/// 新建课程时生成 UUID v4；编辑已有课程时沿用传入的标识符。
/// 标识符在整个编辑会话内不变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(String);

impl CourseId {
    /// 生成新的课程标识符
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// 从已有字符串创建标识符
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 获取字符串表示
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 课时唯一标识符
///
/// 由提交动作的协作方分配，状态机本身不生成课时标识符。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonId(String);

impl LessonId {
    /// 从已有字符串创建标识符
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 获取字符串表示
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 课程分类
///
/// 固定的分类集合，线上表示使用展示名。新建课程默认为 `UiUx`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    /// UI/UX 设计
    #[default]
    #[serde(rename = "UI/UX")]
    UiUx,
    /// JavaScript 开发
    JavaScript,
    /// PHP 开发
    #[serde(rename = "PHP")]
    Php,
    /// 数据库
    Database,
    /// Node.js 开发
    #[serde(rename = "Node.js")]
    NodeJs,
}

impl Category {
    /// 获取展示名
    pub fn label(&self) -> &'static str {
        match self {
            Category::UiUx => "UI/UX",
            Category::JavaScript => "JavaScript",
            Category::Php => "PHP",
            Category::Database => "Database",
            Category::NodeJs => "Node.js",
        }
    }

    /// 获取全部分类（按展示顺序）
    pub fn all() -> &'static [Category] {
        &[
            Category::UiUx,
            Category::JavaScript,
            Category::Php,
            Category::Database,
            Category::NodeJs,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 课时
///
/// 已纳入课程的课时条目。`kind` 为讲授形式（如 "video"、"quiz"），
/// 状态机按不透明字符串透传，不作校验。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// 课时标识符
    pub lesson_id: LessonId,
    /// 课时标题
    pub title: String,
    /// 讲授形式
    #[serde(rename = "type")]
    pub kind: String,
}

impl Lesson {
    /// 创建课时
    pub fn new(lesson_id: LessonId, title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            lesson_id,
            title: title.into(),
            kind: kind.into(),
        }
    }
}

/// 课时草稿
///
/// 新增课时动作携带的载荷。字段命名与线上动作表示一致
/// （`lessonTitle`、`lessonType`），纳入课程时映射为 [`Lesson`]。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDraft {
    /// 课时标识符
    pub lesson_id: LessonId,
    /// 课时标题
    pub lesson_title: String,
    /// 讲授形式
    pub lesson_type: String,
}

impl LessonDraft {
    /// 创建课时草稿
    pub fn new(
        lesson_id: LessonId,
        lesson_title: impl Into<String>,
        lesson_type: impl Into<String>,
    ) -> Self {
        Self {
            lesson_id,
            lesson_title: lesson_title.into(),
            lesson_type: lesson_type.into(),
        }
    }

    /// 转换为课时条目
    pub fn into_lesson(self) -> Lesson {
        Lesson {
            lesson_id: self.lesson_id,
            title: self.lesson_title,
            kind: self.lesson_type,
        }
    }
}

impl From<LessonDraft> for Lesson {
    fn from(draft: LessonDraft) -> Self {
        draft.into_lesson()
    }
}

/// 课程编辑状态
///
/// 状态机的完整状态。每次转换都返回新的 `Course` 值，
/// 旧值保持不变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// 课程标识符（会话内不变）
    pub course_id: CourseId,
    /// 课程标题
    pub course_title: String,
    /// 课程分类
    pub category: Category,
    /// 课时数量（与 `lessons.len()` 同步维护）
    pub lesson_count: usize,
    /// 课时列表（按加入顺序）
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// 创建空白课程
    ///
    /// 生成新标识符，标题为空，分类为默认分类，无课时。
    pub fn new() -> Self {
        Self {
            course_id: CourseId::new(),
            course_title: String::new(),
            category: Category::default(),
            lesson_count: 0,
            lessons: Vec::new(),
        }
    }

    /// 标题是否非空
    ///
    /// 提交闸门条件：只有标题非空的课程才允许提交。
    pub fn has_title(&self) -> bool {
        !self.course_title.is_empty()
    }

    /// 是否没有任何课时
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// 是否包含指定课时
    pub fn has_lesson(&self, lesson_id: &LessonId) -> bool {
        self.lessons.iter().any(|l| &l.lesson_id == lesson_id)
    }

    /// 按标识符查找课时
    pub fn lesson(&self, lesson_id: &LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| &l.lesson_id == lesson_id)
    }

    /// 计数器与课时列表是否一致
    pub fn is_consistent(&self) -> bool {
        self.lesson_count == self.lessons.len()
    }
}

impl Default for Course {
    fn default() -> Self {
        Self::new()
    }
}
