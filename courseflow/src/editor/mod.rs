//! 课程编辑会话模块
//!
//! 在纯状态机之上提供一个可共享的编辑会话：持有当前课程状态、
//! 派发编辑动作、广播状态变更事件，并执行提交闸门。
//!
//! # 功能
//!
//! - 新建课程或继续编辑已有课程
//! - 派发类型化动作与未类型化的线上动作值
//! - 状态变更事件通知
//! - 提交闸门（标题非空才允许提交）与取消
//!
//! # 使用示例
//!
//! ```
//! use courseflow_lib::course::CourseAction;
//! use courseflow_lib::editor::CourseEditor;
//!
//! let editor = CourseEditor::new();
//! editor.dispatch(CourseAction::set_title("Rust 入门")).unwrap();
//!
//! let course = editor.commit().expect("title is set");
//! assert_eq!(course.course_title, "Rust 入门");
//! ```
//!
//! # 工作流程
//!
//! ```text
//! 1. 打开会话
//!    └── 新建：空白课程（新标识符） / 编辑：传入课程原样接管
//!
//! 2. 派发编辑动作
//!    └── transition 纯函数计算下一状态，会话采纳
//!    └── Event: StateChanged
//!
//! 3. 提交
//!    └── 标题非空：会话关闭，返回最终课程
//!    │   └── Event: Committed
//!    └── 标题为空：提交被抑制，会话保持打开
//!
//! 4. 取消（任意时刻）
//!    └── 会话关闭，状态丢弃
//!    └── Event: Cancelled
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::course::{init_state, transition, Course, CourseAction, CourseError};

mod config;

pub use config::{ConfigError, ConfigManager, ConfigResult, EditorConfig, DEFAULT_LISTENER_CAPACITY};

/// 编辑会话事件
///
/// 通过监听器通道发送给订阅方的事件
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum EditorEvent {
    /// 状态已变更（每次成功应用动作后）
    StateChanged { course: Course },
    /// 提交闸门通过，课程已定稿
    Committed { course: Course },
    /// 会话已取消
    Cancelled,
}

/// 状态变更摘要
///
/// 当前课程状态的轻量快照，适合展示层轮询使用
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseChangeEvent {
    /// 课程标识符
    pub course_id: String,
    /// 课程标题
    pub course_title: String,
    /// 分类展示名
    pub category: String,
    /// 课时数量
    pub lesson_count: usize,
    /// 提交闸门条件是否满足（标题非空）
    pub can_commit: bool,
}

impl From<&Course> for CourseChangeEvent {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.course_id.to_string(),
            course_title: course.course_title.clone(),
            category: course.category.label().to_string(),
            lesson_count: course.lesson_count,
            can_commit: course.has_title(),
        }
    }
}

/// 课程编辑会话
///
/// 持有当前课程状态并管理编辑生命周期。状态读取无锁，
/// 动作派发由单一持有方进行。
pub struct CourseEditor {
    /// 当前课程状态（使用 ArcSwap 实现无锁读取）
    state: ArcSwap<Course>,

    /// 事件监听器列表
    listeners: Arc<tokio::sync::Mutex<Vec<mpsc::Sender<EditorEvent>>>>,

    /// 会话是否已关闭（提交或取消后置位）
    closed: AtomicBool,

    /// 监听器通道容量
    listener_capacity: usize,
}

impl CourseEditor {
    /// 打开新建课程的编辑会话
    ///
    /// # Examples
    ///
    /// ```
    /// use courseflow_lib::editor::CourseEditor;
    ///
    /// let editor = CourseEditor::new();
    /// assert_eq!(editor.current().course_title, "");
    /// ```
    pub fn new() -> Self {
        Self::open(init_state(None), EditorConfig::default().listener_capacity)
    }

    /// 使用配置打开新建课程的编辑会话
    ///
    /// 新课程的分类取配置中的默认分类
    pub fn with_config(config: &EditorConfig) -> Self {
        let course = Course {
            category: config.default_category,
            ..Course::new()
        };
        Self::open(course, config.listener_capacity)
    }

    /// 打开已有课程的编辑会话
    ///
    /// 传入的课程原样接管，标识符与全部字段保持不变
    pub fn resume(course: Course) -> Self {
        Self::open(
            init_state(Some(course)),
            EditorConfig::default().listener_capacity,
        )
    }

    /// 使用配置打开已有课程的编辑会话
    pub fn resume_with_config(course: Course, config: &EditorConfig) -> Self {
        Self::open(init_state(Some(course)), config.listener_capacity)
    }

    fn open(course: Course, listener_capacity: usize) -> Self {
        tracing::info!(course_id = %course.course_id, "Course editing session opened");

        Self {
            state: ArcSwap::new(Arc::new(course)),
            listeners: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            closed: AtomicBool::new(false),
            listener_capacity,
        }
    }

    /// 获取当前课程状态
    ///
    /// 此方法是无锁的，可以在任何线程安全地调用
    pub fn current(&self) -> Arc<Course> {
        self.state.load_full()
    }

    /// 获取当前状态摘要
    pub fn snapshot(&self) -> CourseChangeEvent {
        CourseChangeEvent::from(&*self.current())
    }

    /// 提交闸门条件是否满足
    ///
    /// 会话已关闭时恒为 `false`
    pub fn can_commit(&self) -> bool {
        !self.is_closed() && self.current().has_title()
    }

    /// 会话是否已关闭
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// 派发编辑动作
    ///
    /// 用当前状态和动作计算下一状态，采纳后通知所有监听者。
    /// 返回采纳后的新状态。
    ///
    /// # Errors
    ///
    /// 会话已关闭时返回 [`EditorError::Closed`]，状态不变
    pub fn dispatch(&self, action: CourseAction) -> EditorResult<Arc<Course>> {
        if self.is_closed() {
            return Err(EditorError::Closed);
        }

        let kind = action.kind();
        let current = self.state.load_full();
        let next = Arc::new(transition(&current, action));
        self.state.store(Arc::clone(&next));

        tracing::debug!(
            action = kind,
            course_id = %next.course_id,
            lesson_count = next.lesson_count,
            "Editing action applied"
        );

        self.notify_listeners(EditorEvent::StateChanged {
            course: (*next).clone(),
        });

        Ok(next)
    }

    /// 派发未类型化的线上动作值
    ///
    /// 先校验 `type` 标签是否为识别的动作种类，再反序列化为
    /// [`CourseAction`] 后派发。
    ///
    /// # Errors
    ///
    /// - [`EditorError::Closed`] - 会话已关闭
    /// - [`EditorError::Course`] - 动作种类无法识别
    /// - [`EditorError::MalformedAction`] - 种类已识别但载荷不合法
    ///
    /// 任何错误都不改变当前状态
    pub fn dispatch_value(&self, value: Value) -> EditorResult<Arc<Course>> {
        if self.is_closed() {
            return Err(EditorError::Closed);
        }

        CourseAction::recognize(&value)?;
        let action: CourseAction = serde_json::from_value(value)?;

        self.dispatch(action)
    }

    /// 提交课程
    ///
    /// 标题非空时关闭会话并返回最终课程；标题为空时提交被抑制，
    /// 返回 `None`，会话保持打开。已关闭的会话也返回 `None`。
    pub fn commit(&self) -> Option<Arc<Course>> {
        if self.is_closed() {
            return None;
        }

        let course = self.current();
        if !course.has_title() {
            tracing::debug!(course_id = %course.course_id, "Commit suppressed: course title is empty");
            return None;
        }

        // 并发提交时只有第一个调用方拿到课程
        if self.closed.swap(true, Ordering::SeqCst) {
            return None;
        }

        tracing::info!(
            course_id = %course.course_id,
            lesson_count = course.lesson_count,
            "Course committed"
        );

        self.notify_listeners(EditorEvent::Committed {
            course: (*course).clone(),
        });

        Some(course)
    }

    /// 取消编辑
    ///
    /// 关闭会话并丢弃未提交的状态。重复取消无效果。
    pub fn cancel(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        let course = self.current();
        tracing::info!(course_id = %course.course_id, "Course editing cancelled");

        self.notify_listeners(EditorEvent::Cancelled);
    }

    /// 添加事件监听器
    ///
    /// 返回的接收器将接收此后发生的所有会话事件
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use courseflow_lib::editor::CourseEditor;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let editor = CourseEditor::new();
    /// let mut rx = editor.subscribe().await;
    ///
    /// tokio::spawn(async move {
    ///     while let Some(event) = rx.recv().await {
    ///         println!("Editor event: {:?}", event);
    ///     }
    /// });
    /// # }
    /// ```
    pub async fn subscribe(&self) -> mpsc::Receiver<EditorEvent> {
        let (tx, rx) = mpsc::channel(self.listener_capacity);
        let mut listeners = self.listeners.lock().await;
        listeners.push(tx);
        rx
    }

    /// 移除所有已关闭的监听器
    pub async fn cleanup_listeners(&self) {
        let mut listeners = self.listeners.lock().await;
        listeners.retain(|tx| !tx.is_closed());
    }

    /// 获取当前监听器数量
    pub async fn listener_count(&self) -> usize {
        self.listeners.lock().await.len()
    }

    /// 通知所有监听者
    ///
    /// 如果有 tokio 运行时，异步通知；否则静默跳过
    fn notify_listeners(&self, event: EditorEvent) {
        let listeners = Arc::clone(&self.listeners);

        if tokio::runtime::Handle::try_current().is_ok() {
            tokio::spawn(async move {
                let listeners_guard = listeners.lock().await;
                for listener in listeners_guard.iter() {
                    // 使用 try_send 避免阻塞
                    let _ = listener.try_send(event.clone());
                }
            });
        }
    }
}

impl Default for CourseEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// 编辑会话错误
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// 状态机错误
    #[error("Course action error: {0}")]
    Course(#[from] CourseError),

    /// 动作种类已识别但载荷不合法
    #[error("Malformed action payload: {0}")]
    MalformedAction(#[from] serde_json::Error),

    /// 会话已关闭（已提交或已取消）
    #[error("Editing session is closed")]
    Closed,
}

/// 编辑会话的结果类型
pub type EditorResult<T> = Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Category, CourseId, LessonDraft, LessonId};
    use serde_json::json;

    #[test]
    fn test_editor_starts_blank() {
        let editor = CourseEditor::new();
        let course = editor.current();

        assert_eq!(course.course_title, "");
        assert_eq!(course.category, Category::UiUx);
        assert_eq!(course.lesson_count, 0);
        assert!(!editor.is_closed());
        assert!(!editor.can_commit());
    }

    #[test]
    fn test_editor_resume_preserves_course() {
        let existing = Course {
            course_id: CourseId::from_string("c1"),
            course_title: "Existing".to_string(),
            category: Category::Php,
            lesson_count: 0,
            lessons: Vec::new(),
        };

        let editor = CourseEditor::resume(existing.clone());
        assert_eq!(*editor.current(), existing);
        assert!(editor.can_commit());
    }

    #[test]
    fn test_editor_with_config_category() {
        let config = EditorConfig {
            default_category: Category::Database,
            ..Default::default()
        };

        let editor = CourseEditor::with_config(&config);
        assert_eq!(editor.current().category, Category::Database);
    }

    #[test]
    fn test_dispatch_updates_current() {
        let editor = CourseEditor::new();

        let next = editor.dispatch(CourseAction::set_title("Rust Basics")).unwrap();
        assert_eq!(next.course_title, "Rust Basics");
        assert_eq!(editor.current().course_title, "Rust Basics");
    }

    #[test]
    fn test_commit_requires_title() {
        let editor = CourseEditor::new();

        // 标题为空，提交被抑制
        assert!(editor.commit().is_none());
        assert!(!editor.is_closed());

        // 设置标题后可以提交
        editor.dispatch(CourseAction::set_title("Rust Basics")).unwrap();
        let committed = editor.commit().expect("commit should pass the gate");
        assert_eq!(committed.course_title, "Rust Basics");
    }

    #[test]
    fn test_commit_closes_session() {
        let editor = CourseEditor::new();
        editor.dispatch(CourseAction::set_title("T")).unwrap();

        assert!(editor.commit().is_some());
        assert!(editor.is_closed());

        // 重复提交返回 None
        assert!(editor.commit().is_none());
    }

    #[test]
    fn test_cancel_closes_session() {
        let editor = CourseEditor::new();
        editor.cancel();

        assert!(editor.is_closed());
        assert!(!editor.can_commit());
        assert!(editor.commit().is_none());
    }

    #[test]
    fn test_dispatch_after_close_fails() {
        let editor = CourseEditor::new();
        editor.cancel();

        let result = editor.dispatch(CourseAction::set_title("late"));
        assert!(matches!(result, Err(EditorError::Closed)));
        assert_eq!(editor.current().course_title, "");
    }

    #[test]
    fn test_dispatch_value_applies_action() {
        let editor = CourseEditor::new();

        let next = editor
            .dispatch_value(json!({ "type": "SET_TITLE", "title": "Rust Basics" }))
            .unwrap();
        assert_eq!(next.course_title, "Rust Basics");

        editor
            .dispatch_value(json!({
                "type": "ADD_LESSON",
                "lesson": { "lessonId": "l1", "lessonTitle": "Intro", "lessonType": "video" }
            }))
            .unwrap();
        assert_eq!(editor.current().lesson_count, 1);
    }

    #[test]
    fn test_dispatch_value_unknown_kind() {
        let editor = CourseEditor::new();
        editor.dispatch(CourseAction::set_title("Keep me")).unwrap();

        let result = editor.dispatch_value(json!({ "type": "SET_PRICE", "price": 99 }));
        assert!(matches!(
            result,
            Err(EditorError::Course(CourseError::UnrecognizedAction { .. }))
        ));

        // 错误不改变状态
        assert_eq!(editor.current().course_title, "Keep me");
    }

    #[test]
    fn test_dispatch_value_malformed_payload() {
        let editor = CourseEditor::new();

        // 种类已识别，但载荷缺少必需字段
        let result = editor.dispatch_value(json!({ "type": "DELETE_LESSON" }));
        assert!(matches!(result, Err(EditorError::MalformedAction(_))));
        assert_eq!(editor.current().lesson_count, 0);
    }

    #[test]
    fn test_snapshot_fields() {
        let editor = CourseEditor::new();
        editor.dispatch(CourseAction::set_title("Rust Basics")).unwrap();
        editor.dispatch(CourseAction::set_category(Category::NodeJs)).unwrap();
        editor
            .dispatch(CourseAction::add_lesson(LessonDraft::new(
                LessonId::new("l1"),
                "Intro",
                "video",
            )))
            .unwrap();

        let snapshot = editor.snapshot();
        assert_eq!(snapshot.course_title, "Rust Basics");
        assert_eq!(snapshot.category, "Node.js");
        assert_eq!(snapshot.lesson_count, 1);
        assert!(snapshot.can_commit);
    }

    #[test]
    fn test_change_event_serialization() {
        let editor = CourseEditor::new();
        editor.dispatch(CourseAction::set_title("Rust Basics")).unwrap();

        let json = serde_json::to_string(&editor.snapshot()).unwrap();
        assert!(json.contains("courseId"));
        assert!(json.contains("courseTitle"));
        assert!(json.contains("lessonCount"));
        assert!(json.contains("canCommit"));
    }

    #[test]
    fn test_editor_event_serialization() {
        let event = EditorEvent::StateChanged {
            course: Course::new(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "StateChanged");
        assert!(json["payload"]["course"].is_object());

        let event = EditorEvent::Cancelled;
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Cancelled");
    }
}
