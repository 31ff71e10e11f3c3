//! 状态转换
//!
//! 课程编辑状态机的核心：`init_state` 与 `transition` 两个纯函数。
//! 转换不修改输入状态，不读取入参之外的任何内容；下一个状态
//! 完全由当前状态和动作决定。
//!
//! # 转换规则
//!
//! - `SET_TITLE` - 替换标题，其余字段不变
//! - `SET_CATEGORY` - 替换分类，其余字段不变
//! - `ADD_LESSON` - 课时草稿追加到列表末尾，计数器随列表同步
//! - `DELETE_LESSON` - 按标识符移除课时；标识符不存在时状态不变，
//!   计数器始终与列表长度保持一致

use super::action::CourseAction;
use super::model::Course;

/// 初始化编辑状态
///
/// - `None`：新建模式，返回带新标识符的空白课程
/// - `Some(course)`：编辑模式，原样返回传入的课程
pub fn init_state(course: Option<Course>) -> Course {
    course.unwrap_or_else(Course::new)
}

/// 应用单个编辑动作，返回下一个状态
///
/// 对全部动作种类有定义，任何输入都产生一个合法的下一状态。
/// `course_id` 在所有转换中保持不变。
pub fn transition(state: &Course, action: CourseAction) -> Course {
    match action {
        CourseAction::SetTitle { title } => Course {
            course_title: title,
            ..state.clone()
        },
        CourseAction::SetCategory { category } => Course {
            category,
            ..state.clone()
        },
        CourseAction::AddLesson { lesson } => {
            let mut next = state.clone();
            next.lessons.push(lesson.into_lesson());
            next.lesson_count = next.lessons.len();
            next
        }
        CourseAction::DeleteLesson { lesson_id } => {
            let mut next = state.clone();
            // 标识符不存在时 retain 不移除任何课时，计数器保持原值
            next.lessons.retain(|l| l.lesson_id != lesson_id);
            next.lesson_count = next.lessons.len();
            next
        }
    }
}
