//! 编辑会话测试
//!
//! 测试编辑会话的动作派发、事件通知与提交闸门
//!
//! 运行: cargo run --example test_editor

use std::time::Duration;

use courseflow_lib::course::{Category, CourseAction, LessonDraft, LessonId};
use courseflow_lib::editor::{CourseEditor, EditorEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== 编辑会话测试 ===\n");

    // 1. 打开会话并订阅事件
    println!("1. 打开会话并订阅事件");
    println!("{}", "-".repeat(40));

    let editor = CourseEditor::new();
    let mut rx = editor.subscribe().await;
    println!("  课程: {}", editor.current().course_id);
    println!("  监听器数量: {}", editor.listener_count().await);
    println!();

    // 2. 派发编辑动作
    println!("2. 派发编辑动作");
    println!("{}", "-".repeat(40));

    editor.dispatch(CourseAction::set_title("Rust 实战"))?;
    editor.dispatch(CourseAction::set_category(Category::NodeJs))?;
    editor.dispatch(CourseAction::add_lesson(LessonDraft::new(
        LessonId::new("l1"),
        "环境搭建",
        "video",
    )))?;

    let snapshot = editor.snapshot();
    println!("  标题: {:?}", snapshot.course_title);
    println!("  分类: {}", snapshot.category);
    println!("  课时数: {}", snapshot.lesson_count);
    println!();

    // 3. 派发线上动作值
    println!("3. 派发线上动作值");
    println!("{}", "-".repeat(40));

    let next = editor.dispatch_value(serde_json::json!({
        "type": "ADD_LESSON",
        "lesson": { "lessonId": "l2", "lessonTitle": "所有权", "lessonType": "video" }
    }))?;
    println!("  ADD_LESSON -> 课时数: {}", next.lesson_count);

    match editor.dispatch_value(serde_json::json!({ "type": "SET_PRICE", "price": 99 })) {
        Ok(_) => println!("  ?? SET_PRICE 意外成功"),
        Err(e) => println!("  OK SET_PRICE 正确拒绝: {}", e),
    }
    println!();

    // 4. 接收会话事件
    println!("4. 接收会话事件");
    println!("{}", "-".repeat(40));

    while let Ok(Some(event)) = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await {
        match event {
            EditorEvent::StateChanged { course } => {
                println!("  [StateChanged] 课时数: {}", course.lesson_count);
            }
            EditorEvent::Committed { course } => {
                println!("  [Committed] {:?}", course.course_title);
            }
            EditorEvent::Cancelled => {
                println!("  [Cancelled]");
            }
        }
    }
    println!();

    // 5. 提交闸门
    println!("5. 提交闸门");
    println!("{}", "-".repeat(40));

    let blank_editor = CourseEditor::new();
    match blank_editor.commit() {
        Some(_) => println!("  ?? 空标题课程意外通过提交"),
        None => println!("  OK 空标题课程提交被抑制"),
    }

    println!("  可提交: {}", editor.can_commit());
    match editor.commit() {
        Some(course) => println!("  OK 提交成功: {:?} ({} 课时)", course.course_title, course.lesson_count),
        None => println!("  ?? 提交意外失败"),
    }
    println!();

    // 6. 会话关闭
    println!("6. 会话关闭");
    println!("{}", "-".repeat(40));

    println!("  会话已关闭: {}", editor.is_closed());
    match editor.dispatch(CourseAction::set_title("太迟了")) {
        Ok(_) => println!("  ?? 关闭后派发意外成功"),
        Err(e) => println!("  OK 关闭后派发被拒绝: {}", e),
    }

    blank_editor.cancel();
    println!("  空白会话已取消: {}", blank_editor.is_closed());

    println!("\n测试完成!");
    Ok(())
}
