//! 课程状态机测试
//!
//! 测试纯状态机的初始化与各类编辑动作
//!
//! 运行: cargo run --example test_course

use courseflow_lib::course::{
    init_state, transition, Category, Course, CourseAction, CourseId, LessonDraft, LessonId,
};

fn main() {
    println!("=== 课程状态机测试 ===\n");

    // 1. 初始化状态
    println!("1. 初始化状态");
    println!("{}", "-".repeat(40));

    let fresh = init_state(None);
    println!("  新建课程: id={}", fresh.course_id);
    println!("  标题: {:?}", fresh.course_title);
    println!("  分类: {}", fresh.category);
    println!("  课时数: {}", fresh.lesson_count);

    let existing = Course {
        course_id: CourseId::from_string("course-demo"),
        course_title: "已有课程".to_string(),
        category: Category::JavaScript,
        lesson_count: 0,
        lessons: Vec::new(),
    };
    let resumed = init_state(Some(existing));
    println!("  编辑已有课程: id={} 标题={:?}", resumed.course_id, resumed.course_title);
    println!();

    // 2. 基本信息编辑
    println!("2. 基本信息编辑");
    println!("{}", "-".repeat(40));

    let state = transition(&fresh, CourseAction::set_title("Rust 实战"));
    println!("  SET_TITLE -> 标题: {:?}", state.course_title);

    println!("  可用分类:");
    for category in Category::all() {
        println!("    - {}", category);
    }

    let state = transition(&state, CourseAction::set_category(Category::Database));
    println!("  SET_CATEGORY -> 分类: {}", state.category);
    println!();

    // 3. 课时管理
    println!("3. 课时管理");
    println!("{}", "-".repeat(40));

    let drafts = vec![
        LessonDraft::new(LessonId::new("l1"), "环境搭建", "video"),
        LessonDraft::new(LessonId::new("l2"), "所有权", "video"),
        LessonDraft::new(LessonId::new("l3"), "随堂测验", "quiz"),
    ];

    let mut state = state;
    for draft in drafts {
        state = transition(&state, CourseAction::add_lesson(draft));
    }
    println!("  ADD_LESSON x3 -> 课时数: {}", state.lesson_count);
    for lesson in &state.lessons {
        println!("    [{}] {} ({})", lesson.lesson_id, lesson.title, lesson.kind);
    }

    let state = transition(&state, CourseAction::delete_lesson(LessonId::new("l2")));
    println!("  DELETE_LESSON l2 -> 课时数: {}", state.lesson_count);

    let state = transition(&state, CourseAction::delete_lesson(LessonId::new("missing")));
    println!(
        "  DELETE_LESSON missing -> 课时数: {} (未知标识符不改变状态)",
        state.lesson_count
    );
    println!("  计数器一致: {}", state.is_consistent());
    println!();

    // 4. 线上动作表示
    println!("4. 线上动作表示");
    println!("{}", "-".repeat(40));

    let action = CourseAction::add_lesson(LessonDraft::new(LessonId::new("l4"), "闭包", "video"));
    let wire = serde_json::to_string(&action).unwrap();
    println!("  序列化: {}", wire);

    let valid = serde_json::json!({ "type": "SET_TITLE", "title": "x" });
    println!("  识别 SET_TITLE: {:?}", CourseAction::recognize(&valid));

    let unknown = serde_json::json!({ "type": "SET_PRICE", "price": 99 });
    match CourseAction::recognize(&unknown) {
        Ok(kind) => println!("  ?? SET_PRICE 意外通过: {}", kind),
        Err(e) => println!("  OK SET_PRICE 正确拒绝: {}", e),
    }
    println!();

    // 5. 提交条件
    println!("5. 提交条件");
    println!("{}", "-".repeat(40));

    let blank = init_state(None);
    println!("  空标题可提交: {}", blank.has_title());
    let titled = transition(&blank, CourseAction::set_title("Rust 实战"));
    println!("  有标题可提交: {}", titled.has_title());

    println!("\n测试完成!");
}
