//! Course editing actions
//!
//! The action vocabulary of the editing state machine. Each action is a
//! self-contained instruction; applying one to a state yields the next
//! state. The wire representation is internally tagged: the `type` field
//! carries the action kind in SCREAMING_SNAKE_CASE and the remaining
//! fields carry the payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{CourseError, CourseResult};
use super::model::{Category, LessonDraft, LessonId};

// ============================================================================
// Action Vocabulary
// ============================================================================

/// Editing actions accepted by the transition function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseAction {
    /// Replace the course title
    SetTitle {
        /// New title text
        title: String,
    },
    /// Replace the course category
    SetCategory {
        /// New category
        category: Category,
    },
    /// Append a lesson to the course
    AddLesson {
        /// Draft of the lesson to append
        lesson: LessonDraft,
    },
    /// Remove a lesson by identifier
    #[serde(rename_all = "camelCase")]
    DeleteLesson {
        /// Identifier of the lesson to remove
        lesson_id: LessonId,
    },
}

impl CourseAction {
    /// Create a title change action
    pub fn set_title(title: impl Into<String>) -> Self {
        CourseAction::SetTitle {
            title: title.into(),
        }
    }

    /// Create a category change action
    pub fn set_category(category: Category) -> Self {
        CourseAction::SetCategory { category }
    }

    /// Create a lesson append action
    pub fn add_lesson(lesson: LessonDraft) -> Self {
        CourseAction::AddLesson { lesson }
    }

    /// Create a lesson removal action
    pub fn delete_lesson(lesson_id: LessonId) -> Self {
        CourseAction::DeleteLesson { lesson_id }
    }

    /// Get the wire kind of this action
    pub fn kind(&self) -> &'static str {
        match self {
            CourseAction::SetTitle { .. } => "SET_TITLE",
            CourseAction::SetCategory { .. } => "SET_CATEGORY",
            CourseAction::AddLesson { .. } => "ADD_LESSON",
            CourseAction::DeleteLesson { .. } => "DELETE_LESSON",
        }
    }

    /// Check if this action changes the lesson collection
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CourseAction::AddLesson { .. } | CourseAction::DeleteLesson { .. }
        )
    }
}

// ============================================================================
// Wire Recognition
// ============================================================================

/// Action kinds the state machine recognizes, in wire spelling
pub const RECOGNIZED_KINDS: [&str; 4] = [
    "SET_TITLE",
    "SET_CATEGORY",
    "ADD_LESSON",
    "DELETE_LESSON",
];

impl CourseAction {
    /// Check the kind tag of an untyped action value
    ///
    /// Returns the recognized kind, or [`CourseError::UnrecognizedAction`]
    /// when the `type` tag is missing or names an unknown kind. Callers
    /// must not apply any state change on error.
    pub fn recognize(value: &Value) -> CourseResult<&'static str> {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or("");
        RECOGNIZED_KINDS
            .iter()
            .find(|known| **known == kind)
            .copied()
            .ok_or_else(|| CourseError::UnrecognizedAction {
                kind: kind.to_string(),
            })
    }
}
