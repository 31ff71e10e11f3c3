/// Course state machine core
pub mod course;

/// Course editing session
pub mod editor;

/// Utility modules
pub mod utils;
