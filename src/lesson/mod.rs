//! Lesson module - practicing one target sign until it is mastered
//!
//! Re-exports only. All logic in submodules.

mod target;

pub use target::{LessonProgress, LessonState, TargetMatcher};
