pub mod completions;
pub mod display;
pub mod event;
pub mod matching;
pub mod shell;
pub mod volunteer;
