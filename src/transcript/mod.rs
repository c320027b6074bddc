//! Meeting-minutes segmentation and task extraction

pub mod extract;
pub mod segment;

pub use extract::MeetingTaskExtractor;
