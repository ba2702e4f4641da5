pub mod task;
pub mod timeline;

pub use task::{Interval, TaskRecord, TaskRow, TaskStatus};
pub use timeline::{DateSpan, TimelineViewport};
