pub mod aggregate;
pub mod codec;
pub mod collection;
pub mod ids;

pub use aggregate::{filter_by_course, group_by_course, summarize, CourseGroup, MenuSummary};
pub use collection::MenuCollection;
pub use ids::{IdGenerator, IdStrategy, SequentialIds, UuidIds};
