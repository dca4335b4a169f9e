//! 课程目录：视图推导、选中明细、展示器

pub mod presenter;
pub mod selection;
pub mod view;

pub use presenter::{CatalogAction, CatalogSource, CatalogState, CatalogView, DeleteOutcome, EmptyState, Presenter};
pub use selection::{DetailTicket, Selection};
pub use view::{CourseSortField, LessonSortField, Listable, Pagination, SortOrder, ViewQuery};
