//! 列表视图推导
//!
//! 过滤 -> 排序 -> 分页，全部是关于 (集合, 搜索词, 排序字段, 排序方向) 的纯函数，
//! 每次都从头重新计算。

use coursedesk_shared::{Course, Lesson, Timestamp};
use std::cmp::Ordering;

/// 可被搜索和排序的列表项
pub trait Listable: Clone {
    type SortField: Copy + Eq;

    fn id(&self) -> i64;

    /// 参与搜索的文本字段 (标识符会自动参与)
    fn search_fields(&self) -> Vec<&str>;

    fn compare_by(&self, other: &Self, field: Self::SortField) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Ascending),
            "desc" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "A-Z",
            SortOrder::Descending => "Z-A",
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// 列表查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery<F> {
    pub search: String,
    pub sort_field: F,
    pub sort_order: SortOrder,
}

impl<F: Copy + Eq> ViewQuery<F> {
    pub fn new(sort_field: F) -> Self {
        Self {
            search: String::new(),
            sort_field,
            sort_order: SortOrder::Ascending,
        }
    }

    /// 排序下拉框的选中状态
    pub fn is_sorted_by(&self, field: F) -> bool {
        self.sort_field == field
    }

    pub fn is_ordered(&self, order: SortOrder) -> bool {
        self.sort_order == order
    }
}

// =========================================================
// 推导函数
// =========================================================

/// 大小写不敏感的包含匹配，空搜索词匹配全部
pub fn matches<T: Listable>(item: &T, search: &str) -> bool {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    item.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
        || item.id().to_string().contains(&needle)
}

pub fn filter<T: Listable>(items: &[T], search: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches(*item, search))
        .cloned()
        .collect()
}

/// 稳定排序，相等的键保持原有相对顺序
pub fn sort<T: Listable>(items: &mut [T], field: T::SortField, order: SortOrder) {
    items.sort_by(|a, b| order.apply(a.compare_by(b, field)));
}

pub fn derive<T: Listable>(items: &[T], query: &ViewQuery<T::SortField>) -> Vec<T> {
    let mut filtered = filter(items, &query.search);
    sort(&mut filtered, query.sort_field, query.sort_order);
    filtered
}

// =========================================================
// 分页
// =========================================================

/// 逐步展开的分页
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    visible: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            visible: page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 实际展示的数量，不超过过滤后的总数
    pub fn shown(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible
    }

    pub fn reveal_more(&mut self, total: usize) {
        if self.has_more(total) {
            self.visible += self.page_size;
        }
    }

    pub fn reset(&mut self) {
        self.visible = self.page_size;
    }
}

// =========================================================
// 课程 / 课时
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseSortField {
    #[default]
    Id,
    Title,
    Description,
    CreatedAt,
}

impl CourseSortField {
    pub const ALL: [CourseSortField; 4] = [
        CourseSortField::Id,
        CourseSortField::Title,
        CourseSortField::Description,
        CourseSortField::CreatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseSortField::Id => "courseId",
            CourseSortField::Title => "title",
            CourseSortField::Description => "description",
            CourseSortField::CreatedAt => "createdAt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourseSortField::Id => "ID",
            CourseSortField::Title => "Title",
            CourseSortField::Description => "Description",
            CourseSortField::CreatedAt => "Created Date",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl Listable for Course {
    type SortField = CourseSortField;

    fn id(&self) -> i64 {
        self.course_id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn compare_by(&self, other: &Self, field: CourseSortField) -> Ordering {
        match field {
            CourseSortField::Id => self.course_id.cmp(&other.course_id),
            CourseSortField::Title => self.title.cmp(&other.title),
            CourseSortField::Description => text(&self.description).cmp(text(&other.description)),
            CourseSortField::CreatedAt => Timestamp::parse_or_epoch(self.created_at.as_deref())
                .cmp(&Timestamp::parse_or_epoch(other.created_at.as_deref())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LessonSortField {
    #[default]
    Id,
    Title,
    Topic,
    CreatedAt,
}

impl LessonSortField {
    pub const ALL: [LessonSortField; 4] = [
        LessonSortField::Id,
        LessonSortField::Title,
        LessonSortField::Topic,
        LessonSortField::CreatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LessonSortField::Id => "lessonId",
            LessonSortField::Title => "title",
            LessonSortField::Topic => "topic",
            LessonSortField::CreatedAt => "createdAt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LessonSortField::Id => "ID",
            LessonSortField::Title => "Title",
            LessonSortField::Topic => "Topic",
            LessonSortField::CreatedAt => "Created Date",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl Listable for Lesson {
    type SortField = LessonSortField;

    fn id(&self) -> i64 {
        self.lesson_id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.topic.as_deref());
        fields.extend(self.content.as_deref());
        fields
    }

    fn compare_by(&self, other: &Self, field: LessonSortField) -> Ordering {
        match field {
            LessonSortField::Id => self.lesson_id.cmp(&other.lesson_id),
            LessonSortField::Title => self.title.cmp(&other.title),
            LessonSortField::Topic => text(&self.topic).cmp(text(&other.topic)),
            LessonSortField::CreatedAt => Timestamp::parse_or_epoch(self.created_at.as_deref())
                .cmp(&Timestamp::parse_or_epoch(other.created_at.as_deref())),
        }
    }
}

/// 缺失的文本按空串比较
fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
