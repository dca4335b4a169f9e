//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 从已有课程预填
//! - 数据到请求对象的转换与校验

use coursedesk_shared::{Course, CourseDraft};
use leptos::prelude::*;

pub const TITLE_REQUIRED: &str = "Title is required.";

/// 可选字段：空白视为未填写
fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 由原始输入构造提交内容，标题为空时拒绝
pub fn build_draft(
    title: &str,
    description: String,
    category: String,
) -> Result<CourseDraft, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TITLE_REQUIRED);
    }
    Ok(CourseDraft {
        title: title.to_string(),
        description: optional(description),
        category: optional(category),
    })
}

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub category: RwSignal<String>,
}

impl FormState {
    /// 创建新的表单状态，所有字段为空
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
        }
    }

    /// 用已有课程预填 (编辑模式)
    pub fn fill(&self, course: &Course) {
        let draft = CourseDraft::from(course);
        self.title.set(draft.title);
        self.description.set(draft.description.unwrap_or_default());
        self.category.set(draft.category.unwrap_or_default());
    }

    /// 将表单状态转换为 API 请求对象
    pub fn to_draft(&self) -> Result<CourseDraft, &'static str> {
        build_draft(
            &self.title.get_untracked(),
            self.description.get_untracked(),
            self.category.get_untracked(),
        )
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
