//! 列表 / 详情展示器
//!
//! `CatalogState` 是显式的状态快照，所有变化都经过 `reduce`；
//! `Presenter` 负责异步部分 (加载集合、加载明细、删除后重新加载)，
//! 并在每次状态变化后通知监听者。

use super::selection::{DetailTicket, Selection};
use super::view::{self, CourseSortField, Pagination, SortOrder, ViewQuery};
use crate::api::CourseApi;
use crate::error::ClientResult;
use crate::request::HttpClient;
use async_trait::async_trait;
use coursedesk_shared::{Course, Lesson};
use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use std::cell::RefCell;
use std::rc::Rc;

// =========================================================
// 数据源 (Remote Resource Seam)
// =========================================================

#[async_trait(?Send)]
pub trait CatalogSource {
    async fn fetch_courses(&self) -> ClientResult<Vec<Course>>;
    async fn fetch_lessons(&self, course_id: i64) -> ClientResult<Vec<Lesson>>;
    async fn delete_course(&self, course_id: i64) -> ClientResult<()>;
}

#[async_trait(?Send)]
impl<C: HttpClient> CatalogSource for CourseApi<C> {
    async fn fetch_courses(&self) -> ClientResult<Vec<Course>> {
        self.list_courses().await
    }

    async fn fetch_lessons(&self, course_id: i64) -> ClientResult<Vec<Lesson>> {
        self.course_lessons(course_id).await
    }

    async fn delete_course(&self, course_id: i64) -> ClientResult<()> {
        CourseApi::delete_course(self, course_id).await
    }
}

// =========================================================
// 状态快照与 Reducer
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// 集合加载成功 (整体替换)
    CollectionLoaded(Vec<Course>),
    /// 用户输入搜索词
    SearchChanged(String),
    /// URL 参数带来的初始搜索词，只在用户尚未输入时生效
    SearchSeeded(String),
    SortFieldChanged(CourseSortField),
    SortOrderChanged(SortOrder),
    RevealMore,
    Deselect,
}

/// 空列表的两种情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// 集合本身为空
    NoData,
    /// 有数据但没有匹配项
    NoMatches,
}

impl EmptyState {
    pub fn title(&self) -> &'static str {
        match self {
            EmptyState::NoData => "No courses available",
            EmptyState::NoMatches => "No courses match your search",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            EmptyState::NoData => "Start by adding your first course!",
            EmptyState::NoMatches => "Try adjusting your search terms.",
        }
    }
}

/// 推导出的可见列表
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub items: Vec<Course>,
    pub total_matches: usize,
    pub has_more: bool,
    pub empty: Option<EmptyState>,
    /// 集合为空时搜索和排序控件没有意义
    pub show_controls: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    courses: Vec<Course>,
    query: ViewQuery<CourseSortField>,
    pagination: Pagination,
    selection: Selection<Course, Lesson>,
    search_touched: bool,
    /// 最近一次发起的集合加载序号
    load_generation: u64,
}

impl CatalogState {
    pub fn new(page_size: usize) -> Self {
        Self {
            courses: Vec::new(),
            query: ViewQuery::new(CourseSortField::Id),
            pagination: Pagination::new(page_size),
            selection: Selection::default(),
            search_touched: false,
            load_generation: 0,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn query(&self) -> &ViewQuery<CourseSortField> {
        &self.query
    }

    pub fn selected(&self) -> Option<&Course> {
        self.selection.item()
    }

    pub fn lessons(&self) -> &[Lesson] {
        self.selection.details()
    }

    pub fn lessons_loading(&self) -> bool {
        self.selection.is_loading()
    }

    /// 当前搜索词对应的 URL 参数值，空搜索词时移除参数
    pub fn search_param(&self) -> Option<&str> {
        Some(self.query.search.as_str()).filter(|s| !s.is_empty())
    }

    pub fn reduce(&mut self, action: CatalogAction) {
        match action {
            CatalogAction::CollectionLoaded(courses) => {
                self.courses = courses;
                self.sync_selection();
            }
            CatalogAction::SearchChanged(search) => {
                self.search_touched = true;
                self.query.search = search;
                self.pagination.reset();
            }
            CatalogAction::SearchSeeded(search) => {
                if !self.search_touched && self.query.search.is_empty() && !search.is_empty() {
                    self.query.search = search;
                    self.pagination.reset();
                }
            }
            CatalogAction::SortFieldChanged(field) => self.query.sort_field = field,
            CatalogAction::SortOrderChanged(order) => self.query.sort_order = order,
            CatalogAction::RevealMore => {
                let total = self.filtered().len();
                self.pagination.reveal_more(total);
            }
            CatalogAction::Deselect => self.selection.clear(),
        }
    }

    /// 在当前集合中查找并选中，需要加载明细时返回凭据
    ///
    /// 标识符不在集合中时清空选中项，不发请求。
    pub fn select(&mut self, course_id: i64) -> Option<DetailTicket> {
        match self.courses.iter().find(|c| c.course_id == course_id) {
            Some(course) => Some(self.selection.select(course.clone(), course_id)),
            None => {
                self.selection.clear();
                None
            }
        }
    }

    /// 发起一次集合加载，返回其序号
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    /// 只接受最近一次发起的加载结果，较早的请求晚到时丢弃
    pub fn apply_collection(&mut self, generation: u64, courses: Vec<Course>) -> bool {
        if generation != self.load_generation {
            return false;
        }
        self.reduce(CatalogAction::CollectionLoaded(courses));
        true
    }

    pub fn apply_lessons(&mut self, ticket: DetailTicket, lessons: Vec<Lesson>) -> bool {
        self.selection.apply(ticket, lessons)
    }

    /// 过滤并排序后的完整列表
    pub fn filtered(&self) -> Vec<Course> {
        view::derive(&self.courses, &self.query)
    }

    pub fn view(&self) -> CatalogView {
        let filtered = self.filtered();
        let total = filtered.len();
        let shown = self.pagination.shown(total);

        let empty = match (self.courses.is_empty(), total) {
            (true, _) => Some(EmptyState::NoData),
            (false, 0) => Some(EmptyState::NoMatches),
            _ => None,
        };

        CatalogView {
            items: filtered.into_iter().take(shown).collect(),
            total_matches: total,
            has_more: self.pagination.has_more(total),
            empty,
            show_controls: !self.courses.is_empty(),
        }
    }

    /// 集合替换后，选中项跟随新数据；已被删除则清空
    fn sync_selection(&mut self) {
        let Some(selected_id) = self.selection.item().map(|c| c.course_id) else {
            return;
        };
        match self.courses.iter().find(|c| c.course_id == selected_id) {
            Some(fresh) => self.selection.refresh_item(fresh.clone()),
            None => self.selection.clear(),
        }
    }
}

// =========================================================
// 异步驱动
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// 用户取消确认，没有发出请求
    Declined,
    /// 删除成功并已重新加载集合
    Deleted,
    Failed,
}

type Listener = Rc<dyn Fn(&CatalogState)>;

/// 列表 / 详情展示器
///
/// 状态放在 `Rc<RefCell<_>>` 中，借用不会跨越 await。
/// 监听者只读取快照，不能在回调里再调用 `dispatch`。
pub struct Presenter<S> {
    source: Rc<S>,
    state: Rc<RefCell<CatalogState>>,
    listener: Option<Listener>,
}

impl<S> Clone for Presenter<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            state: self.state.clone(),
            listener: self.listener.clone(),
        }
    }
}

impl<S: CatalogSource + 'static> Presenter<S> {
    pub fn new(source: S, page_size: usize) -> Self {
        Self {
            source: Rc::new(source),
            state: Rc::new(RefCell::new(CatalogState::new(page_size))),
            listener: None,
        }
    }

    /// 注册状态变化监听者 (UI 层用来刷新信号)
    pub fn with_listener(mut self, listener: impl Fn(&CatalogState) + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            let state = self.state.borrow();
            listener(&state);
        }
    }

    pub fn dispatch(&self, action: CatalogAction) {
        self.state.borrow_mut().reduce(action);
        self.notify();
    }

    /// 拉取完整集合；失败时记录日志并保留原集合
    ///
    /// 重叠的加载只采用最后发起的那一次。
    pub fn load(&self) -> LocalBoxFuture<'static, ()> {
        let generation = self.state.borrow_mut().begin_load();
        let this = self.clone();
        async move {
            match this.source.fetch_courses().await {
                Ok(courses) => {
                    let applied = this.state.borrow_mut().apply_collection(generation, courses);
                    if applied {
                        this.notify();
                    } else {
                        log_info!("[Catalog] Discarded stale course list from load #{}", generation);
                    }
                }
                Err(e) => log_error!("[Catalog] Failed to load courses: {}", e),
            }
        }
        .boxed_local()
    }

    /// 选中课程并加载其课时
    ///
    /// 选中本身同步完成；返回的 future 只负责明细请求，
    /// 结果在凭据过期时被丢弃。
    pub fn select(&self, course_id: i64) -> LocalBoxFuture<'static, ()> {
        let ticket = self.state.borrow_mut().select(course_id);
        self.notify();

        let Some(ticket) = ticket else {
            return future::ready(()).boxed_local();
        };

        let this = self.clone();
        async move {
            let lessons = match this.source.fetch_lessons(ticket.item_id()).await {
                Ok(lessons) => lessons,
                Err(e) => {
                    log_error!("[Catalog] Failed to fetch lessons for {}: {}", ticket.item_id(), e);
                    Vec::new()
                }
            };

            let applied = this.state.borrow_mut().apply_lessons(ticket, lessons);
            if applied {
                this.notify();
            } else {
                log_info!("[Catalog] Discarded stale lessons for {}", ticket.item_id());
            }
        }
        .boxed_local()
    }

    pub fn deselect(&self) {
        self.dispatch(CatalogAction::Deselect);
    }

    /// 删除课程
    ///
    /// `confirm` 返回 `false` 时直接放弃；删除成功后整体重新加载集合。
    pub fn delete(
        &self,
        course_id: i64,
        confirm: impl FnOnce() -> bool,
    ) -> LocalBoxFuture<'static, DeleteOutcome> {
        if !confirm() {
            return future::ready(DeleteOutcome::Declined).boxed_local();
        }

        let this = self.clone();
        async move {
            match this.source.delete_course(course_id).await {
                Ok(()) => {
                    this.load().await;
                    DeleteOutcome::Deleted
                }
                Err(e) => {
                    log_error!("[Catalog] Failed to delete course {}: {}", course_id, e);
                    DeleteOutcome::Failed
                }
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests;
