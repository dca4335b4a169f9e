use super::*;
use crate::error::ClientError;
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

// =========================================================
// Shared Mock Components
// =========================================================

#[derive(Default)]
struct MockSource {
    /// 每次 fetch_courses 依次返回的结果
    course_responses: RefCell<VecDeque<ClientResult<Vec<Course>>>>,
    /// 预置的课时结果
    lessons: RefCell<HashMap<i64, ClientResult<Vec<Lesson>>>>,
    /// 由测试手动放行的集合请求，按发起顺序取用
    pending_courses: RefCell<VecDeque<oneshot::Receiver<Vec<Course>>>>,
    /// 由测试手动放行的课时请求
    pending_lessons: RefCell<HashMap<i64, oneshot::Receiver<Vec<Lesson>>>>,
    /// 调用记录
    log: RefCell<Vec<String>>,
    fail_delete: Cell<bool>,
}

impl MockSource {
    fn with_courses(courses: Vec<Course>) -> Self {
        let source = Self::default();
        source.push_courses(Ok(courses));
        source
    }

    fn push_courses(&self, result: ClientResult<Vec<Course>>) {
        self.course_responses.borrow_mut().push_back(result);
    }

    fn hold_courses(&self) -> oneshot::Sender<Vec<Course>> {
        let (tx, rx) = oneshot::channel();
        self.pending_courses.borrow_mut().push_back(rx);
        tx
    }

    fn hold_lessons(&self, course_id: i64) -> oneshot::Sender<Vec<Lesson>> {
        let (tx, rx) = oneshot::channel();
        self.pending_lessons.borrow_mut().insert(course_id, rx);
        tx
    }

    fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

#[async_trait(?Send)]
impl CatalogSource for MockSource {
    async fn fetch_courses(&self) -> ClientResult<Vec<Course>> {
        self.log.borrow_mut().push("courses".to_string());
        let pending = self.pending_courses.borrow_mut().pop_front();
        if let Some(rx) = pending {
            return Ok(rx.await.unwrap_or_default());
        }
        self.course_responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::transport("offline")))
    }

    async fn fetch_lessons(&self, course_id: i64) -> ClientResult<Vec<Lesson>> {
        self.log.borrow_mut().push(format!("lessons:{}", course_id));
        let pending = self.pending_lessons.borrow_mut().remove(&course_id);
        if let Some(rx) = pending {
            return Ok(rx.await.unwrap_or_default());
        }
        self.lessons
            .borrow_mut()
            .remove(&course_id)
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn delete_course(&self, course_id: i64) -> ClientResult<()> {
        self.log.borrow_mut().push(format!("delete:{}", course_id));
        if self.fail_delete.get() {
            Err(ClientError::status(500, "boom"))
        } else {
            Ok(())
        }
    }
}

fn course(id: i64, title: &str) -> Course {
    Course {
        course_id: id,
        title: title.to_string(),
        description: None,
        category: None,
        created_at: None,
    }
}

fn lesson(id: i64, course_id: i64, title: &str) -> Lesson {
    Lesson {
        lesson_id: id,
        title: title.to_string(),
        topic: None,
        content: None,
        created_at: None,
        course_id: Some(course_id),
        course_title: None,
    }
}

fn two_courses() -> Vec<Course> {
    vec![course(1, "Algebra"), course(2, "Biology")]
}

fn ids(courses: &[Course]) -> Vec<i64> {
    courses.iter().map(|c| c.course_id).collect()
}

async fn loaded(source: MockSource) -> Presenter<MockSource> {
    let presenter = Presenter::new(source, 10);
    presenter.load().await;
    presenter
}

// =========================================================
// 加载
// =========================================================

#[tokio::test]
async fn load_replaces_collection_and_notifies() {
    let notified = Rc::new(Cell::new(0));
    let counter = notified.clone();
    let presenter = Presenter::new(MockSource::with_courses(two_courses()), 10)
        .with_listener(move |_| counter.set(counter.get() + 1));

    presenter.load().await;

    assert_eq!(ids(presenter.snapshot().courses()), vec![1, 2]);
    assert_eq!(notified.get(), 1);
}

#[tokio::test]
async fn failed_load_keeps_previous_collection() {
    let source = MockSource::with_courses(two_courses());
    source.push_courses(Err(ClientError::transport("offline")));
    let presenter = loaded(source).await;

    presenter.load().await;

    assert_eq!(ids(presenter.snapshot().courses()), vec![1, 2]);
}

#[tokio::test]
async fn older_reload_finishing_last_is_discarded() {
    let source = MockSource::default();
    let first_tx = source.hold_courses();
    let second_tx = source.hold_courses();
    let notified = Rc::new(Cell::new(0));
    let counter = notified.clone();
    let presenter =
        Presenter::new(source, 10).with_listener(move |_| counter.set(counter.get() + 1));

    let first = presenter.load();
    let second = presenter.load();

    let (_, _) = futures::join!(first, async {
        second_tx.send(vec![course(2, "Biology")]).unwrap();
        second.await;
        assert_eq!(ids(presenter.snapshot().courses()), vec![2]);
        // 先发起的请求最后才返回
        first_tx.send(two_courses()).unwrap();
    });

    assert_eq!(ids(presenter.snapshot().courses()), vec![2]);
    assert_eq!(notified.get(), 1);
    assert_eq!(presenter.source.calls(), vec!["courses", "courses"]);
}

#[test]
fn only_the_latest_load_generation_applies() {
    let mut state = CatalogState::new(10);
    let older = state.begin_load();
    let newer = state.begin_load();

    assert!(state.apply_collection(newer, vec![course(2, "Biology")]));
    assert!(!state.apply_collection(older, two_courses()));
    assert_eq!(ids(state.courses()), vec![2]);
}

#[tokio::test]
async fn empty_collection_hides_controls() {
    let presenter = loaded(MockSource::with_courses(Vec::new())).await;
    let view = presenter.snapshot().view();

    assert!(!view.show_controls);
    assert_eq!(view.empty, Some(EmptyState::NoData));
    assert_eq!(view.empty.unwrap().title(), "No courses available");
}

// =========================================================
// 视图推导
// =========================================================

#[tokio::test]
async fn search_without_matches_is_distinct_from_no_data() {
    let presenter = loaded(MockSource::with_courses(two_courses())).await;
    presenter.dispatch(CatalogAction::SearchChanged("history".to_string()));
    let view = presenter.snapshot().view();

    assert!(view.show_controls);
    assert_eq!(view.empty, Some(EmptyState::NoMatches));
    assert_eq!(view.empty.unwrap().title(), "No courses match your search");
}

#[tokio::test]
async fn search_and_sort_scenarios() {
    let presenter = loaded(MockSource::with_courses(two_courses())).await;

    presenter.dispatch(CatalogAction::SearchChanged("bio".to_string()));
    assert_eq!(ids(&presenter.snapshot().view().items), vec![2]);

    presenter.dispatch(CatalogAction::SearchChanged(String::new()));
    presenter.dispatch(CatalogAction::SortFieldChanged(CourseSortField::Title));
    presenter.dispatch(CatalogAction::SortOrderChanged(SortOrder::Descending));
    let titles: Vec<String> = presenter
        .snapshot()
        .view()
        .items
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, vec!["Biology", "Algebra"]);
}

#[test]
fn reveal_more_and_search_reset_pagination() {
    let mut state = CatalogState::new(10);
    let courses: Vec<Course> = (1..=25).map(|i| course(i, &format!("Course {}", i))).collect();
    state.reduce(CatalogAction::CollectionLoaded(courses));

    let view = state.view();
    assert_eq!(view.items.len(), 10);
    assert_eq!(view.total_matches, 25);
    assert!(view.has_more);

    state.reduce(CatalogAction::RevealMore);
    assert_eq!(state.view().items.len(), 20);
    state.reduce(CatalogAction::RevealMore);
    let view = state.view();
    assert_eq!(view.items.len(), 25);
    assert!(!view.has_more);

    state.reduce(CatalogAction::SearchChanged("course".to_string()));
    assert_eq!(state.view().items.len(), 10);
}

#[test]
fn url_seed_applies_only_before_user_types() {
    let mut state = CatalogState::new(10);
    state.reduce(CatalogAction::SearchSeeded("bio".to_string()));
    assert_eq!(state.query().search, "bio");
    assert_eq!(state.search_param(), Some("bio"));

    // 已有搜索词时不会被覆盖
    state.reduce(CatalogAction::SearchSeeded("chem".to_string()));
    assert_eq!(state.query().search, "bio");

    // 用户清空后，URL 参数不再回填
    state.reduce(CatalogAction::SearchChanged(String::new()));
    state.reduce(CatalogAction::SearchSeeded("chem".to_string()));
    assert_eq!(state.query().search, "");
    assert_eq!(state.search_param(), None);
}

// =========================================================
// 选中与明细
// =========================================================

#[tokio::test]
async fn selecting_triggers_exactly_one_lessons_fetch() {
    let source = MockSource::with_courses(two_courses());
    source
        .lessons
        .borrow_mut()
        .insert(1, Ok(vec![lesson(10, 1, "Linear equations")]));
    let presenter = loaded(source).await;

    presenter.select(1).await;

    let state = presenter.snapshot();
    assert_eq!(state.selected().map(|c| c.course_id), Some(1));
    assert_eq!(state.lessons().len(), 1);
    assert!(!state.lessons_loading());
    assert_eq!(presenter.source.calls(), vec!["courses", "lessons:1"]);
}

#[tokio::test]
async fn empty_lessons_are_not_an_error() {
    let presenter = loaded(MockSource::with_courses(two_courses())).await;

    presenter.select(1).await;

    let state = presenter.snapshot();
    assert!(state.selected().is_some());
    assert!(state.lessons().is_empty());
    assert!(!state.lessons_loading());
}

#[tokio::test]
async fn failed_lessons_fetch_yields_empty_list() {
    let source = MockSource::with_courses(two_courses());
    source
        .lessons
        .borrow_mut()
        .insert(2, Err(ClientError::status(500, "boom")));
    let presenter = loaded(source).await;

    presenter.select(2).await;

    assert!(presenter.snapshot().lessons().is_empty());
    assert_eq!(presenter.snapshot().selected().map(|c| c.course_id), Some(2));
}

#[tokio::test]
async fn deselect_clears_without_fetch() {
    let presenter = loaded(MockSource::with_courses(two_courses())).await;
    presenter.select(1).await;

    presenter.deselect();

    let state = presenter.snapshot();
    assert!(state.selected().is_none());
    assert!(state.lessons().is_empty());
    assert_eq!(presenter.source.calls(), vec!["courses", "lessons:1"]);
}

#[tokio::test]
async fn unknown_id_selects_nothing_and_fetches_nothing() {
    let presenter = loaded(MockSource::with_courses(two_courses())).await;

    presenter.select(99).await;

    assert!(presenter.snapshot().selected().is_none());
    assert_eq!(presenter.source.calls(), vec!["courses"]);
}

#[tokio::test]
async fn stale_lessons_response_is_discarded() {
    let source = MockSource::with_courses(two_courses());
    let first_tx = source.hold_lessons(1);
    let second_tx = source.hold_lessons(2);
    let presenter = loaded(source).await;

    // 两次选中都同步生效，请求按顺序发出
    let first = presenter.select(1);
    let second = presenter.select(2);
    assert_eq!(presenter.snapshot().selected().map(|c| c.course_id), Some(2));

    let (_, _) = futures::join!(first, async {
        second_tx.send(vec![lesson(20, 2, "Cells")]).unwrap();
        first_tx.send(vec![lesson(10, 1, "Equations")]).unwrap();
        second.await;
    });

    let state = presenter.snapshot();
    assert_eq!(state.selected().map(|c| c.course_id), Some(2));
    let titles: Vec<&str> = state.lessons().iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Cells"]);
}

#[tokio::test]
async fn response_after_deselect_is_discarded() {
    let source = MockSource::with_courses(two_courses());
    let tx = source.hold_lessons(1);
    let presenter = loaded(source).await;

    let pending = presenter.select(1);
    presenter.deselect();
    tx.send(vec![lesson(10, 1, "Equations")]).unwrap();
    pending.await;

    let state = presenter.snapshot();
    assert!(state.selected().is_none());
    assert!(state.lessons().is_empty());
}

// =========================================================
// 删除
// =========================================================

#[tokio::test]
async fn confirmed_delete_reloads_collection() {
    let source = MockSource::with_courses(two_courses());
    source.push_courses(Ok(vec![course(1, "Algebra")]));
    let presenter = loaded(source).await;

    let outcome = presenter.delete(2, || true).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(ids(presenter.snapshot().courses()), vec![1]);
    assert_eq!(
        presenter.source.calls(),
        vec!["courses", "delete:2", "courses"]
    );
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let presenter = loaded(MockSource::with_courses(two_courses())).await;

    let outcome = presenter.delete(2, || false).await;

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(presenter.source.calls(), vec!["courses"]);
    assert_eq!(ids(presenter.snapshot().courses()), vec![1, 2]);
}

#[tokio::test]
async fn failed_delete_leaves_state_unchanged() {
    let source = MockSource::with_courses(two_courses());
    source.fail_delete.set(true);
    let presenter = loaded(source).await;

    let outcome = presenter.delete(2, || true).await;

    assert_eq!(outcome, DeleteOutcome::Failed);
    assert_eq!(ids(presenter.snapshot().courses()), vec![1, 2]);
    assert_eq!(presenter.source.calls(), vec!["courses", "delete:2"]);
}

#[tokio::test]
async fn deleting_the_selected_course_clears_selection() {
    let source = MockSource::with_courses(two_courses());
    source.push_courses(Ok(vec![course(1, "Algebra")]));
    let presenter = loaded(source).await;
    presenter.select(2).await;

    presenter.delete(2, || true).await;

    assert!(presenter.snapshot().selected().is_none());
}

#[tokio::test]
async fn reload_refreshes_selected_item() {
    let source = MockSource::with_courses(two_courses());
    source.push_courses(Ok(vec![course(1, "Algebra I"), course(2, "Biology")]));
    let presenter = loaded(source).await;
    presenter.select(1).await;

    presenter.load().await;

    assert_eq!(
        presenter.snapshot().selected().map(|c| c.title.clone()),
        Some("Algebra I".to_string())
    );
}
