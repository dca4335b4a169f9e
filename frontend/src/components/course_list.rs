//! 课程列表页
//!
//! 所有状态都在核心库的 `Presenter` 中，这里把它的快照同步到信号里渲染。
//! 搜索词与地址栏的 `?search=` 双向关联：地址只在初次 (用户未输入前) 生效。

use crate::auth::use_auth;
use crate::components::icons::{BookOpen, Pencil, Plus, Search, Trash2, X};
use crate::web::dom;
use crate::web::route::{AppRoute, Location, SEARCH_PARAM, SELECTED_PARAM};
use crate::web::router::{Link, use_router};
use coursedesk::RuntimeConfig;
use coursedesk::catalog::{CatalogAction, CourseSortField, DeleteOutcome, Presenter, SortOrder};
use coursedesk_shared::{Course, Lesson};
use leptos::prelude::*;
use leptos::task::spawn_local;

const DELETE_PROMPT: &str = "Are you sure you want to delete this course?";

fn created_label(course: &Course) -> String {
    course
        .created_timestamp()
        .map(|t| t.format_date())
        .unwrap_or_else(|| "N/A".to_string())
}

#[component]
pub fn CourseListPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let page_size = use_context::<RuntimeConfig>()
        .unwrap_or_default()
        .page_size;

    let presenter = Presenter::new(auth.api(), page_size);

    // 地址栏的初始搜索词
    if let Some(seed) = router
        .location()
        .with_untracked(|l| l.param(SEARCH_PARAM).map(str::to_string))
    {
        presenter.dispatch(CatalogAction::SearchSeeded(seed));
    }

    let (state, set_state) = signal(presenter.snapshot());
    let presenter = StoredValue::new_local(presenter.with_listener(move |s| set_state.set(s.clone())));
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Option::<String>::None);

    let view_state = Memo::new(move |_| state.with(|s| s.view()));
    let is_admin = move || auth.state.with(|s| s.is_admin());

    // 首次加载
    let load = presenter.with_value(|p| p.load());
    spawn_local(async move {
        load.await;
        set_loading.set(false);
    });

    // 后退 / 前进带来的搜索参数
    Effect::new(move |_| {
        let seed = router
            .location()
            .with(|l| l.param(SEARCH_PARAM).map(str::to_string));
        if let Some(seed) = seed {
            presenter.with_value(|p| p.dispatch(CatalogAction::SearchSeeded(seed)));
        }
    });

    // 搜索词同步到地址栏，空搜索词时移除参数
    Effect::new(move |_| {
        let param = state.with(|s| s.search_param().map(str::to_string));
        router.replace_param(SEARCH_PARAM, param.as_deref());
    });

    let dispatch = move |action: CatalogAction| presenter.with_value(|p| p.dispatch(action));

    let select = move |course_id: i64| {
        let fetch = presenter.with_value(|p| p.select(course_id));
        spawn_local(fetch);
    };

    let on_delete = move |course_id: i64| {
        let pending = presenter.with_value(|p| p.delete(course_id, || dom::confirm(DELETE_PROMPT)));
        spawn_local(async move {
            match pending.await {
                DeleteOutcome::Deleted => set_notice.set(None),
                DeleteOutcome::Failed => {
                    set_notice.set(Some("Failed to delete course. Please try again.".to_string()))
                }
                DeleteOutcome::Declined => {}
            }
        });
    };

    // 选中项 → 模态框开关
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    Effect::new(move |_| {
        let open = state.with(|s| s.selected().is_some());
        if let Some(dialog) = dialog_ref.get() {
            if open {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-2xl font-bold">"Courses"</h2>
                    <p class="text-base-content/70 text-sm">
                        {move || format!("{} course(s)", state.with(|s| s.courses().len()))}
                    </p>
                </div>
                <Show when=is_admin>
                    <Link href=AppRoute::AddCourse.to_path() class="btn btn-primary gap-2">
                        <Plus attr:class="h-4 w-4" /> "Add Course"
                    </Link>
                </Show>
            </div>

            <Show when=move || notice.get().is_some()>
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{move || notice.get().unwrap_or_default()}</span>
                </div>
            </Show>

            // 集合为空时不显示搜索和排序
            <Show when=move || view_state.with(|v| v.show_controls)>
                <div class="flex flex-col md:flex-row gap-2">
                    <label class="input input-bordered flex items-center gap-2 flex-1">
                        <Search attr:class="h-4 w-4 opacity-50" />
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search by title, description or ID"
                            prop:value=move || state.with(|s| s.query().search.clone())
                            on:input=move |ev| dispatch(CatalogAction::SearchChanged(event_target_value(&ev)))
                        />
                    </label>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Some(field) = CourseSortField::parse(&event_target_value(&ev)) {
                                dispatch(CatalogAction::SortFieldChanged(field));
                            }
                        }
                    >
                        {CourseSortField::ALL
                            .into_iter()
                            .map(|field| {
                                view! {
                                    <option
                                        value=field.as_str()
                                        selected=move || state.with(|s| s.query().is_sorted_by(field))
                                    >
                                        {field.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Some(order) = SortOrder::parse(&event_target_value(&ev)) {
                                dispatch(CatalogAction::SortOrderChanged(order));
                            }
                        }
                    >
                        {[SortOrder::Ascending, SortOrder::Descending]
                            .into_iter()
                            .map(|order| {
                                view! {
                                    <option
                                        value=order.as_str()
                                        selected=move || state.with(|s| s.query().is_ordered(order))
                                    >
                                        {order.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </Show>

            {move || {
                if loading.get() {
                    return view! {
                        <div class="flex justify-center py-12">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }
                    .into_any();
                }
                match view_state.with(|v| v.empty) {
                    Some(empty) => view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <BookOpen attr:class="h-10 w-10 opacity-40" />
                                <h3 class="card-title">{empty.title()}</h3>
                                <p class="text-base-content/70">{empty.hint()}</p>
                            </div>
                        </div>
                    }
                    .into_any(),
                    None => ().into_any(),
                }
            }}

            <div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-4">
                <For
                    each=move || view_state.with(|v| v.items.clone())
                    key=|c| (c.course_id, c.title.clone(), c.description.clone())
                    children=move |course| {
                        let id = course.course_id;
                        let created = created_label(&course);
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <div class="flex items-start justify-between gap-2">
                                        <h3 class="card-title">{course.title.clone()}</h3>
                                        <span class="badge badge-ghost font-mono">"#" {id}</span>
                                    </div>
                                    <p class="text-base-content/70 line-clamp-3">
                                        {course.description.clone().unwrap_or_default()}
                                    </p>
                                    <div class="flex items-center gap-2 text-xs opacity-60">
                                        {course.category.clone().map(|c| view! { <span class="badge badge-accent badge-outline">{c}</span> })}
                                        <span>{created}</span>
                                    </div>
                                    <div class="card-actions justify-end">
                                        <button class="btn btn-sm btn-ghost" on:click=move |_| select(id)>
                                            "View Lessons"
                                        </button>
                                        <Show when=is_admin>
                                            <Link href=AppRoute::EditCourse(id).to_path() class="btn btn-sm btn-ghost btn-square">
                                                <Pencil attr:class="h-4 w-4" />
                                            </Link>
                                            <button
                                                class="btn btn-sm btn-ghost btn-square text-error"
                                                on:click=move |_| on_delete(id)
                                            >
                                                <Trash2 attr:class="h-4 w-4" />
                                            </button>
                                        </Show>
                                    </div>
                                </div>
                            </div>
                        }
                    }
                />
            </div>

            <Show when=move || view_state.with(|v| v.has_more)>
                <div class="flex justify-center">
                    <button class="btn btn-outline" on:click=move |_| dispatch(CatalogAction::RevealMore)>
                        "Load More"
                    </button>
                </div>
            </Show>

            <dialog
                class="modal"
                node_ref=dialog_ref
                on:close=move |_| presenter.with_value(|p| p.deselect())
            >
                <div class="modal-box max-w-2xl">
                    <div class="flex items-center justify-between">
                        <h3 class="font-bold text-lg">
                            {move || state.with(|s| s.selected().map(|c| c.title.clone()).unwrap_or_default())}
                        </h3>
                        <button
                            class="btn btn-sm btn-circle btn-ghost"
                            on:click=move |_| presenter.with_value(|p| p.deselect())
                        >
                            <X attr:class="h-4 w-4" />
                        </button>
                    </div>
                    <p class="py-2 text-base-content/70">
                        {move || state.with(|s| s.selected().and_then(|c| c.description.clone()).unwrap_or_default())}
                    </p>
                    <h4 class="font-semibold mt-2">"Lessons"</h4>
                    {move || {
                        if state.with(|s| s.lessons_loading()) {
                            return view! { <span class="loading loading-spinner loading-md"></span> }.into_any();
                        }
                        let lessons = state.with(|s| s.lessons().to_vec());
                        if lessons.is_empty() {
                            return view! {
                                <p class="py-4 text-base-content/50">"No lessons added yet."</p>
                            }
                            .into_any();
                        }
                        view! { <LessonLinks lessons=lessons /> }.into_any()
                    }}
                </div>
            </dialog>
        </div>
    }
}

/// 模态框中的课时列表，点击跳转到课时页并选中
#[component]
fn LessonLinks(lessons: Vec<Lesson>) -> impl IntoView {
    view! {
        <ul class="menu bg-base-200 rounded-box mt-2">
            {lessons
                .into_iter()
                .map(|lesson| {
                    let href = Location::parse(&AppRoute::Lessons.to_path())
                        .with_param(SELECTED_PARAM, Some(&lesson.lesson_id.to_string()))
                        .to_href();
                    view! {
                        <li>
                            <Link href=href>
                                <span class="font-medium">{lesson.title}</span>
                                {lesson.topic.map(|t| view! { <span class="badge badge-ghost">{t}</span> })}
                            </Link>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
