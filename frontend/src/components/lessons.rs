//! 课时页
//!
//! 与课程列表共用核心库的视图推导；选中项直接保存在地址栏 `?selected=` 中。

use crate::auth::use_auth;
use crate::components::icons::{Search, X};
use crate::web::route::{SEARCH_PARAM, SELECTED_PARAM};
use crate::web::router::use_router;
use coursedesk::RuntimeConfig;
use coursedesk::catalog::view;
use coursedesk::catalog::{LessonSortField, Pagination, SortOrder, ViewQuery};
use coursedesk_shared::Lesson;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn created_label(lesson: &Lesson) -> String {
    lesson
        .created_timestamp()
        .map(|t| t.format_date())
        .unwrap_or_else(|| "N/A".to_string())
}

#[component]
pub fn LessonsPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let page_size = use_context::<RuntimeConfig>()
        .unwrap_or_default()
        .page_size;

    let initial_search = router
        .location()
        .with_untracked(|l| l.param(SEARCH_PARAM).map(str::to_string))
        .unwrap_or_default();

    let lessons = RwSignal::new(Vec::<Lesson>::new());
    let loading = RwSignal::new(true);
    let query = RwSignal::new(ViewQuery {
        search: initial_search,
        ..ViewQuery::new(LessonSortField::Id)
    });
    let pagination = RwSignal::new(Pagination::new(page_size));

    // 拉取全部课时，失败时保留空列表
    let api = auth.api();
    spawn_local(async move {
        match api.list_lessons().await {
            Ok(data) => lessons.set(data),
            Err(e) => coursedesk::log_error!("[Lessons] Failed to load lessons: {}", e),
        }
        loading.set(false);
    });

    let filtered = Memo::new(move |_| lessons.with(|items| query.with(|q| view::derive(items, q))));
    let visible = Memo::new(move |_| {
        let shown = pagination.with(|p| p.shown(filtered.with(Vec::len)));
        filtered.with(|items| items.iter().take(shown).cloned().collect::<Vec<_>>())
    });
    let has_more = move || pagination.with(|p| p.has_more(filtered.with(Vec::len)));

    let selected_id = Memo::new(move |_| {
        router
            .location()
            .with(|l| l.param(SELECTED_PARAM).and_then(|v| v.parse::<i64>().ok()))
    });
    let selected = Memo::new(move |_| {
        let id = selected_id.get()?;
        lessons.with(|items| items.iter().find(|l| l.lesson_id == id).cloned())
    });

    // 搜索词同步到地址栏
    Effect::new(move |_| {
        let search = query.with(|q| q.search.clone());
        let param = Some(search.as_str()).filter(|s| !s.is_empty());
        router.replace_param(SEARCH_PARAM, param);
    });

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
            <div class="lg:col-span-2 space-y-4">
                <h2 class="text-2xl font-bold">"Lessons"</h2>

                <div class="flex flex-col md:flex-row gap-2">
                    <label class="input input-bordered flex items-center gap-2 flex-1">
                        <Search attr:class="h-4 w-4 opacity-50" />
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search by title, topic, content or ID"
                            prop:value=move || query.with(|q| q.search.clone())
                            on:input=move |ev| {
                                let search = event_target_value(&ev);
                                query.update(|q| q.search = search);
                                pagination.update(Pagination::reset);
                            }
                        />
                    </label>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Some(field) = LessonSortField::parse(&event_target_value(&ev)) {
                                query.update(|q| q.sort_field = field);
                            }
                        }
                    >
                        {LessonSortField::ALL
                            .into_iter()
                            .map(|field| {
                                view! {
                                    <option
                                        value=field.as_str()
                                        selected=move || query.with(|q| q.is_sorted_by(field))
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
                                query.update(|q| q.sort_order = order);
                            }
                        }
                    >
                        {[SortOrder::Ascending, SortOrder::Descending]
                            .into_iter()
                            .map(|order| {
                                view! {
                                    <option
                                        value=order.as_str()
                                        selected=move || query.with(|q| q.is_ordered(order))
                                    >
                                        {order.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <div class="flex justify-center py-12"><span class="loading loading-spinner loading-lg"></span></div> }
                >
                    <Show
                        when=move || filtered.with(|f| !f.is_empty())
                        fallback=move || view! {
                            <p class="text-center py-8 text-base-content/50">
                                {move || if lessons.with(Vec::is_empty) { "No lessons available" } else { "No lessons match your search" }}
                            </p>
                        }
                    >
                        <ul class="menu bg-base-100 rounded-box shadow w-full">
                            <For
                                each=move || visible.get()
                                key=|l| (l.lesson_id, l.title.clone())
                                children=move |lesson| {
                                    let id = lesson.lesson_id;
                                    let is_active = move || selected_id.get() == Some(id);
                                    view! {
                                        <li>
                                            <a
                                                class=move || if is_active() { "active" } else { "" }
                                                on:click=move |_| router.replace_param(SELECTED_PARAM, Some(&id.to_string()))
                                            >
                                                <span class="font-medium">{lesson.title.clone()}</span>
                                                {lesson.course_title.clone().map(|t| view! { <span class="badge badge-ghost">{t}</span> })}
                                            </a>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                        <Show when=has_more>
                            <div class="flex justify-center">
                                <button
                                    class="btn btn-outline"
                                    on:click=move |_| {
                                        let total = filtered.with(Vec::len);
                                        pagination.update(|p| p.reveal_more(total));
                                    }
                                >
                                    "Load More"
                                </button>
                            </div>
                        </Show>
                    </Show>
                </Show>
            </div>

            <div>
                {move || match selected.get() {
                    Some(lesson) => view! {
                        <div class="card bg-base-100 shadow-xl sticky top-4">
                            <div class="card-body">
                                <div class="flex items-start justify-between">
                                    <h3 class="card-title">{lesson.title.clone()}</h3>
                                    <button
                                        class="btn btn-sm btn-circle btn-ghost"
                                        on:click=move |_| router.replace_param(SELECTED_PARAM, None)
                                    >
                                        <X attr:class="h-4 w-4" />
                                    </button>
                                </div>
                                {lesson.topic.clone().map(|t| view! { <span class="badge badge-accent badge-outline">{t}</span> })}
                                <p class="whitespace-pre-wrap">{lesson.content.clone().unwrap_or_default()}</p>
                                <div class="text-xs opacity-60">
                                    {lesson.course_title.clone().unwrap_or_default()} " · " {created_label(&lesson)}
                                </div>
                            </div>
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <div class="card bg-base-100 shadow">
                            <div class="card-body text-base-content/60">"Select a lesson to see its content."</div>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
