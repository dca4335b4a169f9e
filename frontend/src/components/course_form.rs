//! 课程新增 / 编辑页
//!
//! 两种模式共用同一个 `FormState`；编辑模式先加载课程预填。

mod form_state;

use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CourseFormPage(
    /// `None` 为新增，`Some(id)` 为编辑
    course_id: Option<i64>,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let form = FormState::new();
    let (loading, set_loading) = signal(course_id.is_some());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 编辑模式：预加载课程
    if let Some(id) = course_id {
        let api = auth.api();
        spawn_local(async move {
            match api.get_course(id).await {
                Ok(course) => form.fill(&course),
                Err(e) => {
                    coursedesk::log_error!("[CourseForm] Failed to load course {}: {}", id, e);
                    set_error_msg.set(Some(format!("Failed to load course: {}", e)));
                }
            }
            set_loading.set(false);
        });
    }

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(msg) => {
                set_error_msg.set(Some(msg.to_string()));
                return;
            }
        };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = auth.api();
        spawn_local(async move {
            let result = match course_id {
                Some(id) => api.update_course(id, draft).await,
                None => api.create_course(draft).await,
            };
            set_is_submitting.set(false);
            match result {
                Ok(course) => {
                    coursedesk::log_info!("[CourseForm] Saved course {}", course.course_id);
                    router.navigate(&AppRoute::Courses.to_path());
                }
                Err(e) => {
                    coursedesk::log_error!("[CourseForm] Save failed: {}", e);
                    set_error_msg.set(Some(format!("Failed to save course: {}", e)));
                }
            }
        });
    };

    let heading = if course_id.is_some() { "Edit Course" } else { "Add Course" };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-2xl mx-auto">
            <form class="card-body space-y-2" on:submit=on_submit>
                <h2 class="card-title text-2xl">{heading}</h2>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <span class="loading loading-spinner loading-md"></span> }
                >
                    <div class="form-control">
                        <label class="label" for="title">
                            <span class="label-text">"Title"</span>
                        </label>
                        <input
                            id="title"
                            type="text"
                            class="input input-bordered"
                            prop:value=form.title
                            on:input=move |ev| form.title.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="description">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea
                            id="description"
                            class="textarea textarea-bordered h-32"
                            prop:value=form.description
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="form-control">
                        <label class="label" for="category">
                            <span class="label-text">"Category"</span>
                        </label>
                        <input
                            id="category"
                            type="text"
                            class="input input-bordered"
                            prop:value=form.category
                            on:input=move |ev| form.category.set(event_target_value(&ev))
                        />
                    </div>
                </Show>

                <div class="card-actions justify-end mt-4">
                    <Link href=AppRoute::Courses.to_path() class="btn btn-ghost">"Cancel"</Link>
                    <button class="btn btn-primary" disabled=move || is_submitting.get() || loading.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                        } else {
                            "Save".into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
