use crate::auth::{demo_login, login, use_auth};
use crate::components::icons::ShieldCheck;
use coursedesk_shared::AccountType;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 登录失败时展示给用户的文案
fn failure_message(ctx: &str, e: &coursedesk::ClientError) -> String {
    coursedesk::log_error!("[Login] {} failed: {}", ctx, e);
    if e.is_unauthorized() {
        "Invalid username or password.".to_string()
    } else {
        "Login failed. Please try again.".to_string()
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 成功后的跳转由路由服务监听认证状态自动完成
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().trim().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            if let Err(e) = login(&auth, username.get_untracked(), password.get_untracked()).await {
                set_error_msg.set(Some(failure_message("login", &e)));
            }
            set_is_submitting.set(false);
        });
    };

    let start_demo = move |account_type: AccountType| {
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            if let Err(e) = demo_login(&auth, account_type).await {
                set_error_msg.set(Some(failure_message("demo login", &e)));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[80vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"CourseDesk"</h1>
                        <p class="text-base-content/70">"Sign in to manage your courses"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>

                        <div class="divider">"or try a demo account"</div>
                        <div class="grid grid-cols-2 gap-2">
                            <button
                                type="button"
                                class="btn btn-secondary btn-outline"
                                disabled=move || is_submitting.get()
                                on:click=move |_| start_demo(AccountType::Admin)
                            >
                                "Demo Admin Login"
                            </button>
                            <button
                                type="button"
                                class="btn btn-accent btn-outline"
                                disabled=move || is_submitting.get()
                                on:click=move |_| start_demo(AccountType::User)
                            >
                                "Demo User Login"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

