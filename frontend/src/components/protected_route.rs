//! 路由守卫组件
//!
//! 判定逻辑在 `coursedesk::guard`，这里只负责根据判定结果渲染或跳转。

use crate::auth::use_auth;
use crate::components::icons::ShieldAlert;
use crate::web::router::use_router;
use coursedesk::guard::{self, Access, GuardDecision};
use leptos::prelude::*;

#[component]
fn Spinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[50vh]">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

#[component]
pub fn ProtectedRoute(
    /// 是否要求管理员角色
    #[prop(optional)]
    require_admin: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let access = if require_admin {
        Access::Admin
    } else {
        Access::Authenticated
    };
    let decision = Memo::new(move |_| auth.state.with(|s| guard::evaluate(s, access)));

    // 未登录：跳转到登录页并记住来源地址
    Effect::new(move |_| {
        if decision.get() != GuardDecision::RedirectToLogin {
            return;
        }
        let from = router.location().get_untracked();
        if from.route.access() == Access::Public {
            return;
        }
        coursedesk::log_info!("[Guard] Not authenticated, leaving {}", from.path);
        router.redirect(&from.login_redirect());
    });

    move || match decision.get() {
        GuardDecision::Wait | GuardDecision::RedirectToLogin => view! { <Spinner /> }.into_any(),
        GuardDecision::Denied => view! {
            <div class="hero min-h-[50vh]">
                <div class="hero-content text-center">
                    <div class="max-w-md flex flex-col items-center gap-4">
                        <div class="p-3 bg-error/10 rounded-2xl text-error">
                            <ShieldAlert attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Access Denied"</h1>
                        <p class="text-base-content/70">
                            "You do not have permission to view this page."
                        </p>
                        <button class="btn btn-outline" on:click=move |_| router.back()>
                            "Go Back"
                        </button>
                    </div>
                </div>
            </div>
        }
        .into_any(),
        GuardDecision::Allow => children(),
    }
}
