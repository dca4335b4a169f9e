//! CourseDesk 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层
//!
//! 业务状态与推导逻辑都在 `coursedesk` 核心库中，这里只负责浏览器绑定与渲染。

mod auth;
mod components {
    pub mod course_form;
    pub mod course_list;
    mod icons;
    pub mod lessons;
    pub mod login;
    pub mod nav;
    pub mod not_found;
    pub mod profile;
    pub mod protected_route;
    pub mod settings;
}

use crate::auth::{AuthContext, init_auth, runtime_config};
use crate::components::course_form::CourseFormPage;
use crate::components::course_list::CourseListPage;
use crate::components::lessons::LessonsPage;
use crate::components::login::LoginPage;
use crate::components::nav::NavBar;
use crate::components::not_found::NotFoundPage;
use crate::components::profile::ProfilePage;
use crate::components::protected_route::ProtectedRoute;
use crate::components::settings::SettingsPage;

use coursedesk::RuntimeConfig;
use coursedesk::guard::Access;
use coursedesk::settings::Settings;
use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，并实现核心库定义的抽象。
pub(crate) mod web {
    pub mod dom;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::LocalStorage;
}

use web::LocalStorage;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由对应的页面 (不含守卫)
fn page_for(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Courses => view! { <CourseListPage /> }.into_any(),
        AppRoute::AddCourse => view! { <CourseFormPage course_id=None /> }.into_any(),
        AppRoute::EditCourse(id) => view! { <CourseFormPage course_id=Some(id) /> }.into_any(),
        AppRoute::Lessons => view! { <LessonsPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Settings => view! { <SettingsPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

/// 路由匹配函数
///
/// 根据路由声明的访问级别决定是否包裹 `ProtectedRoute`。
fn route_matcher(route: AppRoute) -> AnyView {
    match route.access() {
        Access::Public => page_for(route),
        Access::Authenticated => view! {
            <ProtectedRoute>{page_for(route)}</ProtectedRoute>
        }
        .into_any(),
        Access::Admin => view! {
            <ProtectedRoute require_admin=true>{page_for(route)}</ProtectedRoute>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = runtime_config();
    coursedesk::log_info!("[App] API base: {}", config.api_base);

    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);
    provide_context::<RuntimeConfig>(config);

    // 2. 从 LocalStorage 恢复会话
    init_auth(&auth_ctx);

    // 3. 应用已保存的主题
    web::dom::apply_theme(Settings::load(&LocalStorage).theme);

    // 4. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 font-sans">
                <NavBar />
                <main class="max-w-7xl mx-auto p-4 md:p-8">
                    <RouterOutlet matcher=route_matcher />
                </main>
            </div>
        </Router>
    }
}
