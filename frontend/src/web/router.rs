//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 访问控制由 `ProtectedRoute` 组件负责，这里只处理地址与导航。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, Location};

/// 获取当前浏览器地址
fn current_location() -> Location {
    let location = web_sys::window().map(|w| w.location());
    let path = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    let search = location
        .as_ref()
        .and_then(|l| l.search().ok())
        .unwrap_or_default();
    Location::new(&path, &search)
}

fn history() -> Option<web_sys::History> {
    web_sys::window().and_then(|w| w.history().ok())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(href: &str) {
    if let Some(history) = history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(href));
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(href: &str) {
    if let Some(history) = history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(href));
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前地址（只读信号）
    location: ReadSignal<Location>,
    set_location: WriteSignal<Location>,
    /// 只在路由变化时通知，查询参数变化不会触发页面重建
    route: Memo<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (location, set_location) = signal(current_location());
        let route = Memo::new(move |_| location.with(|l| l.route));

        Self {
            location,
            set_location,
            route,
            is_authenticated,
        }
    }

    pub fn location(&self) -> ReadSignal<Location> {
        self.location
    }

    pub fn current_route(&self) -> Memo<AppRoute> {
        self.route
    }

    /// 导航到站内地址 (pushState)
    pub fn navigate(&self, href: &str) {
        push_history_state(href);
        self.set_location.set(Location::parse(href));
    }

    /// 重定向到站内地址 (replaceState，不留历史记录)
    pub fn redirect(&self, href: &str) {
        replace_history_state(href);
        self.set_location.set(Location::parse(href));
    }

    /// 同步单个查询参数到地址栏，`None` 时移除
    pub fn replace_param(&self, key: &str, value: Option<&str>) {
        let next = self.location.get_untracked().with_param(key, value);
        if next == self.location.get_untracked() {
            return;
        }
        replace_history_state(&next.to_href());
        self.set_location.set(next);
    }

    /// 浏览器后退
    pub fn back(&self) {
        if let Some(history) = history() {
            let _ = history.back();
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_location = self.set_location;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_location.set(current_location());
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 登录成功后离开登录页，回到来源地址
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            if !router.is_authenticated.get() {
                return;
            }
            let location = router.location.get();
            if location.route.should_redirect_when_authenticated() {
                let target = location.redirect_target();
                coursedesk::log_info!("[Router] Authenticated, redirecting to {}", target);
                router.redirect(&target);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接，点击时走 History API 而不是整页跳转
#[component]
pub fn Link(
    /// 目标地址
    #[prop(into)]
    href: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = href.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
