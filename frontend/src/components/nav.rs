use crate::auth::{logout, use_auth};
use crate::components::icons::{BookOpen, LogOut};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

/// 顶部导航栏，未登录时只显示标题
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let is_authenticated = move || auth.state.with(|s| s.is_authenticated());
    let is_admin = move || auth.state.with(|s| s.is_admin());
    let username = move || {
        auth.state.with(|s| {
            s.user()
                .and_then(|u| u.username.clone())
                .unwrap_or_default()
        })
    };

    let on_logout = move |_| {
        router.navigate(&AppRoute::Login.to_path());
        logout(&auth);
    };

    view! {
        <div class="navbar bg-base-100 shadow-xl">
            <div class="flex-1 gap-2">
                <BookOpen attr:class="text-primary h-6 w-6" />
                <Link href=AppRoute::Courses.to_path() class="btn btn-ghost text-xl">
                    "CourseDesk"
                </Link>
            </div>
            <Show when=is_authenticated>
                <div class="flex-none gap-2">
                    <ul class="menu menu-horizontal px-1">
                        <li><Link href=AppRoute::Courses.to_path()>"Courses"</Link></li>
                        <li><Link href=AppRoute::Lessons.to_path()>"Lessons"</Link></li>
                        <Show when=is_admin>
                            <li><Link href=AppRoute::AddCourse.to_path()>"Add Course"</Link></li>
                        </Show>
                        <li><Link href=AppRoute::Profile.to_path()>"Profile"</Link></li>
                        <li><Link href=AppRoute::Settings.to_path()>"Settings"</Link></li>
                    </ul>
                    <span class="badge badge-neutral hidden md:inline-flex">{username}</span>
                    <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </Show>
        </div>
    }
}
