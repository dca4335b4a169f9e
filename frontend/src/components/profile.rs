use crate::auth::use_auth;
use leptos::prelude::*;

const NOT_AVAILABLE: &str = "N/A";

#[component]
fn Field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="flex justify-between border-b border-base-200 py-2">
            <span class="text-base-content/60">{label}</span>
            <span class="font-medium">{value}</span>
        </div>
    }
}

/// 个人资料面板，缺失的字段显示 `N/A`
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();

    move || {
        let Some(user) = auth.state.with(|s| s.user().cloned()) else {
            return view! {
                <div class="alert">"You are not logged in."</div>
            }
            .into_any();
        };

        let or_na = |v: Option<String>| v.filter(|s| !s.is_empty()).unwrap_or_else(|| NOT_AVAILABLE.to_string());

        view! {
            <div class="card bg-base-100 shadow-xl max-w-xl mx-auto">
                <div class="card-body">
                    <h2 class="card-title text-2xl">"Profile"</h2>
                    <Field label="Username" value=or_na(user.username) />
                    <Field label="Email" value=or_na(user.email) />
                    <Field label="Role" value=or_na(Some(user.role)) />
                </div>
            </div>
        }
        .into_any()
    }
}
