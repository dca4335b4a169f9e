use crate::web::LocalStorage;
use crate::web::dom;
use coursedesk::settings::{Settings, Theme};
use leptos::prelude::*;

/// 设置页
///
/// 只在提交时写入存储；重置会删除已保存的值并恢复默认。
#[component]
pub fn SettingsPage() -> impl IntoView {
    let saved = Settings::load(&LocalStorage);
    let theme = RwSignal::new(saved.theme);
    let notifications = RwSignal::new(saved.notifications);
    let (notice, set_notice) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let settings = Settings {
            theme: theme.get_untracked(),
            notifications: notifications.get_untracked(),
        };
        if settings.save(&LocalStorage) {
            dom::apply_theme(settings.theme);
            set_notice.set(Some(("Settings saved.".to_string(), false)));
        } else {
            coursedesk::log_error!("[Settings] Failed to write preferences");
            set_notice.set(Some(("Could not save settings.".to_string(), true)));
        }
    };

    let on_reset = move |_| {
        let defaults = Settings::reset(&LocalStorage);
        theme.set(defaults.theme);
        notifications.set(defaults.notifications);
        dom::apply_theme(defaults.theme);
        set_notice.set(Some(("Settings reset to defaults.".to_string(), false)));
    };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-xl mx-auto">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title text-2xl">"Settings"</h2>

                <Show when=move || notice.get().is_some()>
                    <div class=move || {
                        let is_err = notice.get().map(|(_, e)| e).unwrap_or(false);
                        if is_err { "alert alert-error text-sm py-2" } else { "alert alert-success text-sm py-2" }
                    }>
                        <span>{move || notice.get().map(|(m, _)| m).unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="form-control">
                    <label class="label" for="theme">
                        <span class="label-text">"Theme"</span>
                    </label>
                    <select
                        id="theme"
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Some(t) = Theme::parse(&event_target_value(&ev)) {
                                theme.set(t);
                            }
                        }
                    >
                        {Theme::ALL
                            .into_iter()
                            .map(|t| view! {
                                <option value=t.as_str() selected=move || theme.get() == t>{t.label()}</option>
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-control">
                    <label class="label cursor-pointer">
                        <span class="label-text">"Enable notifications"</span>
                        <input
                            type="checkbox"
                            class="toggle toggle-primary"
                            prop:checked=notifications
                            on:change=move |ev| notifications.set(event_target_checked(&ev))
                        />
                    </label>
                </div>

                <div class="card-actions justify-end mt-4">
                    <button type="button" class="btn btn-ghost" on:click=on_reset>"Reset"</button>
                    <button type="submit" class="btn btn-primary">"Save"</button>
                </div>
            </form>
        </div>
    }
}
