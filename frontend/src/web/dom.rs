//! 零散的 DOM 操作

use coursedesk::settings::Theme;

/// 弹出原生确认框，无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 把主题写到 `<html data-theme="...">`
pub fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());

    let Some(root) = root else {
        coursedesk::log_error!("[Theme] No document element to apply {}", theme.as_str());
        return;
    };

    if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
        coursedesk::log_error!("[Theme] Failed to apply {}: {:?}", theme.as_str(), e);
    }
}
