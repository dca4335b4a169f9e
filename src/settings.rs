//! 本地设置
//!
//! 主题与通知开关，只保存在偏好存储里，不与服务端同步。

use crate::prefs::{NOTIFICATIONS_KEY, PreferenceStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// 只接受固定的枚举值
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
        }
    }
}

impl Settings {
    /// 读取设置，缺失或非法值使用默认值
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        Self {
            theme: store
                .get(THEME_KEY)
                .and_then(|v| Theme::parse(&v))
                .unwrap_or(defaults.theme),
            notifications: store
                .get(NOTIFICATIONS_KEY)
                .map(|v| v != "0")
                .unwrap_or(defaults.notifications),
        }
    }

    /// 写入设置，通知开关存为 "1" / "0"
    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &S) -> bool {
        let theme_ok = store.set(THEME_KEY, self.theme.as_str());
        let notify_ok = store.set(NOTIFICATIONS_KEY, if self.notifications { "1" } else { "0" });
        theme_ok && notify_ok
    }

    /// 删除已保存的设置并返回默认值
    pub fn reset<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        store.delete(THEME_KEY);
        store.delete(NOTIFICATIONS_KEY);
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    #[test]
    fn defaults_when_store_is_empty() {
        let settings = Settings::load(&MemoryStore::new());
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.notifications);
    }

    #[test]
    fn save_writes_textual_boolean() {
        let store = MemoryStore::new();
        let settings = Settings {
            theme: Theme::Dark,
            notifications: false,
        };
        assert!(settings.save(&store));

        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(store.get(NOTIFICATIONS_KEY).as_deref(), Some("0"));
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn unknown_theme_falls_back_to_light() {
        let store = MemoryStore::with_entries([(THEME_KEY, "solarized")]);
        assert_eq!(Settings::load(&store).theme, Theme::Light);
    }

    #[test]
    fn reset_removes_keys() {
        let store = MemoryStore::with_entries([(THEME_KEY, "dark"), (NOTIFICATIONS_KEY, "0")]);
        assert_eq!(Settings::reset(&store), Settings::default());
        assert!(store.is_empty());
    }
}
