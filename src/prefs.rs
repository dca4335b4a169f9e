//! 本地偏好存储
//!
//! 浏览器端由 `window.localStorage` 实现，测试和非浏览器环境使用 `MemoryStore`。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// =========================================================
// 存储键 (Storage Keys)
// =========================================================

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const USERNAME_KEY: &str = "username";
pub const EMAIL_KEY: &str = "email";
pub const THEME_KEY: &str = "cm_theme";
pub const NOTIFICATIONS_KEY: &str = "cm_notifications";

/// 键值存储特性
///
/// 与 LocalStorage 的语义一致：写入失败返回 `false`，读不到返回 `None`。
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> bool {
        (**self).delete(key)
    }
}

/// 内存实现
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.borrow_mut().remove(key);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites_and_deletes() {
        let store = MemoryStore::with_entries([(THEME_KEY, "light")]);
        assert!(store.set(THEME_KEY, "dark"));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        assert!(store.delete(THEME_KEY));
        assert_eq!(store.get(THEME_KEY), None);
        assert!(store.is_empty());
    }

    #[test]
    fn rc_store_shares_entries() {
        let store = Rc::new(MemoryStore::new());
        let shared = store.clone();
        shared.set(TOKEN_KEY, "abc");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
    }
}
