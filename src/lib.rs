//! coursedesk 核心
//!
//! 与平台无关的部分：HTTP 抽象、API 客户端、会话、偏好设置、
//! 路由守卫以及课程目录的视图推导与展示器。浏览器相关的实现位于 frontend。

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::__web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::__web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod prefs;
pub mod request;
pub mod session;
pub mod settings;

pub use api::CourseApi;
pub use config::RuntimeConfig;
pub use error::{ClientError, ClientErrorKind, ClientResult};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use coursedesk_shared as shared;

#[doc(hidden)]
#[cfg(target_arch = "wasm32")]
pub use web_sys as __web_sys;
