// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，如果外部没有提供对应的键，则使用这些值
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 覆盖 API 地址的键 (LocalStorage 或编译期环境变量)
pub const API_BASE_KEY: &str = "cm_api_base";
pub const PAGE_SIZE_KEY: &str = "cm_page_size";

/// 运行时配置结构体
///
/// 通过注入的查找函数读取配置，与具体存储解耦。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub api_base: String,
    pub page_size: usize,
}

impl RuntimeConfig {
    pub fn new(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base: lookup(API_BASE_KEY)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),

            // 非法值或 0 都回退到默认分页大小
            page_size: lookup(PAGE_SIZE_KEY)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(|_| None)
    }
}
