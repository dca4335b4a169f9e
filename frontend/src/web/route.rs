//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、访问级别以及查询参数的解析与编码。

use coursedesk::guard::Access;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fmt::Display;

/// 查询参数编码集：保留 RFC 3986 的非保留字符
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const REDIRECT_PARAM: &str = "redirect";
pub const SEARCH_PARAM: &str = "search";
pub const SELECTED_PARAM: &str = "selected";

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    Login,
    /// 课程列表 (默认路由)
    #[default]
    Courses,
    AddCourse,
    EditCourse(i64),
    Lessons,
    Profile,
    Settings,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        match path {
            "/login" => Self::Login,
            "/" | "/courses" => Self::Courses,
            "/add-course" => Self::AddCourse,
            "/lessons" => Self::Lessons,
            "/profile" => Self::Profile,
            "/settings" => Self::Settings,
            _ => path
                .strip_prefix("/edit-course/")
                .and_then(|id| id.parse::<i64>().ok())
                .map(Self::EditCourse)
                .unwrap_or(Self::NotFound),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Courses => "/courses".to_string(),
            Self::AddCourse => "/add-course".to_string(),
            Self::EditCourse(id) => format!("/edit-course/{}", id),
            Self::Lessons => "/lessons".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫配置：该路由需要的访问级别**
    pub fn access(&self) -> Access {
        match self {
            Self::Login | Self::NotFound => Access::Public,
            Self::AddCourse | Self::EditCourse(_) => Access::Admin,
            Self::Courses | Self::Lessons | Self::Profile | Self::Settings => Access::Authenticated,
        }
    }

    /// 已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证成功且没有来源地址时的去处
    pub fn auth_success_redirect() -> Self {
        Self::Courses
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 地址 (path + query)
// =========================================================

/// 当前地址：路由加上解码后的查询参数
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub route: AppRoute,
    pub path: String,
    pub query: Vec<(String, String)>,
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, QUERY_ENCODE_SET).to_string()
}

/// 解析查询字符串 (可带前导 `?`)，忽略空片段
pub fn parse_query(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

impl Location {
    /// 由 `pathname` 与 `search` 构造
    pub fn new(path: &str, search: &str) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        Self {
            route: AppRoute::from_path(path),
            path: path.to_string(),
            query: parse_query(search),
        }
    }

    /// 解析 `/path?query` 形式的站内地址
    pub fn parse(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, search)) => Self::new(path, search),
            None => Self::new(href, ""),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 设置或移除一个查询参数，其他参数保持原顺序
    pub fn with_param(mut self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => match self.query.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = v.to_string(),
                None => self.query.push((key.to_string(), v.to_string())),
            },
            None => self.query.retain(|(k, _)| k != key),
        }
        self
    }

    /// 重新编码为站内地址
    pub fn to_href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }

    /// 未认证时跳转的登录地址，携带来源地址
    pub fn login_redirect(&self) -> String {
        format!(
            "{}?{}={}",
            AppRoute::Login.to_path(),
            REDIRECT_PARAM,
            encode(&self.to_href())
        )
    }

    /// 登录成功后的目标地址
    ///
    /// 只接受站内路径，且不会回到登录页本身。
    pub fn redirect_target(&self) -> String {
        self.param(REDIRECT_PARAM)
            .filter(|r| r.starts_with('/') && !r.starts_with("//"))
            .filter(|r| !Location::parse(r).route.should_redirect_when_authenticated())
            .map(str::to_string)
            .unwrap_or_else(|| AppRoute::auth_success_redirect().to_path())
    }
}
