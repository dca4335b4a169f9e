//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::web::{FetchClient, LocalStorage};
use coursedesk::config::{API_BASE_KEY, RuntimeConfig};
use coursedesk::session::{self, AuthState};
use coursedesk::{ClientResult, CourseApi};
use coursedesk_shared::AccountType;
use leptos::prelude::*;

/// 编译期可覆盖的 API 地址
const BUILD_API_BASE: Option<&str> = option_env!("COURSEDESK_API_BASE");

/// 浏览器端的认证状态
pub type BrowserAuth = AuthState<FetchClient>;

/// 读取运行时配置：LocalStorage 优先，其次是编译期环境变量
pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig::new(|key| {
        LocalStorage::get(key).or_else(|| match key {
            API_BASE_KEY => BUILD_API_BASE.map(str::to_string),
            _ => None,
        })
    })
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<BrowserAuth>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<BrowserAuth>,
}

impl AuthContext {
    /// 创建新的认证上下文，初始为加载中
    pub fn new(config: &RuntimeConfig) -> Self {
        let api = CourseApi::new(FetchClient, config.api_base.clone());
        let (state, set_state) = signal(AuthState::new(api));
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated()))
    }

    /// 当前的 API 客户端 (携带凭据)
    pub fn api(&self) -> CourseApi<FetchClient> {
        self.state.with_untracked(|s| s.api.clone())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 LocalStorage 恢复会话，只要存在 token 即视为已登录。
pub fn init_auth(ctx: &AuthContext) {
    let api = ctx.api();
    ctx.set_state.set(AuthState::restore(api, &LocalStorage));
}

/// 演示账号登录
pub async fn demo_login(ctx: &AuthContext, account_type: AccountType) -> ClientResult<()> {
    let api = ctx.api();
    let session = session::demo_login(&api, &LocalStorage, account_type).await?;
    ctx.set_state.update(|state| *state = state.signed_in(session));
    Ok(())
}

/// 用户名密码登录
pub async fn login(ctx: &AuthContext, username: String, password: String) -> ClientResult<()> {
    let api = ctx.api();
    let session = session::login(&api, &LocalStorage, username, password).await?;
    ctx.set_state.update(|state| *state = state.signed_in(session));
    Ok(())
}

/// 注销并清除状态
///
/// 导航由调用方决定，受保护页面会在认证状态变化后自动跳转。
pub fn logout(ctx: &AuthContext) {
    session::logout(&LocalStorage);
    ctx.set_state.update(|state| *state = state.signed_out());
    coursedesk::log_info!("[Auth] Logged out");
}
