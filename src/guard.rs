//! 路由守卫判定
//!
//! 纯函数，不依赖 DOM。UI 层根据返回的 `GuardDecision` 渲染。

use crate::request::HttpClient;
use crate::session::AuthState;

/// 路由所需的访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 认证状态仍在加载，显示等待指示，不跳转也不渲染子内容
    Wait,
    /// 未登录，跳转到登录页并记住来源
    RedirectToLogin,
    /// 已登录但缺少管理员角色，原地显示拒绝访问
    Denied,
    Allow,
}

pub fn evaluate<C: HttpClient + Clone>(auth: &AuthState<C>, access: Access) -> GuardDecision {
    if access == Access::Public {
        return GuardDecision::Allow;
    }
    if auth.loading {
        return GuardDecision::Wait;
    }
    if !auth.is_authenticated() {
        return GuardDecision::RedirectToLogin;
    }
    if access == Access::Admin && !auth.is_admin() {
        return GuardDecision::Denied;
    }
    GuardDecision::Allow
}
