//! 认证模块
//!
//! 管理会话状态。`AuthState` 是一个显式的值：启动时从偏好存储重建，
//! 之后只通过 `login` / `demo_login` / `logout` 改变，由 UI 层通过 Context 注入使用。

use crate::api::CourseApi;
use crate::error::ClientResult;
use crate::prefs::{EMAIL_KEY, PreferenceStore, ROLE_KEY, TOKEN_KEY, USERNAME_KEY};
use crate::request::HttpClient;
use coursedesk_shared::{AccountType, LoginResponse, ROLE_ADMIN, ROLE_USER};

/// 当前用户信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: String,
}

/// 已登录会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// 认证状态
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState<C> {
    /// API 客户端实例，登录后携带 Bearer 凭据
    pub api: CourseApi<C>,
    /// 当前会话 (未登录时为 None)
    pub session: Option<Session>,
    /// 是否仍在从存储恢复
    pub loading: bool,
}

impl<C: HttpClient + Clone> AuthState<C> {
    /// 尚未恢复的初始状态
    pub fn new(api: CourseApi<C>) -> Self {
        Self {
            api,
            session: None,
            loading: true,
        }
    }

    /// 从偏好存储重建认证状态
    ///
    /// 只要存在 token 即视为已登录，不校验 token 结构。
    pub fn restore<S: PreferenceStore + ?Sized>(api: CourseApi<C>, store: &S) -> Self {
        let session = store
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(|token| Session {
                token,
                user: UserProfile {
                    username: store.get(USERNAME_KEY),
                    email: store.get(EMAIL_KEY),
                    role: store.get(ROLE_KEY).unwrap_or_else(|| ROLE_USER.to_string()),
                },
            });

        let api = match &session {
            Some(s) => api.with_token(s.token.clone()),
            None => api.without_token(),
        };

        Self {
            api,
            session,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.user.role == ROLE_ADMIN)
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// 登录成功后的新状态
    pub fn signed_in(&self, session: Session) -> Self {
        Self {
            api: self.api.clone().with_token(session.token.clone()),
            session: Some(session),
            loading: false,
        }
    }

    /// 注销后的新状态
    pub fn signed_out(&self) -> Self {
        Self {
            api: self.api.clone().without_token(),
            session: None,
            loading: false,
        }
    }
}

/// 把登录响应写入存储
///
/// `role` 缺省为 `USER`，`username` 缺省为调用方给出的回退值。
pub fn persist_login<S: PreferenceStore + ?Sized>(
    store: &S,
    resp: LoginResponse,
    fallback_username: &str,
) -> Session {
    let role = resp
        .role
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| ROLE_USER.to_string());
    let username = resp
        .username
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| fallback_username.to_string());

    store.set(TOKEN_KEY, &resp.token);
    store.set(ROLE_KEY, &role);
    store.set(USERNAME_KEY, &username);
    match &resp.email {
        Some(email) => store.set(EMAIL_KEY, email),
        None => store.delete(EMAIL_KEY),
    };

    Session {
        token: resp.token,
        user: UserProfile {
            username: Some(username),
            email: resp.email,
            role,
        },
    }
}

/// 演示账号登录
pub async fn demo_login<C, S>(
    api: &CourseApi<C>,
    store: &S,
    account_type: AccountType,
) -> ClientResult<Session>
where
    C: HttpClient,
    S: PreferenceStore + ?Sized,
{
    let resp = api.demo_login(account_type).await?;
    log_info!("[Auth] Demo login succeeded for {}", account_type.as_str());
    Ok(persist_login(store, resp, account_type.as_str()))
}

/// 用户名密码登录
pub async fn login<C, S>(
    api: &CourseApi<C>,
    store: &S,
    username: String,
    password: String,
) -> ClientResult<Session>
where
    C: HttpClient,
    S: PreferenceStore + ?Sized,
{
    let fallback = username.clone();
    let resp = api.login(username, password).await?;
    Ok(persist_login(store, resp, &fallback))
}

/// 注销：清除存储中的会话键
pub fn logout<S: PreferenceStore + ?Sized>(store: &S) {
    for key in [TOKEN_KEY, ROLE_KEY, USERNAME_KEY, EMAIL_KEY] {
        store.delete(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use crate::request::tests::MockHttpClient;
    use std::rc::Rc;

    fn api(mock: &Rc<MockHttpClient>) -> CourseApi<Rc<MockHttpClient>> {
        CourseApi::new(mock.clone(), "http://api.test/api/v1")
    }

    #[test]
    fn restore_without_token_is_anonymous() {
        let mock = Rc::new(MockHttpClient::new());
        let state = AuthState::restore(api(&mock), &MemoryStore::new());

        assert!(!state.loading);
        assert!(!state.is_authenticated());
        assert!(!state.is_admin());
        assert_eq!(state.user(), None);
    }

    #[test]
    fn restore_defaults_role_to_user() {
        let mock = Rc::new(MockHttpClient::new());
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc"), (USERNAME_KEY, "demo")]);
        let state = AuthState::restore(api(&mock), &store);

        assert!(state.is_authenticated());
        assert!(!state.is_admin());
        assert_eq!(state.user().unwrap().role, "USER");
        assert_eq!(state.api.token(), Some("abc"));
    }

    #[test]
    fn initial_state_is_loading() {
        let mock = Rc::new(MockHttpClient::new());
        assert!(AuthState::new(api(&mock)).loading);
    }

    #[tokio::test]
    async fn demo_admin_login_persists_role_and_attaches_bearer() {
        let mock = Rc::new(MockHttpClient::new());
        mock.respond(200, r#"{"token":"jwt-1","role":"ADMIN","username":"admin"}"#)
            .respond(200, "[]");
        let store = MemoryStore::new();
        let state = AuthState::restore(api(&mock), &store);

        let session = demo_login(&state.api, &store, AccountType::Admin)
            .await
            .unwrap();
        let state = state.signed_in(session);

        assert_eq!(store.get(ROLE_KEY).as_deref(), Some("ADMIN"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("jwt-1"));
        assert!(state.is_admin());

        state.api.list_courses().await.unwrap();
        assert_eq!(
            mock.last_request().header("Authorization"),
            Some("Bearer jwt-1")
        );
    }

    #[tokio::test]
    async fn missing_role_and_username_fall_back() {
        let mock = Rc::new(MockHttpClient::new());
        mock.respond(200, r#"{"token":"jwt-2"}"#);
        let store = MemoryStore::new();

        let session = demo_login(&api(&mock), &store, AccountType::User)
            .await
            .unwrap();

        assert_eq!(session.user.role, "USER");
        assert_eq!(session.user.username.as_deref(), Some("user"));
        assert_eq!(store.get(USERNAME_KEY).as_deref(), Some("user"));
    }

    #[tokio::test]
    async fn failed_login_leaves_store_untouched() {
        let mock = Rc::new(MockHttpClient::new());
        mock.respond(401, r#"{"message":"Bad credentials"}"#);
        let store = MemoryStore::new();

        let err = login(&api(&mock), &store, "ann".into(), "wrong".into())
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(store.is_empty());
    }

    #[test]
    fn logout_clears_session_keys_only() {
        let store = MemoryStore::with_entries([
            (TOKEN_KEY, "abc"),
            (ROLE_KEY, "ADMIN"),
            (USERNAME_KEY, "admin"),
            (crate::prefs::THEME_KEY, "dark"),
        ]);
        logout(&store);

        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(ROLE_KEY), None);
        assert_eq!(store.get(crate::prefs::THEME_KEY).as_deref(), Some("dark"));

        let mock = Rc::new(MockHttpClient::new());
        let state = AuthState::restore(api(&mock), &store);
        let state = state.signed_out();
        assert!(!state.is_authenticated());
        assert_eq!(state.api.token(), None);
    }
}
