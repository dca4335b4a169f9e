//! 远程资源客户端
//!
//! 基于 `HttpClient` 抽象和 `coursedesk_shared::protocol` 中的接口表构造请求。
//! 集合类接口会对响应做归一化：形状不对的响应视为空集合并记录日志，而不是报错。

use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use coursedesk_shared::protocol::{
    ApiRequest, CourseLessonsRequest, DeleteCourseRequest, DemoLoginRequest, GetCourseRequest,
    ListCoursesRequest, ListLessonsRequest, LoginRequest, UpdateCourseRequest,
};
use coursedesk_shared::{
    AccountType, Course, CourseDraft, HEADER_AUTHORIZATION, Lesson, LoginResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct CourseApi<C> {
    client: C,
    base_url: String,
    token: Option<String>,
}

impl<C: HttpClient> CourseApi<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// 附带 Bearer 凭据，之后的所有请求都会携带
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 去掉凭据 (注销)
    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn build<R: ApiRequest>(&self, req: &R) -> ClientResult<HttpRequest> {
        let mut http = HttpRequest::new(&self.url(&req.path()), R::METHOD)
            .with_header("Accept", "application/json");

        if let Some(token) = &self.token {
            http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        if R::METHOD.has_body() {
            let body =
                serde_json::to_string(req).map_err(|e| ClientError::encode(e.to_string()))?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        Ok(http)
    }

    /// 发送请求并校验状态码
    async fn dispatch<R: ApiRequest>(&self, req: &R) -> ClientResult<HttpResponse> {
        let http = self.build(req)?;
        let operation = format!("{} {}", R::METHOD.as_str(), req.path());
        let resp = self.client.send(http).await?;

        if !resp.ok() {
            return Err(ClientError::status(
                resp.status,
                format!("{} failed: {}", operation, error_message(&resp.body)),
            ));
        }

        Ok(resp)
    }

    async fn call<R: ApiRequest>(&self, req: &R) -> ClientResult<R::Response> {
        self.dispatch(req).await?.json::<R::Response>()
    }

    /// 获取集合并归一化
    async fn collection<R, T>(&self, req: &R, wrapper_key: &str) -> ClientResult<Vec<T>>
    where
        R: ApiRequest<Response = Vec<T>>,
        T: DeserializeOwned,
    {
        let resp = self.dispatch(req).await?;
        match normalize_collection::<T>(&resp.body, wrapper_key) {
            Ok(items) => Ok(items),
            Err(reason) => {
                log_error!("[Api] {} {}: {}", R::METHOD.as_str(), req.path(), reason);
                Ok(Vec::new())
            }
        }
    }

    // -----------------------------------------------------
    // Courses
    // -----------------------------------------------------

    /// 获取课程列表
    pub async fn list_courses(&self) -> ClientResult<Vec<Course>> {
        self.collection(&ListCoursesRequest, "courses").await
    }

    pub async fn get_course(&self, course_id: i64) -> ClientResult<Course> {
        self.call(&GetCourseRequest { course_id }).await
    }

    pub async fn create_course(&self, draft: CourseDraft) -> ClientResult<Course> {
        self.call(&draft).await
    }

    pub async fn update_course(&self, course_id: i64, draft: CourseDraft) -> ClientResult<Course> {
        self.call(&UpdateCourseRequest { course_id, draft }).await
    }

    /// 删除课程，响应体被忽略
    pub async fn delete_course(&self, course_id: i64) -> ClientResult<()> {
        self.dispatch(&DeleteCourseRequest { course_id }).await?;
        Ok(())
    }

    // -----------------------------------------------------
    // Lessons
    // -----------------------------------------------------

    pub async fn list_lessons(&self) -> ClientResult<Vec<Lesson>> {
        self.collection(&ListLessonsRequest, "lessons").await
    }

    /// 获取某门课程下的课时
    pub async fn course_lessons(&self, course_id: i64) -> ClientResult<Vec<Lesson>> {
        self.collection(&CourseLessonsRequest { course_id }, "lessons")
            .await
    }

    // -----------------------------------------------------
    // Auth
    // -----------------------------------------------------

    pub async fn demo_login(&self, account_type: AccountType) -> ClientResult<LoginResponse> {
        self.call(&DemoLoginRequest { account_type }).await
    }

    pub async fn login(&self, username: String, password: String) -> ClientResult<LoginResponse> {
        self.call(&LoginRequest { username, password }).await
    }
}

/// 集合响应归一化
///
/// 接受：JSON 数组；字符串里再编码一层的数组；`{ "<key>": [...] }` 包装。
/// 空响应体和 `null` 视为空集合。其余形状返回原因，由调用方记录。
/// 无法解码的元素被跳过并记录日志，其余元素照常返回。
pub fn normalize_collection<T: DeserializeOwned>(
    body: &str,
    wrapper_key: &str,
) -> Result<Vec<T>, String> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut value: Value =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;

    if let Value::String(inner) = &value {
        value = serde_json::from_str(inner)
            .map_err(|e| format!("failed to parse string payload: {}", e))?;
    }

    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(wrapper_key) {
            Some(Value::Array(items)) => items,
            _ => return Err(format!("expected array but got object without '{}'", wrapper_key)),
        },
        other => return Err(format!("expected array but got {}", json_kind(&other))),
    };

    // 单个元素解码失败只跳过该元素
    let items = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log_error!("[Api] Skipping malformed element #{}: {}", index, e);
                None
            }
        })
        .collect();

    Ok(items)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 后端错误体通常是 `{"message": "..."}`，否则原样返回
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests;
