//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient` 抽象。

use async_trait::async_trait;
use coursedesk::{ClientError, ClientResult, HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
///
/// 无状态，可以随意复制并放入信号中。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchClient;

fn js_error(context: &str, e: JsValue) -> ClientError {
    ClientError::transport(format!("{}: {:?}", context, e))
}

impl FetchClient {
    fn build(req: &HttpRequest) -> ClientResult<Request> {
        let headers = Headers::new().map_err(|e| js_error("创建 Headers 失败", e))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_error("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts).map_err(|e| js_error("构建请求失败", e))
    }

    async fn text(response: &Response) -> ClientResult<String> {
        let promise = response
            .text()
            .map_err(|e| ClientError::decode(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ClientError::decode(format!("{:?}", e)))?;

        // 空响应体 (例如 DELETE) 视为空字符串
        Ok(text.as_string().unwrap_or_default())
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let request = Self::build(&req)?;

        let window = web_sys::window()
            .ok_or_else(|| ClientError::transport("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_error("网络错误", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_error("Response 类型转换失败", e))?;

        let status = response.status();
        let body = Self::text(&response).await?;

        Ok(HttpResponse { status, body })
    }
}
