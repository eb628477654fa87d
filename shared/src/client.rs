use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::protocol::{ApiRequest, HttpMethod};
use crate::HEADER_AUTHORIZATION;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// multipart 中的文件部分
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// 请求体
///
/// `Multipart` 不设置 Content-Type，由传输层生成带 boundary 的头。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    Form(Vec<(String, String)>),
    Multipart(Vec<(String, FormValue)>),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> ApiResult<Self> {
        Ok(RequestBody::Json(serde_json::to_string(value)?))
    }

    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Form(_) => Some("application/x-www-form-urlencoded"),
            RequestBody::Empty | RequestBody::Multipart(_) => None,
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        if let Some(content_type) = body.content_type() {
            self = self.with_header("Content-Type", content_type);
        }
        self.body = body;
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层错误（请求未得到任何 HTTP 响应）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP 传输特性 (Trait)
///
/// 浏览器里由 `fetch` 实现；测试中使用内存 Mock。
/// (?Send) 是因为 wasm 环境下 JS 对象不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 响应归一化
// =========================================================

/// 成功响应体：空体、JSON、或无法解析为 JSON 的原始文本
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        if text.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text.into_owned()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }

    /// 空体视为 JSON `null`，文本视为 JSON 字符串
    pub fn into_value(self) -> Value {
        match self {
            ResponseBody::Empty => Value::Null,
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
        }
    }

    pub fn decode<T: DeserializeOwned>(self) -> ApiResult<T> {
        Ok(serde_json::from_value(self.into_value())?)
    }
}

/// 从失败响应中提取错误消息
///
/// 优先取 JSON 的 `detail` 字段，其次整段 JSON，然后原始文本，最后 `HTTP <status>`。
pub fn error_message(status: u16, body: &[u8]) -> String {
    match ResponseBody::from_bytes(body) {
        ResponseBody::Json(value) => match value.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(Value::String(_)) => value.to_string(),
            Some(detail) if !detail.is_null() => detail.to_string(),
            _ if value.is_null() => format!("HTTP {status}"),
            _ => value.to_string(),
        },
        ResponseBody::Text(text) => text,
        ResponseBody::Empty => format!("HTTP {status}"),
    }
}

/// 二进制下载结果
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

// =========================================================
// API 客户端
// =========================================================

/// 后端 API 客户端
///
/// 持有基础 URL 与（可选的）访问令牌。令牌存在时每个请求都附带
/// `Authorization: Bearer <token>`，公共端点使用不带令牌的实例。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient<T> {
    base_url: String,
    token: Option<String>,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
            transport,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 去掉令牌的副本，用于公共端点
    pub fn anonymous(&self) -> Self
    where
        T: Clone,
    {
        Self {
            base_url: self.base_url.clone(),
            token: None,
            transport: self.transport.clone(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送请求并把非 2xx 响应转换为错误
    async fn dispatch(
        &self,
        path: &str,
        method: HttpMethod,
        body: RequestBody,
    ) -> ApiResult<HttpResponse> {
        let mut req = HttpRequest::new(&self.url(path), method).with_body(body);
        if let Some(token) = &self.token {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        let res = self.transport.send(req).await.map_err(|e| {
            log::error!("network error: {} {} ({})", method, path, e);
            ApiError::Network(e.0)
        })?;

        if !res.ok() {
            let message = error_message(res.status, &res.body);
            log::warn!("api error: {} {} -> {} {}", method, path, res.status, message);
            return Err(ApiError::from_status(res.status, message));
        }

        Ok(res)
    }

    /// 通用请求：返回归一化后的响应体
    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: RequestBody,
    ) -> ApiResult<ResponseBody> {
        let res = self.dispatch(path, method, body).await?;
        Ok(ResponseBody::from_bytes(&res.body))
    }

    #[cfg(test)]
    pub async fn get(&self, path: &str) -> ApiResult<ResponseBody> {
        self.request(path, HttpMethod::Get, RequestBody::Empty).await
    }

    /// 类型化请求
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let body = req.body()?;
        self.request(&path, R::METHOD, body).await?.decode()
    }

    /// 以二进制形式获取资源（图片预览、文件下载）
    pub async fn fetch_binary(&self, path: &str) -> ApiResult<Binary> {
        let res = self
            .dispatch(path, HttpMethod::Get, RequestBody::Empty)
            .await?;
        Ok(Binary {
            content_type: res.content_type,
            bytes: res.body,
        })
    }
}

// =========================================================
// 测试用 Mock 传输层
// =========================================================

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    pub const BASE_URL: &str = "http://api.test";

    #[derive(Default)]
    struct MockState {
        routes: RefCell<HashMap<(HttpMethod, String), Result<HttpResponse, TransportError>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    /// 按 (方法, 路径) 返回预设响应，并记录所有请求
    #[derive(Clone, Default)]
    pub struct MockTransport {
        state: Rc<MockState>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, method: HttpMethod, path: &str, res: HttpResponse) -> Self {
            self.state
                .routes
                .borrow_mut()
                .insert((method, path.to_string()), Ok(res));
            self
        }

        pub fn json(self, method: HttpMethod, path: &str, status: u16, body: Value) -> Self {
            self.respond(method, path, HttpResponse::new(status, body.to_string()))
        }

        pub fn fail(self, method: HttpMethod, path: &str, reason: &str) -> Self {
            self.state.routes.borrow_mut().insert(
                (method, path.to_string()),
                Err(TransportError(reason.to_string())),
            );
            self
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.state.requests.borrow().clone()
        }

        pub fn paths(&self) -> Vec<String> {
            self.requests()
                .iter()
                .map(|r| format!("{} {}", r.method, r.url.trim_start_matches(BASE_URL)))
                .collect()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
            let path = req.url.trim_start_matches(BASE_URL).to_string();
            let key = (req.method, path);
            self.state.requests.borrow_mut().push(req);
            self.state
                .routes
                .borrow()
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Ok(HttpResponse::new(404, r#"{"detail":"Not Found"}"#)))
        }
    }

    pub fn client(transport: MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(BASE_URL, transport).with_token("tok-123")
    }
}

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn attaches_bearer_token_and_json_content_type() {
        let transport = MockTransport::new().json(HttpMethod::Post, "/processes", 200, json!({}));
        let api = client(transport.clone());

        let body = RequestBody::json(&json!({"location": "2층", "work_name": "타설"})).unwrap();
        api.request("/processes", HttpMethod::Post, body).await.unwrap();

        let req = &transport.requests()[0];
        assert_eq!(req.url, "http://api.test/processes");
        assert_eq!(req.header("authorization"), Some("Bearer tok-123"));
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn multipart_leaves_content_type_to_transport() {
        let transport = MockTransport::new().json(HttpMethod::Post, "/issues", 200, json!({"id": 1}));
        let api = client(transport.clone());

        let body = RequestBody::Multipart(vec![(
            "title".into(),
            FormValue::Text("균열".into()),
        )]);
        api.request("/issues", HttpMethod::Post, body).await.unwrap();

        let req = &transport.requests()[0];
        assert_eq!(req.header("content-type"), None);
        assert_eq!(req.header("authorization"), Some("Bearer tok-123"));
    }

    #[tokio::test]
    async fn anonymous_client_sends_no_authorization() {
        let transport = MockTransport::new().json(HttpMethod::Get, "/public/sites", 200, json!([]));
        let api = client(transport.clone()).anonymous();

        api.get("/public/sites").await.unwrap();
        assert_eq!(transport.requests()[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn empty_success_body_yields_empty_not_error() {
        let transport =
            MockTransport::new().respond(HttpMethod::Delete, "/manager/notices/3", HttpResponse::new(204, ""));
        let api = client(transport);

        let body = api
            .request("/manager/notices/3", HttpMethod::Delete, RequestBody::Empty)
            .await
            .unwrap();
        assert_eq!(body, ResponseBody::Empty);

        let decoded: Option<Vec<i32>> = body.decode().unwrap();
        assert_eq!(decoded, None);
    }

    #[tokio::test]
    async fn non_json_success_body_is_returned_as_text() {
        let transport =
            MockTransport::new().respond(HttpMethod::Get, "/health", HttpResponse::new(200, "pong"));
        let api = client(transport);

        let body = api.get("/health").await.unwrap();
        assert_eq!(body, ResponseBody::Text("pong".into()));
    }

    #[tokio::test]
    async fn error_uses_detail_then_text_then_status() {
        let transport = MockTransport::new()
            .json(HttpMethod::Get, "/a", 400, json!({"detail": "이미 출근했습니다"}))
            .respond(HttpMethod::Get, "/b", HttpResponse::new(500, "Internal Server Error"))
            .respond(HttpMethod::Get, "/c", HttpResponse::new(502, ""))
            .json(HttpMethod::Get, "/d", 422, json!({"errors": ["bad"]}));
        let api = client(transport);

        assert_eq!(
            api.get("/a").await.unwrap_err(),
            ApiError::Status {
                status: 400,
                message: "이미 출근했습니다".into()
            }
        );
        assert_eq!(api.get("/b").await.unwrap_err().to_string(), "Internal Server Error");
        assert_eq!(api.get("/c").await.unwrap_err().to_string(), "HTTP 502");
        assert_eq!(api.get("/d").await.unwrap_err().to_string(), r#"{"errors":["bad"]}"#);
    }

    #[test]
    fn empty_detail_falls_back_to_whole_body() {
        let body = json!({"detail": ""}).to_string();
        assert_eq!(error_message(400, body.as_bytes()), r#"{"detail":""}"#);
    }

    #[test]
    fn structured_detail_lists_are_rendered_as_json() {
        let body = json!({"detail": [{"loc": ["body", "title"], "msg": "field required"}]}).to_string();
        let message = error_message(422, body.as_bytes());
        assert!(message.starts_with('['));
        assert!(message.contains("field required"));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() {
        let transport = MockTransport::new().fail(HttpMethod::Get, "/me", "dns failure");
        let api = client(transport);

        let err = api.get("/me").await.unwrap_err();
        assert_eq!(err, ApiError::Network("dns failure".into()));
    }

    #[tokio::test]
    async fn fetch_binary_keeps_bytes_and_content_type() {
        let mut res = HttpResponse::new(200, vec![0x89, 0x50, 0x4e, 0x47]);
        res.content_type = Some("image/png".into());
        let transport = MockTransport::new().respond(HttpMethod::Get, "/drawings/1/file", res);
        let api = client(transport);

        let binary = api.fetch_binary("/drawings/1/file").await.unwrap();
        assert_eq!(binary.content_type.as_deref(), Some("image/png"));
        assert_eq!(binary.bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::new("https://example.com/", MockTransport::new());
        assert_eq!(api.url("/me"), "https://example.com/me");
        assert_eq!(api.url("me"), "https://example.com/me");
    }
}
