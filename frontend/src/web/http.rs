//! HTTP 传输层
//!
//! 用 `web_sys::fetch` 实现共享库的 [`Transport`]，替代 `gloo-net`。

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response, UrlSearchParams};

use sitelink_shared::client::{
    FilePart, FormValue, HttpRequest, HttpResponse, RequestBody, Transport, TransportError,
};

fn js_err(context: &str, e: JsValue) -> TransportError {
    TransportError(format!("{}: {:?}", context, e))
}

/// 用字节构造带类型的 Blob
pub(crate) fn bytes_to_blob(bytes: &[u8], content_type: Option<&str>) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let bag = BlobPropertyBag::new();
    if let Some(content_type) = content_type {
        bag.set_type(content_type);
    }
    Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
}

fn multipart(fields: &[(String, FormValue)]) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for (name, value) in fields {
        match value {
            FormValue::Text(text) => form.append_with_str(name, text)?,
            FormValue::File(FilePart {
                file_name,
                content_type,
                bytes,
            }) => {
                let blob = bytes_to_blob(bytes, Some(content_type))?;
                form.append_with_blob_and_filename(name, &blob, file_name)?;
            }
        }
    }
    Ok(form)
}

fn url_encoded(pairs: &[(String, String)]) -> Result<UrlSearchParams, JsValue> {
    let params = UrlSearchParams::new()?;
    for (key, value) in pairs {
        params.append(key, value);
    }
    Ok(params)
}

/// 基于浏览器 fetch 的传输层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let headers = Headers::new().map_err(|e| js_err("创建 Headers 失败", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| js_err("设置 Header 失败", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
            RequestBody::Form(pairs) => {
                let params = url_encoded(pairs).map_err(|e| js_err("构建表单失败", e))?;
                opts.set_body(&params.into());
            }
            // 不设置 Content-Type，由浏览器生成 boundary
            RequestBody::Multipart(fields) => {
                let form = multipart(fields).map_err(|e| js_err("构建 FormData 失败", e))?;
                opts.set_body(&form.into());
            }
        }

        let request =
            Request::new_with_str_and_init(&req.url, &opts).map_err(|e| js_err("构建请求失败", e))?;

        let window =
            web_sys::window().ok_or_else(|| TransportError("无法获取 window 对象".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_err("网络错误", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| js_err("Response 类型转换失败", e))?;

        let content_type = response.headers().get("content-type").ok().flatten();
        let buffer = response
            .array_buffer()
            .map_err(|e| js_err("读取响应失败", e))?;
        let buffer = JsFuture::from(buffer)
            .await
            .map_err(|e| js_err("读取响应失败", e))?;

        Ok(HttpResponse {
            status: response.status(),
            content_type,
            body: Uint8Array::new(&buffer).to_vec(),
        })
    }
}
