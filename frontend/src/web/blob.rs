//! Blob / Object URL 工具
//!
//! 带令牌获取的二进制内容不能直接作为 `<img src>`，
//! 需要转为本地 Object URL；下载则通过临时 `<a download>` 触发。

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAnchorElement, Url};

use sitelink_shared::client::{Binary, FilePart};
use sitelink_shared::{ApiError, ApiResult};

use super::http::bytes_to_blob;

fn browser_err(context: &str, e: JsValue) -> ApiError {
    ApiError::Browser(format!("{}: {:?}", context, e))
}

/// 为二进制内容创建 Object URL，调用方负责 [`revoke`]
pub fn object_url(binary: &Binary) -> ApiResult<String> {
    let blob = bytes_to_blob(&binary.bytes, binary.content_type.as_deref())
        .map_err(|e| browser_err("创建 Blob 失败", e))?;
    Url::create_object_url_with_blob(&blob).map_err(|e| browser_err("创建 Object URL 失败", e))
}

pub fn revoke(url: &str) {
    if let Err(e) = Url::revoke_object_url(url) {
        log::debug!("revoke object url failed: {:?}", e);
    }
}

/// 把内容保存为本地文件
pub fn save(binary: &Binary, file_name: &str) -> ApiResult<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::Browser("document 不可用".into()))?;
    let body = document
        .body()
        .ok_or_else(|| ApiError::Browser("body 不可用".into()))?;

    let url = object_url(binary)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| browser_err("创建链接失败", e))?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);

    let appended = body.append_child(&anchor);
    if appended.is_ok() {
        anchor.click();
        anchor.remove();
    }
    revoke(&url);
    appended.map(|_| ()).map_err(|e| browser_err("触发下载失败", e))
}

/// 读取 `<input type="file">` 中选中的文件
pub async fn read_file(file: &web_sys::File) -> ApiResult<FilePart> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| browser_err("读取文件失败", e))?;
    let content_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(FilePart {
        file_name: file.name(),
        content_type,
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}
