//! 零散的 DOM 操作

/// 浏览器确认框；无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 整页刷新
pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("page reload failed: {:?}", e);
        }
    }
}

/// 页面根元素上的 `data-api-url`
pub fn document_api_url() -> Option<String> {
    web_sys::window()?
        .document()?
        .document_element()?
        .get_attribute("data-api-url")
}

/// 平滑滚动到指定 id 的元素并居中
pub fn scroll_into_center(id: &str) {
    let Some(element) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
