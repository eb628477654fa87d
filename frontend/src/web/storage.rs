//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`。本应用只持久化访问令牌。

use sitelink_shared::STORAGE_TOKEN_KEY;

pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 键不存在或发生错误时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    pub fn token() -> Option<String> {
        Self::get(STORAGE_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn save_token(token: &str) {
        if !Self::set(STORAGE_TOKEN_KEY, token) {
            log::warn!("failed to persist access token");
        }
    }

    pub fn clear_token() {
        Self::delete(STORAGE_TOKEN_KEY);
    }
}
