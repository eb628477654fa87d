//! 运行时配置
//!
//! 后端地址按以下顺序解析：页面根元素的 `data-api-url` 属性、
//! 编译期环境变量 `SITELINK_API_URL`、内置默认值。

pub const DEFAULT_API_BASE_URL: &str = "https://smart-construction-backend-2.onrender.com";
pub const DEFAULT_SKELETON_DELAY_MS: u32 = 400;
pub const DEFAULT_TOAST_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// 视图切换时骨架屏的最短展示时间
    pub skeleton_delay_ms: u32,
    pub toast_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            skeleton_delay_ms: DEFAULT_SKELETON_DELAY_MS,
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl AppConfig {
    /// 从候选来源解析配置，空白值会被跳过
    pub fn resolve(document_attr: Option<&str>, build_env: Option<&str>) -> Self {
        let api_base_url = [document_attr, build_env]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            ..Self::default()
        }
    }

    /// 使用编译期环境变量作为第二来源
    pub fn from_document_attr(document_attr: Option<&str>) -> Self {
        Self::resolve(document_attr, option_env!("SITELINK_API_URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_attribute_wins_over_build_env() {
        let config = AppConfig::resolve(Some("https://site.example/"), Some("https://env.example"));
        assert_eq!(config.api_base_url, "https://site.example");
        assert_eq!(config.skeleton_delay_ms, DEFAULT_SKELETON_DELAY_MS);
    }

    #[test]
    fn blank_sources_fall_through_to_default() {
        let config = AppConfig::resolve(Some("  "), None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        let config = AppConfig::resolve(None, Some("http://localhost:8000"));
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }
}
