//! SiteLink 客户端核心
//!
//! 与目标平台无关的部分都放在这里，方便在宿主机上直接测试：
//! - `client`: HTTP 封装（`Transport` 抽象 + `ApiClient`）
//! - `api`: 面向各个后端端点的类型化调用
//! - `session` / `auth`: 会话状态、权限与登录注册流程
//! - `route` / `loaders`: 视图定义与视图数据加载
//! - `dashboard` / `forms` / `date`: 纯计算逻辑

use serde::{Deserialize, Serialize};

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod date;
pub mod error;
pub mod forms;
pub mod loaders;
pub mod protocol;
pub mod route;
pub mod session;

pub use client::{ApiClient, Transport};
pub use error::{ApiError, ApiResult};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存访问令牌的键
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

pub const STATUS_PRESENT: &str = "정상 출근";
pub const STATUS_LATE: &str = "지각";
pub const STATUS_EARLY_LEAVE: &str = "조퇴";
pub const STATUS_ABSENT: &str = "미출근";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Worker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Worker => "worker",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 当前登录用户的资料（`/me`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub site_id: Option<i64>,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// 头像上显示的首字
    pub fn initial(&self) -> String {
        self.full_name
            .chars()
            .next()
            .or_else(|| self.username.chars().next())
            .map(String::from)
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl Site {
    pub fn label(&self) -> String {
        let location = self
            .location
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or("위치 없음");
        format!("{} ({})", self.name, location)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub date: String,
    #[serde(default)]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub check_out_time: Option<String>,
    #[serde(default)]
    pub check_in_status: Option<String>,
    #[serde(default)]
    pub check_out_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub writer_full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub id: i64,
    pub message: String,
    #[serde(default)]
    pub location_text: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl Drawing {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image"))
    }

    pub fn file_path(&self) -> String {
        format!("/drawings/{}/file", self.id)
    }

    pub fn download_name(&self) -> &str {
        if self.title.is_empty() {
            "drawing"
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub work_name: String,
    #[serde(default)]
    pub status: String,
}

/// `/login` 的成功响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}
