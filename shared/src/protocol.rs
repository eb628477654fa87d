use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::RequestBody;
use crate::error::ApiResult;
use crate::{AttendanceRecord, Drawing, EmergencyAlert, Issue, Notice, ProcessItem, Role, Site, UserProfile};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path; may embed identifiers.
    fn path(&self) -> Cow<'static, str>;
    /// The request body. Requests without a payload send none.
    fn body(&self) -> ApiResult<RequestBody> {
        Ok(RequestBody::Empty)
    }
}

/// Declares a unit request with a fixed path.
macro_rules! fixed_request {
    ($(#[$meta:meta])* $name:ident, $method:ident, $path:literal, $response:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl ApiRequest for $name {
            type Response = $response;
            const METHOD: HttpMethod = HttpMethod::$method;
            fn path(&self) -> Cow<'static, str> {
                Cow::Borrowed($path)
            }
        }
    };
}

/// Declares a JSON-body request whose struct is the payload itself.
macro_rules! json_request {
    ($name:ident, $method:ident, $path:literal, $response:ty) => {
        impl ApiRequest for $name {
            type Response = $response;
            const METHOD: HttpMethod = HttpMethod::$method;
            fn path(&self) -> Cow<'static, str> {
                Cow::Borrowed($path)
            }
            fn body(&self) -> ApiResult<RequestBody> {
                RequestBody::json(self)
            }
        }
    };
}

// =========================================================
// Public / Auth
// =========================================================

fixed_request!(
    /// Sites offered on the signup form (no token).
    ListSitesRequest, Get, "/public/sites", Vec<Site>
);

/// `/signup` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub birth_date: String,
    pub gender: String,
    pub trade_type: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
    pub site_id: Option<i64>,
    pub site_name: Option<String>,
    pub site_location: Option<String>,
}

json_request!(SignupRequest, Post, "/signup", Value);

fixed_request!(GetMeRequest, Get, "/me", UserProfile);

/// `PUT /me`: absent fields mean "no change"
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

json_request!(UpdateProfileRequest, Put, "/me", UserProfile);

// =========================================================
// Attendance
// =========================================================

fixed_request!(MyAttendanceRequest, Get, "/attendance/me", Vec<AttendanceRecord>);
fixed_request!(CheckInRequest, Post, "/attendance/check-in", Value);
fixed_request!(CheckOutRequest, Post, "/attendance/check-out", Value);
fixed_request!(
    /// Today's site-wide records (manager)
    TodayAttendanceRequest, Get, "/manager/attendance/today", Vec<AttendanceRecord>
);

pub const ATTENDANCE_CSV_PATH: &str = "/manager/attendance/export-csv";
pub const ATTENDANCE_CSV_FILE_NAME: &str = "attendance.csv";

// =========================================================
// Notices
// =========================================================

fixed_request!(ListNoticesRequest, Get, "/notices", Vec<Notice>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNoticeRequest {
    pub title: String,
    pub content: String,
}

json_request!(CreateNoticeRequest, Post, "/manager/notices", Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteNoticeRequest {
    pub id: i64,
}

impl ApiRequest for DeleteNoticeRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/manager/notices/{}", self.id))
    }
}

// =========================================================
// Emergency alerts
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAlertRequest {
    pub message: String,
    pub location_text: String,
}

json_request!(CreateAlertRequest, Post, "/alerts/emergency", Value);

fixed_request!(MyAlertsRequest, Get, "/alerts/emergency/me", Vec<EmergencyAlert>);
fixed_request!(SiteAlertsRequest, Get, "/manager/alerts/emergency", Vec<EmergencyAlert>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveAlertRequest {
    pub id: i64,
}

impl ApiRequest for ResolveAlertRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/manager/alerts/emergency/{}/resolve", self.id))
    }
}

// =========================================================
// Issues
// =========================================================

// 列表可能以空响应体返回，因此解码为 Option
fixed_request!(MyIssuesRequest, Get, "/issues/me", Option<Vec<Issue>>);
fixed_request!(SiteIssuesRequest, Get, "/manager/issues", Option<Vec<Issue>>);

pub const ISSUES_PATH: &str = "/issues";

// =========================================================
// Drawings
// =========================================================

fixed_request!(ListDrawingsRequest, Get, "/drawings", Vec<Drawing>);

pub const DRAWING_UPLOAD_PATH: &str = "/manager/drawings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteDrawingRequest {
    pub id: i64,
}

impl ApiRequest for DeleteDrawingRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/manager/drawings/{}", self.id))
    }
}

// =========================================================
// Processes
// =========================================================

fixed_request!(ListProcessesRequest, Get, "/processes", Vec<ProcessItem>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProcessRequest {
    pub location: String,
    pub work_name: String,
}

json_request!(CreateProcessRequest, Post, "/processes", Value);

// =========================================================
// Users (manager)
// =========================================================

fixed_request!(ListUsersRequest, Get, "/manager/users", Vec<UserProfile>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindUserRequest {
    pub username: String,
}

impl ApiRequest for FindUserRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/manager/users/{}", self.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_paths_embed_identifiers() {
        assert_eq!(DeleteNoticeRequest { id: 4 }.path(), "/manager/notices/4");
        assert_eq!(
            ResolveAlertRequest { id: 9 }.path(),
            "/manager/alerts/emergency/9/resolve"
        );
        assert_eq!(DeleteDrawingRequest { id: 2 }.path(), "/manager/drawings/2");
        assert_eq!(
            FindUserRequest {
                username: "lee".into()
            }
            .path(),
            "/manager/users/lee"
        );
    }

    #[test]
    fn empty_profile_update_serializes_to_empty_object() {
        let req = UpdateProfileRequest::default();
        assert!(req.is_empty());
        assert_eq!(req.body().unwrap(), RequestBody::Json("{}".into()));

        let req = UpdateProfileRequest {
            phone: Some("010-1234-5678".into()),
            ..Default::default()
        };
        assert_eq!(
            req.body().unwrap(),
            RequestBody::Json(r#"{"phone":"010-1234-5678"}"#.into())
        );
    }
}
