//! 各端点的类型化调用

use crate::client::{ApiClient, Binary, FilePart, RequestBody, Transport};
use crate::error::{ApiError, ApiResult};
use crate::forms::{Credentials, drawing_upload};
use crate::protocol::*;
use crate::{
    AttendanceRecord, Drawing, EmergencyAlert, Issue, Notice, ProcessItem, Site, TokenResponse,
    UserProfile,
};

impl<T: Transport> ApiClient<T> {
    // --- 公共 / 认证 ---

    pub async fn list_sites(&self) -> ApiResult<Vec<Site>> {
        self.call(&ListSitesRequest).await
    }

    /// 以 form 编码提交用户名与密码
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<TokenResponse> {
        let token: TokenResponse = self
            .request("/login", HttpMethod::Post, credentials.to_form())
            .await?
            .decode()?;
        if token.access_token.is_empty() {
            return Err(ApiError::Decode("access_token is empty".into()));
        }
        Ok(token)
    }

    pub async fn signup(&self, req: &SignupRequest) -> ApiResult<()> {
        self.call(req).await.map(|_| ())
    }

    pub async fn me(&self) -> ApiResult<UserProfile> {
        self.call(&GetMeRequest).await
    }

    pub async fn update_me(&self, req: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        self.call(req).await
    }

    // --- 出勤 ---

    pub async fn my_attendance(&self) -> ApiResult<Vec<AttendanceRecord>> {
        self.call(&MyAttendanceRequest).await
    }

    pub async fn today_attendance(&self) -> ApiResult<Vec<AttendanceRecord>> {
        self.call(&TodayAttendanceRequest).await
    }

    pub async fn check_in(&self) -> ApiResult<()> {
        self.call(&CheckInRequest).await.map(|_| ())
    }

    pub async fn check_out(&self) -> ApiResult<()> {
        self.call(&CheckOutRequest).await.map(|_| ())
    }

    pub async fn export_attendance_csv(&self) -> ApiResult<Binary> {
        self.fetch_binary(ATTENDANCE_CSV_PATH).await
    }

    // --- 公告 ---

    pub async fn notices(&self) -> ApiResult<Vec<Notice>> {
        self.call(&ListNoticesRequest).await
    }

    pub async fn create_notice(&self, req: &CreateNoticeRequest) -> ApiResult<()> {
        self.call(req).await.map(|_| ())
    }

    pub async fn delete_notice(&self, id: i64) -> ApiResult<()> {
        self.call(&DeleteNoticeRequest { id }).await.map(|_| ())
    }

    // --- 紧急警报 ---

    pub async fn my_alerts(&self) -> ApiResult<Vec<EmergencyAlert>> {
        self.call(&MyAlertsRequest).await
    }

    pub async fn site_alerts(&self) -> ApiResult<Vec<EmergencyAlert>> {
        self.call(&SiteAlertsRequest).await
    }

    pub async fn create_alert(&self, req: &CreateAlertRequest) -> ApiResult<()> {
        self.call(req).await.map(|_| ())
    }

    pub async fn resolve_alert(&self, id: i64) -> ApiResult<()> {
        self.call(&ResolveAlertRequest { id }).await.map(|_| ())
    }

    // --- 缺陷报告 ---

    pub async fn my_issues(&self) -> ApiResult<Vec<Issue>> {
        Ok(self.call(&MyIssuesRequest).await?.unwrap_or_default())
    }

    pub async fn site_issues(&self) -> ApiResult<Vec<Issue>> {
        Ok(self.call(&SiteIssuesRequest).await?.unwrap_or_default())
    }

    /// `body` 由 [`crate::forms::IssueDraft::to_multipart`] 生成
    pub async fn create_issue(&self, body: RequestBody) -> ApiResult<()> {
        self.request(ISSUES_PATH, HttpMethod::Post, body)
            .await
            .map(|_| ())
    }

    // --- 图纸 ---

    pub async fn drawings(&self) -> ApiResult<Vec<Drawing>> {
        self.call(&ListDrawingsRequest).await
    }

    pub async fn upload_drawing(&self, file: FilePart) -> ApiResult<()> {
        self.request(DRAWING_UPLOAD_PATH, HttpMethod::Post, drawing_upload(file))
            .await
            .map(|_| ())
    }

    pub async fn delete_drawing(&self, id: i64) -> ApiResult<()> {
        self.call(&DeleteDrawingRequest { id }).await.map(|_| ())
    }

    pub async fn drawing_file(&self, drawing: &Drawing) -> ApiResult<Binary> {
        let mut binary = self.fetch_binary(&drawing.file_path()).await?;
        if binary.content_type.is_none() {
            binary.content_type = drawing.content_type.clone();
        }
        Ok(binary)
    }

    // --- 工序 ---

    pub async fn processes(&self) -> ApiResult<Vec<ProcessItem>> {
        self.call(&ListProcessesRequest).await
    }

    pub async fn create_process(&self, req: &CreateProcessRequest) -> ApiResult<()> {
        self.call(req).await.map(|_| ())
    }

    // --- 用户 (管理员) ---

    pub async fn users(&self) -> ApiResult<Vec<UserProfile>> {
        self.call(&ListUsersRequest).await
    }

    pub async fn find_user(&self, username: &str) -> ApiResult<UserProfile> {
        self.call(&FindUserRequest {
            username: username.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::mock::*;
    use crate::client::{HttpResponse, RequestBody};
    use crate::error::ApiError;
    use crate::forms::Credentials;
    use crate::protocol::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn login_posts_form_encoded_credentials() {
        let transport = MockTransport::new().json(
            HttpMethod::Post,
            "/login",
            200,
            json!({"access_token": "jwt", "token_type": "bearer"}),
        );
        let api = client(transport.clone()).anonymous();

        let creds = Credentials {
            username: "kim".into(),
            password: "pw".into(),
        };
        let token = api.login(&creds).await.unwrap();
        assert_eq!(token.access_token, "jwt");

        let req = &transport.requests()[0];
        assert_eq!(req.header("content-type"), Some("application/x-www-form-urlencoded"));
        assert_eq!(req.header("authorization"), None);
        assert_eq!(req.body, creds.to_form());
    }

    #[tokio::test]
    async fn issue_list_treats_empty_body_as_empty_list() {
        let transport = MockTransport::new()
            .respond(HttpMethod::Get, "/issues/me", HttpResponse::new(200, ""))
            .json(HttpMethod::Get, "/manager/issues", 200, json!(null));
        let api = client(transport);

        assert!(api.my_issues().await.unwrap().is_empty());
        assert!(api.site_issues().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn check_in_accepts_any_success_body() {
        let transport = MockTransport::new()
            .json(HttpMethod::Post, "/attendance/check-in", 200, json!({"status": "ok"}))
            .respond(HttpMethod::Post, "/attendance/check-out", HttpResponse::new(204, ""));
        let api = client(transport.clone());

        api.check_in().await.unwrap();
        api.check_out().await.unwrap();
        assert_eq!(
            transport.paths(),
            ["POST /attendance/check-in", "POST /attendance/check-out"]
        );
    }

    #[tokio::test]
    async fn drawing_file_falls_back_to_listed_content_type() {
        let transport = MockTransport::new().respond(
            HttpMethod::Get,
            "/drawings/5/file",
            HttpResponse::new(200, vec![1u8, 2, 3]),
        );
        let api = client(transport);
        let drawing = crate::Drawing {
            id: 5,
            title: "현장사진".into(),
            content_type: Some("image/jpeg".into()),
        };

        let binary = api.drawing_file(&drawing).await.unwrap();
        assert_eq!(binary.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(binary.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn resolve_alert_uses_put_on_manager_path() {
        let transport = MockTransport::new().json(
            HttpMethod::Put,
            "/manager/alerts/emergency/8/resolve",
            200,
            json!({"id": 8, "is_resolved": true}),
        );
        let api = client(transport.clone());

        api.resolve_alert(8).await.unwrap();
        assert_eq!(transport.requests()[0].body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn empty_profile_save_sends_no_fields_and_succeeds() {
        let transport = MockTransport::new().json(
            HttpMethod::Put,
            "/me",
            200,
            json!({"id": 1, "username": "kim", "full_name": "김철수", "role": "worker"}),
        );
        let api = client(transport.clone());

        let update = crate::forms::ProfileForm::default().to_update();
        let user = api.update_me(&update).await.unwrap();
        assert_eq!(user.full_name, "김철수");
        assert_eq!(transport.requests()[0].body, RequestBody::Json("{}".into()));
    }

    #[tokio::test]
    async fn find_user_surfaces_not_found() {
        let api = client(MockTransport::new());
        let err = api.find_user("ghost").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                message: "Not Found".into()
            }
        );
    }
}
