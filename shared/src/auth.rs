//! 认证流程
//!
//! 网络部分是普通的 async 函数，会话状态的变更由 [`finish_login`] 同步完成，
//! 这样调用方可以在自己的状态容器（例如 Leptos 信号）里应用结果。

use crate::client::{ApiClient, Transport};
use crate::error::{ApiError, ApiResult};
use crate::forms::{Credentials, SignupForm};
use crate::session::Session;
use crate::{Site, UserProfile};

pub const LOGIN_FAILED_MESSAGE: &str = "아이디 또는 비밀번호를 확인해주세요.";
pub const LOGIN_SUCCESS_MESSAGE: &str = "환영합니다! 접속 성공 ✨";
pub const SIGNUP_SUCCESS_MESSAGE: &str = "가입 완료! 로그인해주세요. 🎉";

/// 登录成功后得到的令牌与用户资料
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub token: String,
    pub user: UserProfile,
}

/// 提交凭据并用返回的令牌获取用户资料
///
/// 任一步失败都视为登录失败，调用方不应保存令牌。
pub async fn sign_in<T: Transport + Clone>(
    api: &ApiClient<T>,
    credentials: &Credentials,
) -> ApiResult<SignedIn> {
    let token = api
        .anonymous()
        .login(credentials)
        .await
        .map_err(|e| {
            log::warn!("login failed for {}: {}", credentials.username, e);
            ApiError::Unauthorized(LOGIN_FAILED_MESSAGE.to_string())
        })?
        .access_token;

    let user = api.anonymous().with_token(token.clone()).me().await?;
    log::info!("signed in as {} ({})", user.username, user.role);
    Ok(SignedIn { token, user })
}

/// 把登录结果应用到会话上
pub fn finish_login(session: &mut Session, outcome: ApiResult<SignedIn>) -> ApiResult<()> {
    match outcome {
        Ok(SignedIn { token, user }) => {
            session.authenticate(token);
            session.set_user(user);
            Ok(())
        }
        Err(e) => {
            session.fail_login();
            Err(e)
        }
    }
}

/// 页面加载时用已保存的令牌恢复会话
///
/// 失败（令牌过期或无效）时调用方应执行注销。
pub async fn restore<T: Transport>(api: &ApiClient<T>) -> ApiResult<UserProfile> {
    if api.token().is_none() {
        return Err(ApiError::Unauthorized("no stored token".into()));
    }
    api.me().await.inspect_err(|e| {
        log::info!("stored token rejected, logging out: {}", e);
    })
}

/// 注册：先做客户端校验，校验失败时不发出请求
pub async fn signup<T: Transport + Clone>(api: &ApiClient<T>, form: &SignupForm) -> ApiResult<()> {
    let req = form.validate()?;
    api.anonymous().signup(&req).await
}

/// 注册表单的工地列表；失败时记录日志并返回空列表
pub async fn signup_sites<T: Transport + Clone>(api: &ApiClient<T>) -> Vec<Site> {
    match api.anonymous().list_sites().await {
        Ok(sites) => sites,
        Err(e) => {
            log::warn!("failed to load public sites: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::*;
    use crate::protocol::HttpMethod;
    use crate::session::AuthPhase;
    use crate::Role;
    use serde_json::json;

    fn me_json() -> serde_json::Value {
        json!({
            "id": 7,
            "username": "kim",
            "full_name": "김철수",
            "role": "worker",
            "site_id": 2,
            "trade_type": "철근"
        })
    }

    fn creds(password: &str) -> Credentials {
        Credentials {
            username: "kim".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn valid_login_sets_token_and_authenticates() {
        let transport = MockTransport::new()
            .json(HttpMethod::Post, "/login", 200, json!({"access_token": "jwt-1"}))
            .json(HttpMethod::Get, "/me", 200, me_json());
        let api = client(transport.clone()).anonymous();

        let mut session = Session::default();
        session.begin_login();
        assert_eq!(session.phase(), AuthPhase::Authenticating);

        let outcome = sign_in(&api, &creds("pw")).await;
        finish_login(&mut session, outcome).unwrap();

        assert_eq!(session.token(), Some("jwt-1"));
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Worker));

        let requests = transport.requests();
        assert_eq!(requests[0].header("authorization"), None);
        assert_eq!(requests[1].header("authorization"), Some("Bearer jwt-1"));
    }

    #[tokio::test]
    async fn invalid_login_leaves_token_unset() {
        let transport = MockTransport::new().json(
            HttpMethod::Post,
            "/login",
            401,
            json!({"detail": "Incorrect username or password"}),
        );
        let api = client(transport.clone()).anonymous();

        let mut session = Session::default();
        session.begin_login();
        let outcome = sign_in(&api, &creds("wrong")).await;
        let err = finish_login(&mut session, outcome).unwrap_err();

        assert_eq!(err.to_string(), LOGIN_FAILED_MESSAGE);
        assert_eq!(session.token(), None);
        assert_eq!(session.phase(), AuthPhase::Unauthenticated);
        assert_eq!(transport.paths(), ["POST /login"]);
    }

    #[tokio::test]
    async fn profile_failure_after_login_is_a_failed_login() {
        let transport = MockTransport::new()
            .json(HttpMethod::Post, "/login", 200, json!({"access_token": "jwt-2"}))
            .json(HttpMethod::Get, "/me", 500, json!({"detail": "db down"}));
        let api = client(transport).anonymous();

        let mut session = Session::default();
        let outcome = sign_in(&api, &creds("pw")).await;
        assert!(finish_login(&mut session, outcome).is_err());
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn worker_signup_without_site_makes_no_request() {
        let transport = MockTransport::new();
        let api = client(transport.clone());

        let form = SignupForm {
            role: Role::Worker,
            username: "new".into(),
            ..Default::default()
        };
        let err = signup(&api, &form).await.unwrap_err();
        assert!(err.is_validation());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn signup_posts_json_without_token_and_surfaces_detail() {
        let transport = MockTransport::new().json(
            HttpMethod::Post,
            "/signup",
            400,
            json!({"detail": "이미 존재하는 아이디입니다"}),
        );
        let api = client(transport.clone());

        let form = SignupForm {
            role: Role::Worker,
            site_id: "1".into(),
            username: "kim".into(),
            ..Default::default()
        };
        let err = signup(&api, &form).await.unwrap_err();
        assert_eq!(err.to_string(), "이미 존재하는 아이디입니다");

        let req = &transport.requests()[0];
        assert_eq!(req.header("authorization"), None);
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[tokio::test]
    async fn restore_requires_a_token_and_a_valid_profile() {
        let transport = MockTransport::new().json(HttpMethod::Get, "/me", 200, me_json());
        let api = client(transport.clone());
        assert_eq!(restore(&api).await.unwrap().username, "kim");

        let err = restore(&api.anonymous()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(transport.requests().len(), 1);

        let expired = client(
            MockTransport::new().json(HttpMethod::Get, "/me", 401, json!({"detail": "expired"})),
        );
        assert_eq!(
            restore(&expired).await.unwrap_err(),
            ApiError::Unauthorized("expired".into())
        );
    }

    #[tokio::test]
    async fn site_list_failure_yields_empty_list() {
        let api = client(MockTransport::new().fail(HttpMethod::Get, "/public/sites", "offline"));
        assert!(signup_sites(&api).await.is_empty());

        let api = client(MockTransport::new().json(
            HttpMethod::Get,
            "/public/sites",
            200,
            json!([{"id": 1, "name": "A현장", "location": "부산"}]),
        ));
        let sites = signup_sites(&api).await;
        assert_eq!(sites[0].label(), "A현장 (부산)");
    }
}
