//! 认证模块
//!
//! 会话保存在 `RwSignal<Session>` 中，通过 Context 共享。
//! 路由服务只通过注入的认证信号读取状态。

use leptos::prelude::*;
use leptos::task::spawn_local;

use sitelink_shared::auth::{self, finish_login};
use sitelink_shared::config::AppConfig;
use sitelink_shared::forms::Credentials;
use sitelink_shared::session::{AuthPhase, Capability, Session};
use sitelink_shared::{ApiClient, ApiResult, UserProfile};

use crate::web::dom::reload_page;
use crate::web::{FetchTransport, LocalStorage};

pub type SiteApi = ApiClient<FetchTransport>;

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: RwSignal<Session>,
    config: StoredValue<AppConfig>,
}

impl AuthContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: RwSignal::new(Session::default()),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// 路由守卫使用：持有令牌即视为已认证（包括正在恢复的会话）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.token().is_some()))
    }

    /// 正在用已保存的令牌恢复会话
    pub fn is_restoring(&self) -> bool {
        self.session
            .with(|s| s.phase() == AuthPhase::Authenticating && s.token().is_some())
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.session.with(|s| s.user().cloned())
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.session.with(|s| s.can(capability))
    }

    /// 不带令牌的客户端，用于公共端点
    pub fn public_api(&self) -> SiteApi {
        ApiClient::new(self.config.with_value(|c| c.api_base_url.clone()), FetchTransport)
    }

    /// 带当前令牌的客户端
    pub fn api(&self) -> SiteApi {
        let api = self.public_api();
        match self.session.with_untracked(|s| s.token().map(str::to_string)) {
            Some(token) => api.with_token(token),
            None => api,
        }
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 页面加载时从 LocalStorage 恢复会话
///
/// 资料获取失败（令牌过期）时执行注销。
pub fn init_auth(ctx: &AuthContext) {
    let token = LocalStorage::token();
    let restoring = token.is_some();
    ctx.session.set(Session::restore(token));
    if !restoring {
        return;
    }

    let ctx = *ctx;
    spawn_local(async move {
        match auth::restore(&ctx.api()).await {
            Ok(user) => {
                log::info!("session restored for {}", user.username);
                ctx.session.update(|s| s.set_user(user));
            }
            Err(_) => logout(&ctx),
        }
    });
}

/// 登录；成功时令牌写入 LocalStorage
pub async fn login(ctx: &AuthContext, credentials: Credentials) -> ApiResult<()> {
    ctx.session.update(Session::begin_login);
    let outcome = auth::sign_in(&ctx.public_api(), &credentials).await;
    if let Ok(signed_in) = &outcome {
        LocalStorage::save_token(&signed_in.token);
    }

    let mut result = Ok(());
    ctx.session.update(|s| result = finish_login(s, outcome));
    result
}

/// 个人资料更新后刷新会话中的用户
pub fn update_user(ctx: &AuthContext, user: UserProfile) {
    ctx.session.update(|s| s.set_user(user));
}

/// 注销：清除令牌并整页刷新，不通知服务器
pub fn logout(ctx: &AuthContext) {
    log::info!("logging out");
    LocalStorage::clear_token();
    ctx.session.update(Session::clear);
    reload_page();
}
