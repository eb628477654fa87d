//! SiteLink 前端应用
//!
//! 业务逻辑都在 `sitelink_shared` 中，这里只负责浏览器胶水与 UI：
//! - `web::router`: 路由服务，守卫规则来自 `sitelink_shared::route`
//! - `auth`: 会话状态与令牌持久化
//! - `toast`: 全局提示
//! - `components`: 页面、外壳与各个视图

mod auth;
mod components {
    pub mod login;
    pub mod shell;
    pub mod signup;
    pub mod view_host;
    pub mod views;
}
mod toast;

use leptos::prelude::*;
use sitelink_shared::config::AppConfig;

use crate::auth::{AuthContext, init_auth};
use crate::components::login::LoginPage;
use crate::components::shell::AppShell;
use crate::components::signup::SignupPage;
use crate::toast::{ToastContext, ToastHost};

// 浏览器原生 API 的轻量封装，不依赖 gloo-net / gloo-storage
pub(crate) mod web {
    pub mod blob;
    pub mod dom;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchTransport;
    pub use storage::LocalStorage;
}

use web::route::Page;
use web::router::{Router, RouterOutlet};

fn route_matcher(page: Page) -> AnyView {
    match page {
        Page::Login => view! { <LoginPage /> }.into_any(),
        Page::Signup => view! { <SignupPage /> }.into_any(),
        Page::Main => view! { <AppShell /> }.into_any(),
        Page::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"페이지를 찾을 수 없습니다"</p>
                    <a href="/login" class="btn btn-primary mt-6">"로그인으로"</a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_document_attr(web::dom::document_api_url().as_deref());
    log::info!("api base url: {}", config.api_base_url);

    let toasts = ToastContext::new(config.toast_ms);
    provide_context(toasts);

    let auth_ctx = AuthContext::new(config);
    provide_context(auth_ctx);

    // 从 LocalStorage 恢复令牌，必要时后台拉取用户资料
    init_auth(&auth_ctx);

    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Show
            when=move || !auth_ctx.is_restoring()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg"></span>
                </div>
            }
        >
            <Router is_authenticated=is_authenticated>
                <RouterOutlet matcher=route_matcher />
            </Router>
        </Show>
        <ToastHost />
    }
}
