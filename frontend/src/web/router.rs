//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API：所有对 window.history 的操作都集中在此模块。
//! 导航流程为 "请求 -> 守卫 -> 写入 History -> 更新信号"。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use sitelink_shared::route::{AppRoute, ViewKind};

use super::route::Page;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(path: &str, push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        log::warn!("[Router] history update failed: {:?}", e);
    }
}

/// 路由器服务
///
/// 通过注入的认证信号做守卫，与认证模块解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前视图；不在主界面时为仪表盘
    pub fn current_view(&self) -> Memo<ViewKind> {
        let route = self.current_route;
        Memo::new(move |_| match route.get() {
            AppRoute::View(kind) => kind,
            _ => ViewKind::Dashboard,
        })
    }

    pub fn navigate(&self, path: &str) {
        self.go(AppRoute::from_path(path), true);
    }

    pub fn open(&self, kind: ViewKind) {
        self.go(AppRoute::View(kind), true);
    }

    fn go(&self, target: AppRoute, push: bool) {
        let route = target.guard(self.is_authenticated.get_untracked());
        if route != target {
            log::debug!("[Router] {} redirected to {}", target, route);
        } else {
            log::debug!("[Router] navigate {}", route);
        }
        write_history(&route.to_path(), push);
        self.set_route.set(route);
    }

    /// 浏览器后退/前进
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            router.go(AppRoute::from_path(&current_path()), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时重新执行守卫
    fn setup_auth_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();
            let guarded = route.guard(is_auth);
            if guarded != route {
                log::debug!("[Router] auth changed ({}), {} -> {}", is_auth, route, guarded);
                write_history(&guarded.to_path(), false);
                router.set_route.set(guarded);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// 路由出口：只在顶层页面变化时重新渲染
#[component]
pub fn RouterOutlet(matcher: fn(Page) -> AnyView) -> impl IntoView {
    let router = use_router();
    let page = Memo::new(move |_| Page::from(router.current_route().get()));

    move || matcher(page.get())
}
