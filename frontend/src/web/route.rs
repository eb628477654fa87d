//! 页面布局
//!
//! 路由本身定义在 `sitelink_shared::route`。这里把路由归并为顶层页面，
//! 同一主界面内切换视图时不会重建外壳。

use sitelink_shared::route::AppRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Signup,
    /// 已登录的主界面（页头 + 侧边栏 + 视图）
    Main,
    NotFound,
}

impl From<AppRoute> for Page {
    fn from(route: AppRoute) -> Self {
        match route {
            AppRoute::Login => Page::Login,
            AppRoute::Signup => Page::Signup,
            AppRoute::View(_) => Page::Main,
            AppRoute::NotFound => Page::NotFound,
        }
    }
}
