//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM。定义应用的所有路由、
//! 每个视图的属性，以及视图激活时的权限判断。

use std::fmt::Display;

use crate::session::{Capability, Session};

pub const PERMISSION_DENIED_MESSAGE: &str = "관리자 권한이 필요합니다.";

/// 主界面中的视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewKind {
    #[default]
    Dashboard,
    Attendance,
    Notices,
    Alerts,
    Issues,
    Drawings,
    Processes,
    Workers,
    Profile,
}

impl ViewKind {
    /// 侧边栏顺序
    pub const ALL: [ViewKind; 9] = [
        ViewKind::Dashboard,
        ViewKind::Attendance,
        ViewKind::Notices,
        ViewKind::Alerts,
        ViewKind::Issues,
        ViewKind::Drawings,
        ViewKind::Processes,
        ViewKind::Workers,
        ViewKind::Profile,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Dashboard => "dashboard",
            ViewKind::Attendance => "attendance",
            ViewKind::Notices => "notices",
            ViewKind::Alerts => "alerts",
            ViewKind::Issues => "issues",
            ViewKind::Drawings => "drawings",
            ViewKind::Processes => "processes",
            ViewKind::Workers => "workers",
            ViewKind::Profile => "profile",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    pub fn path(&self) -> String {
        format!("/{}", self.name())
    }

    /// 页头标题
    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Dashboard => "대시보드",
            ViewKind::Attendance => "출석 체크",
            ViewKind::Notices => "공지사항",
            ViewKind::Alerts => "비상 알림",
            ViewKind::Issues => "하자 신고",
            ViewKind::Drawings => "도면 관리",
            ViewKind::Processes => "공정 관리",
            ViewKind::Workers => "근로자 관리",
            ViewKind::Profile => "내 정보",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ViewKind::Dashboard => "📊",
            ViewKind::Attendance => "🕘",
            ViewKind::Notices => "📢",
            ViewKind::Alerts => "🚨",
            ViewKind::Issues => "🛠",
            ViewKind::Drawings => "📐",
            ViewKind::Processes => "🏗",
            ViewKind::Workers => "👷",
            ViewKind::Profile => "👤",
        }
    }

    /// 激活该视图所需的权限
    pub fn required_capability(&self) -> Option<Capability> {
        match self {
            ViewKind::Workers => Some(Capability::ViewRoster),
            _ => None,
        }
    }

    /// 侧边栏是否显示该项
    pub fn visible_to(&self, session: &Session) -> bool {
        self.required_capability()
            .is_none_or(|capability| session.can(capability))
    }
}

/// 视图激活的判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Allowed,
    /// 不调用后端，直接显示提示
    Denied(&'static str),
}

/// 每次视图激活时调用一次
pub fn activate(kind: ViewKind, session: &Session) -> Activation {
    match kind.required_capability() {
        Some(capability) if !session.can(capability) => {
            log::debug!("[Router] {} denied for role {:?}", kind.name(), session.role());
            Activation::Denied(PERMISSION_DENIED_MESSAGE)
        }
        _ => Activation::Allowed,
    }
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Signup,
    /// 主界面中的某个视图 (需要认证)
    View(ViewKind),
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/login" => Self::Login,
            "/signup" => Self::Signup,
            other => other
                .strip_prefix('/')
                .and_then(ViewKind::from_name)
                .map(Self::View)
                .unwrap_or(Self::NotFound),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::View(kind) => kind.path(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::View(_))
    }

    /// 已认证用户应离开的路由（登录、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::View(ViewKind::Dashboard)
    }

    /// 守卫：返回实际应进入的路由
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

/// 点击菜单项时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    /// 已在该视图上，重新加载数据
    Reload,
    Navigate(AppRoute),
}

impl MenuClick {
    pub fn resolve(current: AppRoute, target: ViewKind) -> Self {
        match current {
            AppRoute::View(kind) if kind == target => Self::Reload,
            _ => Self::Navigate(AppRoute::View(target)),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 视图加载的代次
///
/// 每次激活领取一张票据，只有仍为最新的票据才能写入结果，
/// 被新导航取代的加载结果会被丢弃。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadGeneration(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadGeneration {
    pub fn issue(&mut self) -> LoadTicket {
        self.0 = self.0.wrapping_add(1);
        LoadTicket(self.0)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.0 == ticket.0
    }
}
