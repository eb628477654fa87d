//! 会话与权限模块
//!
//! 会话只在以下操作中改变：登录（写入令牌）、资料获取/更新（写入用户）、
//! 注销（全部清空）。视图激活时通过 [`Capability`] 统一做权限判断。

use crate::{Role, UserProfile};

/// 角色可执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// 查看工人名单
    ViewRoster,
    /// 导出出勤 CSV
    ExportAttendance,
    /// 发布/删除公告
    AuthorNotices,
    /// 处理紧急警报
    ResolveAlerts,
    /// 上传/删除图纸
    ManageDrawings,
    /// 查看整个工地的警报与缺陷报告（否则仅本人）
    ViewSiteReports,
    /// 添加工序计划
    ScheduleProcess,
}

impl Role {
    pub fn can(&self, capability: Capability) -> bool {
        match self {
            Role::Manager => true,
            Role::Worker => matches!(capability, Capability::ScheduleProcess),
        }
    }
}

/// 认证阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    /// 显示登录或注册表单
    #[default]
    Unauthenticated,
    /// 登录请求进行中，或正在用已保存的令牌恢复会话
    Authenticating,
    /// 令牌已保存，主界面可用
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
    phase: AuthPhase,
}

impl Session {
    /// 页面加载时创建；存在已保存的令牌则进入恢复流程
    pub fn restore(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.is_empty());
        let phase = if token.is_some() {
            AuthPhase::Authenticating
        } else {
            AuthPhase::Unauthenticated
        };
        Self {
            token,
            user: None,
            phase,
        }
    }

    pub fn begin_login(&mut self) {
        self.phase = AuthPhase::Authenticating;
    }

    /// 登录失败：回到表单，不保留令牌
    pub fn fail_login(&mut self) {
        self.token = None;
        self.phase = AuthPhase::Unauthenticated;
    }

    pub fn authenticate(&mut self, token: String) {
        self.token = Some(token);
        self.phase = AuthPhase::Authenticated;
    }

    pub fn set_user(&mut self, user: UserProfile) {
        self.user = Some(user);
        if self.token.is_some() {
            self.phase = AuthPhase::Authenticated;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// 用户资料尚未加载时不授予任何权限
    pub fn can(&self, capability: Capability) -> bool {
        self.role().is_some_and(|role| role.can(capability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserProfile {
        UserProfile {
            id: 1,
            username: "park".into(),
            full_name: "박영희".into(),
            role,
            site_id: Some(1),
            trade_type: None,
            birth_date: None,
            gender: None,
            phone: None,
            email: None,
        }
    }

    #[test]
    fn restore_with_token_starts_authenticating() {
        let session = Session::restore(Some("abc".into()));
        assert_eq!(session.phase(), AuthPhase::Authenticating);
        assert_eq!(session.token(), Some("abc"));

        let session = Session::restore(Some(String::new()));
        assert_eq!(session.phase(), AuthPhase::Unauthenticated);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn capabilities_follow_role() {
        let mut session = Session::default();
        session.authenticate("t".into());
        assert!(!session.can(Capability::ScheduleProcess));

        session.set_user(user(Role::Worker));
        assert!(session.can(Capability::ScheduleProcess));
        assert!(!session.can(Capability::ViewRoster));
        assert!(!session.can(Capability::AuthorNotices));

        session.set_user(user(Role::Manager));
        assert!(session.can(Capability::ViewRoster));
        assert!(session.can(Capability::ManageDrawings));
    }

    #[test]
    fn failed_login_and_logout_clear_the_token() {
        let mut session = Session::default();
        session.begin_login();
        session.fail_login();
        assert_eq!(session.token(), None);
        assert_eq!(session.phase(), AuthPhase::Unauthenticated);

        session.authenticate("t".into());
        session.set_user(user(Role::Worker));
        session.clear();
        assert_eq!(session, Session::default());
    }
}
