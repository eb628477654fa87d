//! 视图加载器
//!
//! 每个视图一个加载函数：获取数据、计算派生值，产出类型化的视图模型。
//! 渲染由前端组件完成。

use chrono::NaiveDate;

use crate::client::{ApiClient, Transport};
use crate::dashboard::{DashboardModel, manager_buckets, weekly_hours, worker_buckets};
use crate::error::{ApiError, ApiResult};
use crate::forms::search_query;
use crate::route::{Activation, ViewKind, activate};
use crate::session::{Capability, Session};
use crate::{
    AttendanceRecord, Drawing, EmergencyAlert, Issue, Notice, ProcessItem, Role, UserProfile,
};

pub const DEFAULT_TRADE_LABEL: &str = "공통";
pub const WORKER_NOT_IN_TABLE_MESSAGE: &str = "해당 아이디를 목록에서 찾을 수 없습니다.";
pub const WORKER_NOT_FOUND_MESSAGE: &str = "해당 아이디를 찾을 수 없습니다.";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    Dashboard(DashboardModel),
    Attendance {
        records: Vec<AttendanceRecord>,
        can_export: bool,
    },
    Notices {
        notices: Vec<Notice>,
        can_author: bool,
    },
    Alerts {
        alerts: Vec<EmergencyAlert>,
        can_resolve: bool,
    },
    /// 列表获取失败时仍然显示创建表单
    Issues {
        issues: Result<Vec<Issue>, String>,
    },
    Drawings {
        drawings: Vec<Drawing>,
        can_manage: bool,
    },
    Processes {
        items: Vec<ProcessItem>,
        can_schedule: bool,
    },
    Workers {
        workers: Vec<UserProfile>,
    },
    Profile(UserProfile),
    /// 权限不足，未调用后端
    Denied(&'static str),
}

fn current_user(session: &Session) -> ApiResult<&UserProfile> {
    session
        .user()
        .ok_or_else(|| ApiError::Unauthorized("session has no profile".into()))
}

/// 加载指定视图
///
/// `today` 用于仪表盘的 7 天工时序列。
pub async fn load_view<T: Transport>(
    api: &ApiClient<T>,
    session: &Session,
    kind: ViewKind,
    today: NaiveDate,
) -> ApiResult<ViewModel> {
    if let Activation::Denied(message) = activate(kind, session) {
        return Ok(ViewModel::Denied(message));
    }

    let model = match kind {
        ViewKind::Dashboard => ViewModel::Dashboard(load_dashboard(api, session, today).await?),
        ViewKind::Attendance => ViewModel::Attendance {
            records: api.my_attendance().await?,
            can_export: session.can(Capability::ExportAttendance),
        },
        ViewKind::Notices => ViewModel::Notices {
            notices: api.notices().await?,
            can_author: session.can(Capability::AuthorNotices),
        },
        ViewKind::Alerts => {
            let alerts = if session.can(Capability::ViewSiteReports) {
                api.site_alerts().await?
            } else {
                api.my_alerts().await?
            };
            ViewModel::Alerts {
                alerts,
                can_resolve: session.can(Capability::ResolveAlerts),
            }
        }
        ViewKind::Issues => {
            let issues = if session.can(Capability::ViewSiteReports) {
                api.site_issues().await
            } else {
                api.my_issues().await
            };
            ViewModel::Issues {
                issues: issues.map_err(|e| e.to_string()),
            }
        }
        ViewKind::Drawings => ViewModel::Drawings {
            drawings: api.drawings().await?,
            can_manage: session.can(Capability::ManageDrawings),
        },
        ViewKind::Processes => ViewModel::Processes {
            items: api.processes().await?,
            can_schedule: session.can(Capability::ScheduleProcess),
        },
        ViewKind::Workers => ViewModel::Workers {
            workers: load_workers(api).await?,
        },
        ViewKind::Profile => ViewModel::Profile(api.me().await?),
    };
    Ok(model)
}

/// 仪表盘：管理员并发获取三项数据，任一失败则整体失败
pub async fn load_dashboard<T: Transport>(
    api: &ApiClient<T>,
    session: &Session,
    today: NaiveDate,
) -> ApiResult<DashboardModel> {
    let user = current_user(session)?;

    let (buckets, mine) = match user.role {
        Role::Manager => {
            let (users, today_records, mine) =
                futures::try_join!(api.users(), api.today_attendance(), api.my_attendance())?;
            (manager_buckets(users.len(), &today_records), mine)
        }
        Role::Worker => {
            let mine = api.my_attendance().await?;
            (worker_buckets(&mine), mine)
        }
    };

    let trade_type = user
        .trade_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TRADE_LABEL)
        .to_string();

    Ok(DashboardModel {
        full_name: user.full_name.clone(),
        role: user.role,
        trade_type,
        buckets,
        weekly: weekly_hours(&mine, today),
    })
}

/// 工人名单：只保留 worker 角色
pub async fn load_workers<T: Transport>(api: &ApiClient<T>) -> ApiResult<Vec<UserProfile>> {
    let mut users = api.users().await?;
    users.retain(|u| u.role == Role::Worker);
    Ok(users)
}

pub fn find_worker_row(workers: &[UserProfile], username: &str) -> Option<usize> {
    workers.iter().position(|w| w.username == username)
}

/// 按用户名搜索：先向后端确认存在，再在已加载的表格中定位
///
/// 返回匹配行的下标。
pub async fn search_worker<T: Transport>(
    api: &ApiClient<T>,
    workers: &[UserProfile],
    input: &str,
) -> ApiResult<usize> {
    let username = search_query(input)?;
    let user = api.find_user(&username).await.map_err(|e| {
        log::debug!("worker lookup for {} failed: {}", username, e);
        ApiError::Status {
            status: e.status_code().unwrap_or(0),
            message: WORKER_NOT_FOUND_MESSAGE.to_string(),
        }
    })?;
    find_worker_row(workers, &user.username)
        .ok_or_else(|| ApiError::validation(WORKER_NOT_IN_TABLE_MESSAGE))
}
