//! 视图宿主
//!
//! 每次激活视图：先显示骨架屏，等待最短展示时间，再调用加载器。
//! 加载失败只显示失败卡片和提示，宿主仍可接受下一次导航。
//! 被新导航取代的加载结果会被丢弃。

use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use sitelink_shared::ApiResult;
use sitelink_shared::date;
use sitelink_shared::loaders::{ViewModel, load_view};
use sitelink_shared::route::{LoadGeneration, ViewKind};

use crate::auth::{AuthContext, SiteApi, use_auth};
use crate::components::views::{
    AlertsView, AttendanceView, DashboardView, DrawingsView, IssuesView, NoticesView,
    ProcessesView, ProfileView, WorkersView,
};
use crate::toast::{ToastContext, use_toasts};

#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Failed(String),
    Ready(ViewModel),
}

/// 视图内操作（写请求、重新加载）的入口
#[derive(Clone, Copy)]
pub struct ViewActions {
    auth: AuthContext,
    toasts: ToastContext,
    reload: RwSignal<u32>,
}

impl ViewActions {
    pub fn api(&self) -> SiteApi {
        self.auth.api()
    }

    pub fn toasts(&self) -> ToastContext {
        self.toasts
    }

    /// 重新加载当前视图
    pub fn reload(&self) {
        self.reload.update(|n| *n = n.wrapping_add(1));
    }

    /// 执行写操作：成功时提示并重新加载，失败时提示错误
    pub fn run<F, Fut>(&self, success: Option<&'static str>, action: F)
    where
        F: FnOnce(SiteApi) -> Fut,
        Fut: Future<Output = ApiResult<()>> + 'static,
    {
        let fut = action(self.api());
        let actions = *self;
        spawn_local(async move {
            match fut.await {
                Ok(()) => {
                    if let Some(message) = success {
                        actions.toasts.success(message);
                    }
                    actions.reload();
                }
                Err(e) => actions.toasts.error(e.to_string()),
            }
        });
    }
}

pub fn use_view_actions() -> ViewActions {
    use_context::<ViewActions>().expect("ViewActions should be provided by ViewHost")
}

#[component]
fn Skeleton() -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4 animate-pulse">
            <div class="skeleton h-48 w-full"></div>
            <div class="skeleton h-48 w-full"></div>
        </div>
        <div class="skeleton h-72 w-full mt-5 animate-pulse"></div>
    }
}

fn render_model(model: ViewModel) -> AnyView {
    match model {
        ViewModel::Dashboard(model) => view! { <DashboardView model=model /> }.into_any(),
        ViewModel::Attendance {
            records,
            can_export,
        } => view! { <AttendanceView records=records can_export=can_export /> }.into_any(),
        ViewModel::Notices {
            notices,
            can_author,
        } => view! { <NoticesView notices=notices can_author=can_author /> }.into_any(),
        ViewModel::Alerts {
            alerts,
            can_resolve,
        } => view! { <AlertsView alerts=alerts can_resolve=can_resolve /> }.into_any(),
        ViewModel::Issues { issues } => view! { <IssuesView issues=issues /> }.into_any(),
        ViewModel::Drawings {
            drawings,
            can_manage,
        } => view! { <DrawingsView drawings=drawings can_manage=can_manage /> }.into_any(),
        ViewModel::Processes {
            items,
            can_schedule,
        } => view! { <ProcessesView items=items can_schedule=can_schedule /> }.into_any(),
        ViewModel::Workers { workers } => view! { <WorkersView workers=workers /> }.into_any(),
        ViewModel::Profile(user) => view! { <ProfileView user=user /> }.into_any(),
        ViewModel::Denied(message) => view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">{message}</div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn ViewHost(kind: Memo<ViewKind>, reload: RwSignal<u32>) -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    provide_context(ViewActions {
        auth,
        toasts,
        reload,
    });

    let generation = RwSignal::new(LoadGeneration::default());
    let state = RwSignal::new(LoadState::Loading);
    let delay_ms = auth.config().skeleton_delay_ms;
    let has_user = Memo::new(move |_| auth.session.with(|s| s.user().is_some()));

    Effect::new(move |_| {
        let kind = kind.get();
        reload.track();
        if !has_user.get() {
            return;
        }
        let Some(ticket) = generation.try_update(LoadGeneration::issue) else {
            return;
        };
        state.set(LoadState::Loading);

        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            let session = auth.session.get_untracked();
            let result = load_view(&auth.api(), &session, kind, date::today()).await;

            let current = generation
                .try_with_untracked(|g| g.is_current(ticket))
                .unwrap_or(false);
            if !current {
                log::debug!("discarding stale {} load", kind.name());
                return;
            }

            state.set(match result {
                Ok(model) => LoadState::Ready(model),
                Err(e) => {
                    toasts.error(e.to_string());
                    LoadState::Failed(e.to_string())
                }
            });
        });
    });

    move || match state.get() {
        LoadState::Loading => view! { <Skeleton /> }.into_any(),
        LoadState::Failed(message) => view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <p>"데이터 로드 실패: " {message}</p>
                </div>
            </div>
        }
        .into_any(),
        LoadState::Ready(model) => render_model(model),
    }
}
