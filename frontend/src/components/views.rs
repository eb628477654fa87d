//! 每个视图一个组件，输入为共享库加载器产出的视图模型

mod alerts;
mod attendance;
mod dashboard;
mod drawings;
mod issues;
mod notices;
mod processes;
mod profile;
mod workers;

pub use alerts::AlertsView;
pub use attendance::AttendanceView;
pub use dashboard::DashboardView;
pub use drawings::DrawingsView;
pub use issues::IssuesView;
pub use notices::NoticesView;
pub use processes::ProcessesView;
pub use profile::ProfileView;
pub use workers::WorkersView;

use leptos::prelude::*;

/// 列表为空时的占位
#[component]
fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="text-center py-8 text-base-content/50">{message}</div>
    }
}
