use leptos::prelude::*;
use sitelink_shared::dashboard::{DashboardModel, StatusBuckets};

const BUCKET_COLORS: [&str; 3] = ["#6366f1", "#f59e0b", "#ef4444"];

/// 环形图：用 conic-gradient 按比例着色
fn doughnut_style(buckets: &StatusBuckets) -> String {
    let total = buckets.total();
    if total == 0 {
        return "background: #e5e7eb".to_string();
    }
    let mut start = 0.0;
    let stops: Vec<String> = buckets
        .counts
        .iter()
        .zip(BUCKET_COLORS)
        .map(|(count, color)| {
            let end = start + *count as f64 / total as f64 * 100.0;
            let stop = format!("{} {:.1}% {:.1}%", color, start, end);
            start = end;
            stop
        })
        .collect();
    format!("background: conic-gradient({})", stops.join(", "))
}

#[component]
pub fn DashboardView(model: DashboardModel) -> impl IntoView {
    let max_hours = model.max_hours().max(1.0);
    let doughnut = doughnut_style(&model.buckets);

    let legend = model
        .buckets
        .iter()
        .zip(BUCKET_COLORS)
        .map(|((label, count), color)| {
            view! {
                <div class="flex items-center gap-2 text-sm">
                    <span class="inline-block w-3 h-3 rounded-full" style=format!("background: {}", color)></span>
                    <span>{label}</span>
                    <span class="font-bold">{count}</span>
                </div>
            }
        })
        .collect_view();

    let bars = model
        .weekly
        .iter()
        .map(|day| {
            let height = format!("height: {:.0}%", day.hours / max_hours * 100.0);
            view! {
                <div class="flex flex-col items-center justify-end flex-1 h-full gap-1">
                    <span class="text-xs">{format!("{:.1}", day.hours)}</span>
                    <div class="w-6 bg-primary rounded-t" style=height></div>
                    <span class="text-xs text-base-content/60">{day.label.clone()}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="card bg-primary text-primary-content shadow-xl">
                <div class="card-body">
                    <h3 class="card-title text-2xl">{model.greeting()}</h3>
                    <p class="opacity-90">"오늘도 안전 수칙을 준수해주세요! 🚧"</p>
                    <div class="flex gap-2 mt-4">
                        <span class="badge badge-ghost">"Role: " {model.role.as_str()}</span>
                        <span class="badge badge-ghost">"Trade: " {model.trade_type.clone()}</span>
                    </div>
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">{model.buckets_title()}</h3>
                    <div class="flex items-center gap-6">
                        <div class="w-32 h-32 rounded-full relative" style=doughnut>
                            <div class="absolute inset-6 rounded-full bg-base-100"></div>
                        </div>
                        <div class="space-y-1">{legend}</div>
                    </div>
                </div>
            </div>
        </div>
        <div class="card bg-base-100 shadow-xl mt-5">
            <div class="card-body">
                <h3 class="card-title">"최근 7일 근무 시간 (시간)"</h3>
                <div class="flex items-end h-48 gap-2">{bars}</div>
            </div>
        </div>
    }
}
