use leptos::prelude::*;
use leptos::task::spawn_local;

use sitelink_shared::date::format_clock;
use sitelink_shared::protocol::ATTENDANCE_CSV_FILE_NAME;
use sitelink_shared::{AttendanceRecord, STATUS_ABSENT, STATUS_LATE};

use super::EmptyState;
use crate::components::view_host::use_view_actions;
use crate::web::blob;

#[component]
fn AttendanceRow(record: AttendanceRecord) -> impl IntoView {
    let status = record
        .check_in_status
        .clone()
        .unwrap_or_else(|| STATUS_ABSENT.to_string());
    let badge = if status == STATUS_LATE {
        "badge badge-error"
    } else {
        "badge badge-success"
    };
    let span = format!(
        "{} ~ {}",
        format_clock(record.check_in_time.as_deref()),
        format_clock(record.check_out_time.as_deref())
    );

    view! {
        <div class="flex items-center justify-between py-3 border-b border-base-200">
            <div>
                <div class="font-bold">{record.date}</div>
                <div class="text-sm text-base-content/60">{span}</div>
            </div>
            <span class=badge>{status}</span>
        </div>
    }
}

#[component]
pub fn AttendanceView(records: Vec<AttendanceRecord>, can_export: bool) -> impl IntoView {
    let actions = use_view_actions();
    let is_empty = records.is_empty();

    let check_in = move |_| actions.run(Some("출근 완료!"), |api| async move { api.check_in().await });
    let check_out = move |_| actions.run(Some("퇴근 완료!"), |api| async move { api.check_out().await });

    let export = move |_| {
        let api = actions.api();
        let toasts = actions.toasts();
        spawn_local(async move {
            let saved = match api.export_attendance_csv().await {
                Ok(binary) => blob::save(&binary, ATTENDANCE_CSV_FILE_NAME),
                Err(e) => Err(e),
            };
            match saved {
                Ok(()) => toasts.success("출석 엑셀 파일 다운로드 완료"),
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="grid grid-cols-2 gap-4">
                    <button class="btn btn-primary btn-lg" on:click=check_in>"출근하기"</button>
                    <button class="btn btn-secondary btn-lg" on:click=check_out>"퇴근하기"</button>
                </div>
                <Show when=move || can_export>
                    <button class="btn btn-outline mt-2" on:click=export>"출석 기록 엑셀 다운로드"</button>
                </Show>
            </div>
        </div>
        <div class="card bg-base-100 shadow-xl mt-5">
            <div class="card-body">
                <h3 class="card-title">"나의 출석 기록"</h3>
                {if is_empty {
                    view! { <EmptyState message="출석 기록이 없습니다." /> }.into_any()
                } else {
                    records
                        .into_iter()
                        .map(|record| view! { <AttendanceRow record=record /> })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}
