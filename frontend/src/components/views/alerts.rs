use leptos::prelude::*;

use sitelink_shared::EmergencyAlert;
use sitelink_shared::forms::{AlertCategory, AlertDraft};

use super::EmptyState;
use crate::components::view_host::use_view_actions;

#[component]
fn AlertForm() -> impl IntoView {
    let actions = use_view_actions();
    let category = RwSignal::new(AlertCategory::default());
    let detail = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = AlertDraft {
            category: category.get_untracked(),
            detail: detail.get_untracked(),
            location: location.get_untracked(),
        };
        match draft.validate() {
            Ok(req) => actions.run(Some("신고 접수됨"), move |api| async move {
                api.create_alert(&req).await
            }),
            Err(e) => actions.toasts().error(e.to_string()),
        }
    };

    let options = AlertCategory::ALL
        .into_iter()
        .map(|c| {
            view! {
                <option value=c.message() selected=move || category.get() == c>{c.label()}</option>
            }
        })
        .collect_view();

    view! {
        <form class="card bg-error/10 border border-error shadow-xl" on:submit=on_submit>
            <div class="card-body space-y-2">
                <h3 class="card-title text-error">"🚨 긴급 상황 신고"</h3>
                <select class="select select-bordered w-full"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        category.set(AlertCategory::from_message(&value).unwrap_or_default());
                    }
                >
                    {options}
                </select>
                <Show when=move || category.get() == AlertCategory::Other>
                    <input type="text" placeholder="상세 사유" class="input input-bordered w-full"
                        on:input=move |ev| detail.set(event_target_value(&ev))
                        prop:value=move || detail.get()
                    />
                </Show>
                <input type="text" placeholder="위치 (예: 3층 계단)" class="input input-bordered w-full"
                    on:input=move |ev| location.set(event_target_value(&ev))
                    prop:value=move || location.get()
                />
                <button type="submit" class="btn btn-error">"신고하기"</button>
            </div>
        </form>
    }
}

#[component]
fn AlertRow(alert: EmergencyAlert, can_resolve: bool) -> impl IntoView {
    let actions = use_view_actions();
    let id = alert.id;
    let resolved = alert.is_resolved;
    let reporter = alert.full_name.clone().unwrap_or_else(|| "-".to_string());

    let on_resolve = move |_| actions.run(None, move |api| async move { api.resolve_alert(id).await });

    let status = if !resolved && can_resolve {
        view! { <button class="btn btn-sm btn-primary" on:click=on_resolve>"해결하기"</button> }
            .into_any()
    } else if resolved {
        view! { <span class="badge badge-success">"해결됨"</span> }.into_any()
    } else {
        view! { <span class="badge badge-warning">"대기중"</span> }.into_any()
    };

    view! {
        <div class="flex items-center justify-between py-3 border-b border-base-200">
            <div>
                <div class="font-bold">{alert.message}</div>
                <div class="text-sm text-base-content/60">
                    {format!("📍 {} · {}", alert.location_text, reporter)}
                </div>
            </div>
            {status}
        </div>
    }
}

#[component]
pub fn AlertsView(alerts: Vec<EmergencyAlert>, can_resolve: bool) -> impl IntoView {
    let is_empty = alerts.is_empty();

    view! {
        <AlertForm />
        <div class="card bg-base-100 shadow-xl mt-5">
            <div class="card-body">
                <h3 class="card-title">"신고 내역"</h3>
                {if is_empty {
                    view! { <EmptyState message="신고 내역이 없습니다." /> }.into_any()
                } else {
                    alerts
                        .into_iter()
                        .map(|alert| view! { <AlertRow alert=alert can_resolve=can_resolve /> })
                        .collect_view()
                        .into_any()
                }}
            </div>
        </div>
    }
}
