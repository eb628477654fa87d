use leptos::prelude::*;

use sitelink_shared::ProcessItem;
use sitelink_shared::forms::ProcessDraft;

use super::EmptyState;
use crate::components::view_host::use_view_actions;

#[component]
fn ProcessForm() -> impl IntoView {
    let actions = use_view_actions();
    let location = RwSignal::new(String::new());
    let work_name = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = ProcessDraft {
            location: location.get_untracked(),
            work_name: work_name.get_untracked(),
        };
        match draft.validate() {
            Ok(req) => actions.run(None, move |api| async move { api.create_process(&req).await }),
            Err(e) => actions.toasts().error(e.to_string()),
        }
    };

    view! {
        <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
            <div class="card-body flex-row gap-2">
                <input type="text" placeholder="위치" class="input input-bordered flex-1"
                    on:input=move |ev| location.set(event_target_value(&ev))
                    prop:value=move || location.get()
                />
                <input type="text" placeholder="작업" class="input input-bordered flex-1"
                    on:input=move |ev| work_name.set(event_target_value(&ev))
                    prop:value=move || work_name.get()
                />
                <button type="submit" class="btn btn-primary">"추가"</button>
            </div>
        </form>
    }
}

#[component]
pub fn ProcessesView(items: Vec<ProcessItem>, can_schedule: bool) -> impl IntoView {
    let is_empty = items.is_empty();
    let rows = items
        .into_iter()
        .map(|item| {
            view! {
                <tr>
                    <td>{item.start_date.unwrap_or_else(|| "-".to_string())}</td>
                    <td>{item.location}</td>
                    <td>{item.work_name}</td>
                    <td><span class="badge badge-ghost">{item.status}</span></td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <Show when=move || can_schedule>
            <ProcessForm />
        </Show>
        <div class="card bg-base-100 shadow-xl mt-5">
            <div class="card-body">
                {if is_empty {
                    view! { <EmptyState message="등록된 공정이 없습니다." /> }.into_any()
                } else {
                    view! {
                        <table class="table">
                            <thead>
                                <tr><th>"날짜"</th><th>"위치"</th><th>"작업"</th><th>"상태"</th></tr>
                            </thead>
                            <tbody>{rows}</tbody>
                        </table>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}
