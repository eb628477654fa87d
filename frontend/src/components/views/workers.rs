use leptos::prelude::*;
use leptos::task::spawn_local;

use sitelink_shared::UserProfile;
use sitelink_shared::loaders::search_worker;

use super::EmptyState;
use crate::components::view_host::use_view_actions;
use crate::web::dom::scroll_into_center;

fn row_id(username: &str) -> String {
    format!("worker-row-{}", username)
}

fn or_dash(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn WorkersView(workers: Vec<UserProfile>) -> impl IntoView {
    let actions = use_view_actions();
    let query = RwSignal::new(String::new());
    let highlighted = RwSignal::new(None::<usize>);
    let table = StoredValue::new(workers.clone());
    let heading = format!("현장 근로자 명단 ({}명)", workers.len());

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let api = actions.api();
        let toasts = actions.toasts();
        let input = query.get_untracked();
        spawn_local(async move {
            let workers = table.get_value();
            match search_worker(&api, &workers, &input).await {
                Ok(index) => {
                    let username = workers[index].username.clone();
                    highlighted.set(Some(index));
                    scroll_into_center(&row_id(&username));
                    toasts.success(format!("\"{}\" 사용자를 찾았습니다.", username));
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let body = if workers.is_empty() {
        view! { <EmptyState message="등록된 근로자가 없습니다." /> }.into_any()
    } else {
        let rows = workers
            .into_iter()
            .enumerate()
            .map(|(index, worker)| {
                let class = move || {
                    if highlighted.get() == Some(index) { "bg-primary/20" } else { "" }
                };
                let id = row_id(&worker.username);
                view! {
                    <tr id=id class=class>
                        <td>{worker.full_name}</td>
                        <td>{worker.username}</td>
                        <td>{or_dash(worker.trade_type)}</td>
                        <td>{or_dash(worker.phone)}</td>
                        <td>{or_dash(worker.birth_date)}</td>
                    </tr>
                }
            })
            .collect_view();
        view! {
            <table class="table">
                <thead>
                    <tr>
                        <th>"이름"</th><th>"아이디"</th><th>"공종"</th>
                        <th>"전화번호"</th><th>"생년월일"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        }
        .into_any()
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex justify-between items-center flex-wrap gap-2">
                    <h3 class="card-title">{heading}</h3>
                    <form class="join" on:submit=on_search>
                        <input type="text" placeholder="아이디 검색" class="input input-bordered join-item"
                            on:input=move |ev| query.set(event_target_value(&ev))
                            prop:value=move || query.get()
                        />
                        <button type="submit" class="btn btn-primary join-item">"검색"</button>
                    </form>
                </div>
                <div class="overflow-x-auto">{body}</div>
            </div>
        </div>
    }
}
