use leptos::prelude::*;

use sitelink_shared::Issue;
use sitelink_shared::forms::IssueDraft;

use super::EmptyState;
use crate::components::view_host::use_view_actions;

#[component]
fn IssueForm() -> impl IntoView {
    let actions = use_view_actions();
    let title = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = IssueDraft {
            title: title.get_untracked(),
        };
        match draft.to_multipart() {
            Ok(body) => actions.run(Some("하자 신고가 등록되었습니다."), move |api| async move {
                api.create_issue(body).await
            }),
            Err(e) => actions.toasts().error(e.to_string()),
        }
    };

    view! {
        <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
            <div class="card-body space-y-2">
                <h3 class="card-title">"하자 신고 등록"</h3>
                <input type="text" placeholder="하자 내용 (예: 2층 벽면 균열)" class="input input-bordered w-full"
                    on:input=move |ev| title.set(event_target_value(&ev))
                    prop:value=move || title.get()
                />
                <button type="submit" class="btn btn-primary">"신고 등록"</button>
            </div>
        </form>
    }
}

#[component]
fn IssueList(issues: Vec<Issue>) -> impl IntoView {
    if issues.is_empty() {
        return view! { <EmptyState message="등록된 하자 신고가 없습니다." /> }.into_any();
    }
    issues
        .into_iter()
        .map(|issue| {
            let status = issue.status.clone().unwrap_or_else(|| "-".to_string());
            view! {
                <div class="flex items-center justify-between py-3 border-b border-base-200">
                    <div>
                        <div class="font-bold">{issue.title}</div>
                        <div class="text-sm text-base-content/60">
                            {issue.description.unwrap_or_default()}
                        </div>
                    </div>
                    <span class="badge badge-info">{status}</span>
                </div>
            }
        })
        .collect_view()
        .into_any()
}

/// 列表获取失败时仍然显示创建表单
#[component]
pub fn IssuesView(issues: Result<Vec<Issue>, String>) -> impl IntoView {
    let actions = use_view_actions();
    let body = match issues {
        Ok(issues) => view! { <IssueList issues=issues /> }.into_any(),
        Err(message) => {
            actions
                .toasts()
                .error(format!("하자 신고 로딩 실패: {}", message));
            view! {
                <div class="alert alert-error">
                    <span>"하자 신고 목록을 불러오지 못했습니다: " {message}</span>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <IssueForm />
        <div class="card bg-base-100 shadow-xl mt-5">
            <div class="card-body">
                <h3 class="card-title">"신고 내역"</h3>
                {body}
            </div>
        </div>
    }
}
