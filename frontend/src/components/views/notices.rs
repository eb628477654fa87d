use leptos::prelude::*;

use sitelink_shared::Notice;
use sitelink_shared::date::format_dot_date;
use sitelink_shared::forms::NoticeDraft;

use super::EmptyState;
use crate::components::view_host::use_view_actions;
use crate::web::dom::confirm;

#[component]
fn NoticeForm() -> impl IntoView {
    let actions = use_view_actions();
    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = NoticeDraft {
            title: title.get_untracked(),
            content: content.get_untracked(),
        };
        match draft.validate() {
            Ok(req) => actions.run(Some("등록됨"), move |api| async move {
                api.create_notice(&req).await
            }),
            Err(e) => actions.toasts().error(e.to_string()),
        }
    };

    view! {
        <form class="card bg-base-100 shadow-xl" on:submit=on_submit>
            <div class="card-body space-y-2">
                <input type="text" placeholder="제목" class="input input-bordered w-full"
                    on:input=move |ev| title.set(event_target_value(&ev))
                    prop:value=move || title.get()
                />
                <textarea placeholder="내용" class="textarea textarea-bordered w-full"
                    on:input=move |ev| content.set(event_target_value(&ev))
                    prop:value=move || content.get()
                ></textarea>
                <button type="submit" class="btn btn-primary">"공지 등록"</button>
            </div>
        </form>
    }
}

#[component]
fn NoticeCard(notice: Notice, can_author: bool) -> impl IntoView {
    let actions = use_view_actions();
    let id = notice.id;

    let on_delete = move |_| {
        if !confirm("삭제하시겠습니까?") {
            return;
        }
        let toasts = actions.toasts();
        let api = actions.api();
        leptos::task::spawn_local(async move {
            match api.delete_notice(id).await {
                Ok(()) => {
                    toasts.success("삭제됨");
                    actions.reload();
                }
                Err(e) => {
                    log::warn!("notice {} delete failed: {}", id, e);
                    toasts.error("삭제 실패");
                }
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex justify-between items-start">
                    <span class="text-sm text-base-content/60">
                        {format_dot_date(notice.created_at.as_deref())}
                    </span>
                    <Show when=move || can_author>
                        <button class="btn btn-ghost btn-xs text-error" on:click=on_delete>"삭제"</button>
                    </Show>
                </div>
                <h4 class="card-title">{notice.title}</h4>
                <p class="whitespace-pre-line">{notice.content}</p>
                <p class="text-sm text-base-content/60">
                    {format!("{} (관리자)", notice.writer_full_name)}
                </p>
            </div>
        </div>
    }
}

#[component]
pub fn NoticesView(notices: Vec<Notice>, can_author: bool) -> impl IntoView {
    let is_empty = notices.is_empty();

    view! {
        <Show when=move || can_author>
            <NoticeForm />
        </Show>
        <div class="space-y-4 mt-5">
            {if is_empty {
                view! { <EmptyState message="등록된 공지사항이 없습니다." /> }.into_any()
            } else {
                notices
                    .into_iter()
                    .map(|notice| view! { <NoticeCard notice=notice can_author=can_author /> })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
