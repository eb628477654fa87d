use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

use sitelink_shared::{ApiError, Drawing};

use super::EmptyState;
use crate::components::view_host::use_view_actions;
use crate::web::blob;
use crate::web::dom::confirm;

#[derive(Debug, Clone, PartialEq)]
enum Preview {
    Loading,
    Ready(String),
    Failed,
}

/// 带令牌获取的图片预览
///
/// 卸载时回收 Object URL。
#[component]
fn AuthImage(drawing: Drawing) -> impl IntoView {
    let api = use_view_actions().api();
    let preview = RwSignal::new(Preview::Loading);
    let object_url = StoredValue::new(None::<String>);

    spawn_local(async move {
        let result = match api.drawing_file(&drawing).await {
            Ok(binary) => blob::object_url(&binary),
            Err(e) => Err(e),
        };
        match result {
            Ok(url) => {
                // 组件已卸载则立即回收
                if preview.try_set(Preview::Ready(url.clone())).is_some() {
                    blob::revoke(&url);
                } else {
                    object_url.set_value(Some(url));
                }
            }
            Err(e) => {
                log::warn!("preview for drawing {} failed: {}", drawing.id, e);
                preview.set(Preview::Failed);
            }
        }
    });

    on_cleanup(move || {
        if let Some(url) = object_url.try_get_value().flatten() {
            blob::revoke(&url);
        }
    });

    move || match preview.get() {
        Preview::Loading => view! { <div class="skeleton h-48 w-full"></div> }.into_any(),
        Preview::Ready(url) => {
            view! { <img src=url class="h-48 w-full object-contain" alt="도면" /> }.into_any()
        }
        Preview::Failed => view! {
            <div class="h-48 flex items-center justify-center bg-base-200 text-error">
                "이미지 로드 실패"
            </div>
        }
        .into_any(),
    }
}

#[component]
fn UploadForm() -> impl IntoView {
    let actions = use_view_actions();
    let file_input = NodeRef::<Input>::new();

    let on_upload = move |_| {
        let Some(file) = file_input
            .get()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        actions.run(None, move |api| async move {
            let part = blob::read_file(&file).await?;
            api.upload_drawing(part).await
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body flex-row items-center gap-4">
                <input type="file" node_ref=file_input class="file-input file-input-bordered w-full" />
                <button class="btn btn-primary" on:click=on_upload>"업로드"</button>
            </div>
        </div>
    }
}

#[component]
fn DrawingCard(drawing: Drawing, can_manage: bool) -> impl IntoView {
    let actions = use_view_actions();
    let id = drawing.id;

    let preview = if drawing.is_image() {
        view! { <AuthImage drawing=drawing.clone() /> }.into_any()
    } else {
        view! { <div class="text-6xl text-primary my-6">"📄"</div> }.into_any()
    };

    let on_download = {
        let drawing = drawing.clone();
        move |_| {
            let api = actions.api();
            let toasts = actions.toasts();
            let drawing = drawing.clone();
            spawn_local(async move {
                let saved = match api.drawing_file(&drawing).await {
                    Ok(binary) => blob::save(&binary, drawing.download_name()),
                    Err(e) => Err::<(), ApiError>(e),
                };
                match saved {
                    Ok(()) => toasts.success("도면 다운로드 완료!"),
                    Err(e) => toasts.error(e.to_string()),
                }
            });
        }
    };

    let on_delete = move |_| {
        if confirm("삭제?") {
            actions.run(None, move |api| async move { api.delete_drawing(id).await });
        }
    };

    view! {
        <div class="card bg-base-100 shadow text-center">
            <div class="card-body items-center">
                {preview}
                <h4 class="font-bold">{drawing.title}</h4>
                <button class="btn btn-sm btn-info" on:click=on_download>"다운로드"</button>
                <Show when=move || can_manage>
                    <button class="btn btn-ghost btn-sm text-error" on:click=on_delete>"❌ 삭제"</button>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn DrawingsView(drawings: Vec<Drawing>, can_manage: bool) -> impl IntoView {
    let is_empty = drawings.is_empty();

    view! {
        <Show when=move || can_manage>
            <UploadForm />
        </Show>
        <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mt-5">
            {if is_empty {
                view! { <EmptyState message="등록된 도면이 없습니다." /> }.into_any()
            } else {
                drawings
                    .into_iter()
                    .map(|drawing| view! { <DrawingCard drawing=drawing can_manage=can_manage /> })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
