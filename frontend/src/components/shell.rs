use leptos::prelude::*;

use sitelink_shared::date::{dot_date, today};
use sitelink_shared::route::{MenuClick, ViewKind};

use crate::auth::{logout, use_auth};
use crate::components::view_host::ViewHost;
use crate::web::router::use_router;

#[component]
fn Sidebar(current: Memo<ViewKind>, reload: RwSignal<u32>) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let items = move || {
        auth.session.with(|session| {
            ViewKind::ALL
                .into_iter()
                .filter(|kind| kind.visible_to(session))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <ul class="menu bg-base-100 rounded-box w-56 shadow">
            <For
                each=items
                key=|kind| *kind
                children=move |kind| {
                    let class = move || if current.get() == kind { "active" } else { "" };
                    let on_click = move |_| {
                        match MenuClick::resolve(router.current_route().get_untracked(), kind) {
                            MenuClick::Reload => reload.update(|n| *n = n.wrapping_add(1)),
                            MenuClick::Navigate(_) => router.open(kind),
                        }
                    };
                    view! {
                        <li>
                            <a class=class on:click=on_click>
                                <span>{kind.icon()}</span>
                                {kind.title()}
                            </a>
                        </li>
                    }
                }
            />
            <li class="mt-4">
                <a class="text-error" on:click=move |_| logout(&auth)>"🚪 로그아웃"</a>
            </li>
        </ul>
    }
}

#[component]
fn Header(current: Memo<ViewKind>) -> impl IntoView {
    let auth = use_auth();
    let user = move || auth.user();

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 flex-col items-start">
                <span class="text-sm text-base-content/60">{dot_date(today())}</span>
                <h2 class="text-xl font-bold">{move || current.get().title()}</h2>
            </div>
            <div class="flex-none gap-3 items-center">
                <span class="badge badge-neutral hidden md:inline-flex">
                    {move || {
                        user()
                            .and_then(|u| u.site_id)
                            .map(|id| format!("Site #{}", id))
                            .unwrap_or_default()
                    }}
                </span>
                <div class="avatar placeholder">
                    <div class="bg-primary text-primary-content rounded-full w-10">
                        <span>{move || user().map(|u| u.initial()).unwrap_or_default()}</span>
                    </div>
                </div>
                <div class="flex flex-col">
                    <span class="font-bold">
                        {move || user().map(|u| u.display_name().to_string()).unwrap_or_default()}
                    </span>
                    <span class="text-xs text-base-content/60">
                        {move || user().map(|u| u.role.as_str().to_uppercase()).unwrap_or_default()}
                    </span>
                </div>
            </div>
        </div>
    }
}

/// 已登录的主界面
#[component]
pub fn AppShell() -> impl IntoView {
    let current = use_router().current_view();
    // 视图与侧边栏共用，重复点击当前菜单时触发重新加载
    let reload = RwSignal::new(0u32);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto flex gap-6">
                <Sidebar current=current reload=reload />
                <main class="flex-1 space-y-6">
                    <Header current=current />
                    <ViewHost kind=current reload=reload />
                </main>
            </div>
        </div>
    }
}
