use leptos::prelude::*;
use leptos::task::spawn_local;

use sitelink_shared::Site;
use sitelink_shared::auth::{self, SIGNUP_SUCCESS_MESSAGE};

use crate::auth::use_auth;
use crate::components::login::{AuthFrame, AuthTabs};
use crate::toast::use_toasts;
use crate::web::router::use_router;

mod form_state;
mod personal_section;
mod site_section;

use form_state::FormState;
use personal_section::PersonalSection;
use site_section::SiteSection;

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let router = use_router();

    let state = FormState::new();
    let (sites, set_sites) = signal(Vec::<Site>::new());
    let (loading, set_loading) = signal(false);

    // 打开注册页时加载工地列表
    spawn_local(async move {
        set_sites.set(auth::signup_sites(&auth.public_api()).await);
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = state.snapshot();
        set_loading.set(true);
        spawn_local(async move {
            match auth::signup(&auth.public_api(), &form).await {
                Ok(()) => {
                    toasts.success(SIGNUP_SUCCESS_MESSAGE);
                    router.navigate("/login");
                }
                Err(e) => toasts.error(e.to_string()),
            }
            set_loading.set(false);
        });
    };

    view! {
        <AuthFrame>
            <AuthTabs signup_active=true />
            <form on:submit=on_submit class="space-y-4">
                <SiteSection state=state sites=sites />
                <PersonalSection state=state />
                <button type="submit" class="btn btn-primary w-full" disabled=move || loading.get()>
                    {move || if loading.get() {
                        view! { <span class="loading loading-spinner"></span> "처리 중..." }.into_any()
                    } else {
                        "가입하기".into_any()
                    }}
                </button>
            </form>
        </AuthFrame>
    }
}
