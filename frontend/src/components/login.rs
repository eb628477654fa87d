use leptos::prelude::*;
use leptos::task::spawn_local;

use sitelink_shared::auth::LOGIN_SUCCESS_MESSAGE;
use sitelink_shared::forms::Credentials;

use crate::auth::{login, use_auth};
use crate::toast::use_toasts;
use crate::web::router::use_router;

/// 登录 / 注册切换标签
#[component]
pub fn AuthTabs(signup_active: bool) -> impl IntoView {
    let router = use_router();
    let tab = move |active: bool| if active { "tab tab-active" } else { "tab" };

    view! {
        <div role="tablist" class="tabs tabs-boxed mb-4">
            <a role="tab" class=tab(!signup_active) on:click=move |_| router.navigate("/login")>
                "로그인"
            </a>
            <a role="tab" class=tab(signup_active) on:click=move |_| router.navigate("/signup")>
                "회원가입"
            </a>
        </div>
    }
}

/// 登录与注册页面共用的外框
#[component]
pub fn AuthFrame(children: Children) -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Smart Site"</h1>
                    <p class="text-base-content/70">"스마트 건설 현장 관리"</p>
                </div>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <div class="card-body">{children()}</div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);

        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            // 成功后路由守卫会自动跳转到仪表盘
            match login(&auth, credentials).await {
                Ok(()) => toasts.success(LOGIN_SUCCESS_MESSAGE),
                Err(e) => toasts.error(e.to_string()),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <AuthFrame>
            <AuthTabs signup_active=false />
            <form on:submit=on_submit>
                <div class="form-control">
                    <label class="label" for="login-username">
                        <span class="label-text">"아이디"</span>
                    </label>
                    <input
                        id="login-username"
                        type="text"
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                        prop:value=username
                        class="input input-bordered"
                        required
                    />
                </div>
                <div class="form-control">
                    <label class="label" for="login-password">
                        <span class="label-text">"비밀번호"</span>
                    </label>
                    <input
                        id="login-password"
                        type="password"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        class="input input-bordered"
                        required
                    />
                </div>
                <div class="form-control mt-6">
                    <button class="btn btn-primary" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "로그인 중..." }.into_any()
                        } else {
                            "로그인".into_any()
                        }}
                    </button>
                </div>
            </form>
        </AuthFrame>
    }
}
