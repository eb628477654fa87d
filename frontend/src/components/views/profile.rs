use leptos::prelude::*;
use leptos::task::spawn_local;

use sitelink_shared::UserProfile;
use sitelink_shared::forms::{GENDER_OPTIONS, ProfileForm};
use sitelink_shared::route::ViewKind;

use crate::auth::{update_user, use_auth};
use crate::components::view_host::use_view_actions;
use crate::web::router::use_router;

/// 一行"标签 + 输入框"
#[component]
fn LabeledInput(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] kind: &'static str,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <span class="label-text">{label}</span>
            <input type=kind class="input input-bordered w-full"
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=move || value.get()
            />
        </label>
    }
}

#[component]
pub fn ProfileView(user: UserProfile) -> impl IntoView {
    let auth = use_auth();
    let actions = use_view_actions();
    let router = use_router();

    let initial = ProfileForm::from_user(&user);
    let full_name = RwSignal::new(initial.full_name);
    let birth_date = RwSignal::new(initial.birth_date);
    let gender = RwSignal::new(initial.gender);
    let trade_type = RwSignal::new(initial.trade_type);
    let phone = RwSignal::new(initial.phone);
    let email = RwSignal::new(initial.email);
    let password = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = ProfileForm {
            full_name: full_name.get_untracked(),
            birth_date: birth_date.get_untracked(),
            gender: gender.get_untracked(),
            trade_type: trade_type.get_untracked(),
            phone: phone.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let api = actions.api();
        let toasts = actions.toasts();
        spawn_local(async move {
            match api.update_me(&form.to_update()).await {
                Ok(updated) => {
                    update_user(&auth, updated);
                    toasts.success("개인정보가 수정되었습니다.");
                    router.open(ViewKind::Dashboard);
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let gender_options = GENDER_OPTIONS
        .into_iter()
        .map(|(value, label)| {
            view! { <option value=value selected=move || gender.get() == value>{label}</option> }
        })
        .collect_view();

    view! {
        <form class="card bg-base-100 shadow-xl max-w-2xl" on:submit=on_submit>
            <div class="card-body space-y-2">
                <label class="form-control w-full">
                    <span class="label-text">"아이디"</span>
                    <input type="text" class="input input-bordered w-full" value=user.username readonly=true />
                </label>
                <LabeledInput label="이름" value=full_name />
                <div class="grid grid-cols-2 gap-4">
                    <LabeledInput label="생년월일" value=birth_date kind="date" />
                    <label class="form-control w-full">
                        <span class="label-text">"성별"</span>
                        <select class="select select-bordered w-full"
                            on:change=move |ev| gender.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || gender.get().is_empty()>"선택"</option>
                            {gender_options}
                        </select>
                    </label>
                </div>
                <LabeledInput label="공종" value=trade_type />
                <div class="grid grid-cols-2 gap-4">
                    <LabeledInput label="전화번호" value=phone kind="tel" />
                    <LabeledInput label="이메일" value=email kind="email" />
                </div>
                <LabeledInput label="새 비밀번호 (변경 시에만 입력)" value=password kind="password" />
                <div class="card-actions justify-end">
                    <button type="button" class="btn btn-ghost"
                        on:click=move |_| router.open(ViewKind::Dashboard)
                    >"취소"</button>
                    <button type="submit" class="btn btn-primary">"저장"</button>
                </div>
            </div>
        </form>
    }
}
