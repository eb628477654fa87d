use leptos::prelude::*;
use sitelink_shared::forms::GENDER_OPTIONS;

use super::form_state::FormState;

/// 文本输入框，绑定到一个字段
#[component]
fn Field(
    value: RwSignal<String>,
    placeholder: &'static str,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <input
            type=kind
            placeholder=placeholder
            required=required
            class="input input-bordered w-full"
            on:input=move |ev| value.set(event_target_value(&ev))
            prop:value=move || value.get()
        />
    }
}

#[component]
pub fn PersonalSection(state: FormState) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 gap-4">
            <Field value=state.username placeholder="아이디" required=true />
            <Field value=state.password placeholder="비밀번호" kind="password" required=true />
        </div>
        <div class="grid grid-cols-2 gap-4">
            <Field value=state.full_name placeholder="이름" required=true />
            <Field value=state.birth_date placeholder="생년월일" kind="date" />
        </div>
        <div class="grid grid-cols-2 gap-4">
            <select class="select select-bordered w-full"
                on:change=move |ev| state.gender.set(event_target_value(&ev))
            >
                <option value="">"성별 선택"</option>
                {GENDER_OPTIONS
                    .into_iter()
                    .map(|(value, label)| view! {
                        <option value=value selected=move || state.gender.get() == value>{label}</option>
                    })
                    .collect_view()}
            </select>
            <Field value=state.trade_type placeholder="담당 공종 (예: 철근)" />
        </div>
        <Field value=state.phone placeholder="연락처" kind="tel" />
    }
}
