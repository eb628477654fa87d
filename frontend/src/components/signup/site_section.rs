//! 角色与工地选择
//!
//! 管理员可以加入现有工地或新建工地；工人只能从列表中选择。

use leptos::prelude::*;
use sitelink_shared::{Role, Site};

use super::form_state::FormState;

#[component]
pub fn SiteSection(state: FormState, sites: ReadSignal<Vec<Site>>) -> impl IntoView {
    let is_manager = move || state.role.get() == Role::Manager;
    let creating = move || is_manager() && state.create_site.get();

    view! {
        <div class="form-control">
            <label class="label"><span class="label-text">"역할"</span></label>
            <div class="flex gap-4">
                <label class="label cursor-pointer gap-2">
                    <input type="radio" name="role" class="radio radio-primary"
                        prop:checked=move || state.role.get() == Role::Worker
                        on:change=move |_| state.set_role(Role::Worker)
                    />
                    <span class="label-text">"근로자"</span>
                </label>
                <label class="label cursor-pointer gap-2">
                    <input type="radio" name="role" class="radio radio-primary"
                        prop:checked=is_manager
                        on:change=move |_| state.set_role(Role::Manager)
                    />
                    <span class="label-text">"관리자"</span>
                </label>
            </div>
        </div>

        <Show when=is_manager>
            <div class="form-control">
                <label class="label cursor-pointer">
                    <span class="label-text">"새 현장 개설"</span>
                    <input type="checkbox" class="toggle toggle-primary"
                        prop:checked=move || state.create_site.get()
                        on:change=move |ev| state.create_site.set(event_target_checked(&ev))
                    />
                </label>
            </div>
        </Show>

        {move || if creating() {
            view! {
                <div class="grid grid-cols-2 gap-4">
                    <input type="text" placeholder="새 현장 이름" class="input input-bordered w-full"
                        on:input=move |ev| state.site_name.set(event_target_value(&ev))
                        prop:value=move || state.site_name.get()
                    />
                    <input type="text" placeholder="현장 위치" class="input input-bordered w-full"
                        on:input=move |ev| state.site_location.set(event_target_value(&ev))
                        prop:value=move || state.site_location.get()
                    />
                </div>
            }.into_any()
        } else {
            view! {
                <select class="select select-bordered w-full"
                    on:change=move |ev| state.site_id.set(event_target_value(&ev))
                >
                    <option value="" selected=move || state.site_id.get().is_empty()>"현장 선택"</option>
                    <For
                        each=move || sites.get()
                        key=|site| site.id
                        children=move |site| {
                            let value = site.id.to_string();
                            let selected = {
                                let value = value.clone();
                                move || state.site_id.get() == value
                            };
                            view! { <option value=value selected=selected>{site.label()}</option> }
                        }
                    />
                </select>
            }.into_any()
        }}
    }
}
