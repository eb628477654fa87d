//! 注册表单状态
//!
//! 把零散的 signal 整合为 `FormState`，负责数据的持有、重置，
//! 以及转换为共享库的 [`SignupForm`]（校验在那里完成）。

use leptos::prelude::*;
use sitelink_shared::Role;
use sitelink_shared::forms::SignupForm;

/// 使用 `RwSignal` 因为它实现了 `Copy`，便于作为 Props 在子组件间传递
#[derive(Clone, Copy)]
pub struct FormState {
    // 工地
    pub role: RwSignal<Role>,
    pub create_site: RwSignal<bool>,
    pub site_id: RwSignal<String>,
    pub site_name: RwSignal<String>,
    pub site_location: RwSignal<String>,

    // 个人信息
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub full_name: RwSignal<String>,
    pub birth_date: RwSignal<String>,
    pub gender: RwSignal<String>,
    pub trade_type: RwSignal<String>,
    pub phone: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        let form = SignupForm::default();
        Self {
            role: RwSignal::new(form.role),
            create_site: RwSignal::new(form.create_site),
            site_id: RwSignal::new(form.site_id),
            site_name: RwSignal::new(form.site_name),
            site_location: RwSignal::new(form.site_location),
            username: RwSignal::new(form.username),
            password: RwSignal::new(form.password),
            full_name: RwSignal::new(form.full_name),
            birth_date: RwSignal::new(form.birth_date),
            gender: RwSignal::new(form.gender),
            trade_type: RwSignal::new(form.trade_type),
            phone: RwSignal::new(form.phone),
        }
    }

    /// 选择工人时关闭"新建工地"
    pub fn set_role(&self, role: Role) {
        self.role.set(role);
        if role == Role::Worker {
            self.create_site.set(false);
        }
    }

    pub fn snapshot(&self) -> SignupForm {
        SignupForm {
            role: self.role.get_untracked(),
            create_site: self.create_site.get_untracked(),
            site_id: self.site_id.get_untracked(),
            site_name: self.site_name.get_untracked(),
            site_location: self.site_location.get_untracked(),
            username: self.username.get_untracked(),
            password: self.password.get_untracked(),
            full_name: self.full_name.get_untracked(),
            birth_date: self.birth_date.get_untracked(),
            gender: self.gender.get_untracked(),
            trade_type: self.trade_type.get_untracked(),
            phone: self.phone.get_untracked(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
