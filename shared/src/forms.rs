//! 表单模块
//!
//! 表单输入以原始字符串持有，提交前在此校验并转换为请求对象。
//! 校验失败返回 [`ApiError::Validation`]，不会产生任何网络请求。

use crate::client::{FilePart, FormValue, RequestBody};
use crate::error::{ApiError, ApiResult};
use crate::protocol::{
    CreateAlertRequest, CreateNoticeRequest, CreateProcessRequest, SignupRequest,
    UpdateProfileRequest,
};
use crate::{Role, UserProfile};

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// =========================================================
// 登录
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn to_form(&self) -> RequestBody {
        RequestBody::Form(vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ])
    }
}

// =========================================================
// 注册
// =========================================================

pub const SIGNUP_PLACEHOLDER_EMAIL: &str = "test@example.com";
pub const DEFAULT_TRADE_TYPE: &str = "없음";

#[derive(Debug, Clone, PartialEq)]
pub struct SignupForm {
    pub role: Role,
    /// 新建工地（仅管理员可选）
    pub create_site: bool,
    /// 下拉框中选中的工地 id（原始字符串）
    pub site_id: String,
    pub site_name: String,
    pub site_location: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub birth_date: String,
    pub gender: String,
    pub trade_type: String,
    pub phone: String,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            role: Role::Worker,
            create_site: false,
            site_id: String::new(),
            site_name: String::new(),
            site_location: String::new(),
            username: String::new(),
            password: String::new(),
            full_name: String::new(),
            birth_date: String::new(),
            gender: String::new(),
            trade_type: String::new(),
            phone: String::new(),
        }
    }
}

impl SignupForm {
    /// 工人不能新建工地
    pub fn creates_site(&self) -> bool {
        self.role == Role::Manager && self.create_site
    }

    /// 非数字或非正数的 id 视为未选择
    pub fn selected_site_id(&self) -> Option<i64> {
        if self.creates_site() {
            return None;
        }
        self.site_id.trim().parse::<i64>().ok().filter(|id| *id > 0)
    }

    pub fn validate(&self) -> ApiResult<SignupRequest> {
        let site_id = self.selected_site_id();
        match self.role {
            Role::Manager if !self.creates_site() && site_id.is_none() => {
                return Err(ApiError::validation(
                    "참여할 현장을 선택하거나 새 현장을 개설해주세요.",
                ));
            }
            Role::Worker if site_id.is_none() => {
                return Err(ApiError::validation(
                    "소속될 현장을 선택해주세요. (목록에 없으면 관리자에게 문의)",
                ));
            }
            _ => {}
        }

        let (site_name, site_location) = if self.creates_site() {
            let name = non_blank(&self.site_name)
                .ok_or_else(|| ApiError::validation("새 현장 이름을 입력해주세요."))?;
            (Some(name), Some(self.site_location.trim().to_string()))
        } else {
            (None, None)
        };

        Ok(SignupRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
            birth_date: self.birth_date.clone(),
            gender: self.gender.clone(),
            trade_type: non_blank(&self.trade_type).unwrap_or_else(|| DEFAULT_TRADE_TYPE.into()),
            phone: self.phone.trim().to_string(),
            email: SIGNUP_PLACEHOLDER_EMAIL.to_string(),
            role: self.role,
            site_id,
            site_name,
            site_location,
        })
    }
}

// =========================================================
// 公告 / 警报 / 缺陷 / 工序
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoticeDraft {
    pub title: String,
    pub content: String,
}

impl NoticeDraft {
    pub fn validate(&self) -> ApiResult<CreateNoticeRequest> {
        match (non_blank(&self.title), non_blank(&self.content)) {
            (Some(title), Some(content)) => Ok(CreateNoticeRequest { title, content }),
            _ => Err(ApiError::validation("제목과 내용을 입력해주세요.")),
        }
    }
}

/// 紧急警报的预设类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertCategory {
    #[default]
    MedicalEmergency,
    Fire,
    Accident,
    Other,
}

impl AlertCategory {
    pub const ALL: [AlertCategory; 4] = [
        AlertCategory::MedicalEmergency,
        AlertCategory::Fire,
        AlertCategory::Accident,
        AlertCategory::Other,
    ];

    /// 作为消息发送的文本
    pub fn message(&self) -> &'static str {
        match self {
            AlertCategory::MedicalEmergency => "응급환자 발생",
            AlertCategory::Fire => "화재 발생",
            AlertCategory::Accident => "사고 발생",
            AlertCategory::Other => "기타",
        }
    }

    /// 下拉框中显示的文本
    pub fn label(&self) -> &'static str {
        match self {
            AlertCategory::MedicalEmergency => "🚑 응급환자 발생",
            AlertCategory::Fire => "🔥 화재 발생",
            AlertCategory::Accident => "💥 사고 발생 (추락/협착 등)",
            AlertCategory::Other => "💬 기타 (직접 입력)",
        }
    }

    pub fn from_message(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.message() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlertDraft {
    pub category: AlertCategory,
    pub detail: String,
    pub location: String,
}

impl AlertDraft {
    pub fn validate(&self) -> ApiResult<CreateAlertRequest> {
        let message = if self.category == AlertCategory::Other {
            let detail = non_blank(&self.detail)
                .ok_or_else(|| ApiError::validation("기타 사유를 입력해주세요"))?;
            format!("[기타] {}", detail)
        } else {
            self.category.message().to_string()
        };
        let location_text =
            non_blank(&self.location).ok_or_else(|| ApiError::validation("위치를 입력해주세요"))?;
        Ok(CreateAlertRequest {
            message,
            location_text,
        })
    }
}

pub const ISSUE_DEFAULT_DESCRIPTION: &str = "상세 내용";
pub const ISSUE_DEFAULT_TYPE: &str = "기타";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueDraft {
    pub title: String,
}

impl IssueDraft {
    /// 目前只有标题可填写，其余字段使用固定值
    pub fn to_multipart(&self) -> ApiResult<RequestBody> {
        let title = non_blank(&self.title).ok_or_else(|| ApiError::validation("제목을 입력해주세요."))?;
        Ok(RequestBody::Multipart(vec![
            ("title".into(), FormValue::Text(title)),
            (
                "description".into(),
                FormValue::Text(ISSUE_DEFAULT_DESCRIPTION.into()),
            ),
            ("issue_type".into(), FormValue::Text(ISSUE_DEFAULT_TYPE.into())),
        ]))
    }
}

/// 图纸上传：标题取文件名
pub fn drawing_upload(file: FilePart) -> RequestBody {
    RequestBody::Multipart(vec![
        ("title".into(), FormValue::Text(file.file_name.clone())),
        ("file".into(), FormValue::File(file)),
    ])
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessDraft {
    pub location: String,
    pub work_name: String,
}

impl ProcessDraft {
    pub fn validate(&self) -> ApiResult<CreateProcessRequest> {
        match (non_blank(&self.location), non_blank(&self.work_name)) {
            (Some(location), Some(work_name)) => Ok(CreateProcessRequest {
                location,
                work_name,
            }),
            _ => Err(ApiError::validation("위치와 작업명을 입력해주세요.")),
        }
    }
}

/// 工人名单搜索输入
pub fn search_query(input: &str) -> ApiResult<String> {
    non_blank(input).ok_or_else(|| ApiError::validation("검색할 아이디를 입력해주세요."))
}

// =========================================================
// 个人资料
// =========================================================

pub const GENDER_OPTIONS: [(&str, &str); 3] = [("남", "남성"), ("여", "여성"), ("기타", "기타")];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileForm {
    pub full_name: String,
    pub birth_date: String,
    pub gender: String,
    pub trade_type: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl ProfileForm {
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            full_name: user.full_name.clone(),
            birth_date: user.birth_date.clone().unwrap_or_default(),
            gender: user.gender.clone().unwrap_or_default(),
            trade_type: user.trade_type.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            password: String::new(),
        }
    }

    /// 只发送非空字段，空字段由后端视为"不修改"
    pub fn to_update(&self) -> UpdateProfileRequest {
        UpdateProfileRequest {
            full_name: non_blank(&self.full_name),
            birth_date: non_blank(&self.birth_date),
            gender: non_blank(&self.gender),
            trade_type: non_blank(&self.trade_type),
            phone: non_blank(&self.phone),
            email: non_blank(&self.email),
            // 密码不做 trim
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_signup_requires_site_id() {
        let form = SignupForm {
            role: Role::Worker,
            username: "kim".into(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert!(err.is_validation());

        // 工人勾选"新建工地"无效
        let form = SignupForm {
            create_site: true,
            site_name: "새 현장".into(),
            ..form
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn non_numeric_site_id_counts_as_missing() {
        let form = SignupForm {
            role: Role::Manager,
            site_id: "abc".into(),
            ..Default::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn zero_site_id_counts_as_missing() {
        let form = SignupForm {
            role: Role::Worker,
            site_id: "0".into(),
            ..Default::default()
        };
        assert_eq!(form.selected_site_id(), None);
        assert!(form.validate().unwrap_err().is_validation());
    }

    #[test]
    fn manager_can_create_site_without_site_id() {
        let form = SignupForm {
            role: Role::Manager,
            create_site: true,
            site_id: "3".into(),
            site_name: " B현장 ".into(),
            site_location: "서울".into(),
            username: "boss".into(),
            ..Default::default()
        };
        let req = form.validate().unwrap();
        assert_eq!(req.site_id, None);
        assert_eq!(req.site_name.as_deref(), Some("B현장"));
        assert_eq!(req.site_location.as_deref(), Some("서울"));
        assert_eq!(req.trade_type, DEFAULT_TRADE_TYPE);
        assert_eq!(req.email, SIGNUP_PLACEHOLDER_EMAIL);
    }

    #[test]
    fn joining_existing_site_sends_numeric_id_only() {
        let form = SignupForm {
            role: Role::Worker,
            site_id: "12".into(),
            site_name: "ignored".into(),
            trade_type: "철근".into(),
            ..Default::default()
        };
        let req = form.validate().unwrap();
        assert_eq!(req.site_id, Some(12));
        assert_eq!(req.site_name, None);
        assert_eq!(req.trade_type, "철근");
    }

    #[test]
    fn alert_other_requires_detail_and_prefixes_message() {
        let draft = AlertDraft {
            category: AlertCategory::Other,
            detail: String::new(),
            location: "2층 계단실".into(),
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ApiError::validation("기타 사유를 입력해주세요")
        );

        let draft = AlertDraft {
            detail: "가스 냄새".into(),
            ..draft
        };
        assert_eq!(draft.validate().unwrap().message, "[기타] 가스 냄새");
    }

    #[test]
    fn alert_requires_location() {
        let draft = AlertDraft {
            category: AlertCategory::Fire,
            ..Default::default()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ApiError::validation("위치를 입력해주세요")
        );
        assert_eq!(AlertCategory::from_message("화재 발생"), Some(AlertCategory::Fire));
    }

    #[test]
    fn issue_multipart_uses_fixed_placeholders() {
        assert!(IssueDraft { title: "  ".into() }.to_multipart().is_err());

        let body = IssueDraft {
            title: "외벽 균열".into(),
        }
        .to_multipart()
        .unwrap();
        let RequestBody::Multipart(fields) = body else {
            panic!("expected multipart body");
        };
        let names: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["title", "description", "issue_type"]);
        assert_eq!(fields[1].1, FormValue::Text(ISSUE_DEFAULT_DESCRIPTION.into()));
    }

    #[test]
    fn notice_and_process_reject_blank_fields() {
        assert!(NoticeDraft {
            title: "안전교육".into(),
            content: " ".into()
        }
        .validate()
        .is_err());
        assert!(ProcessDraft {
            location: "3층".into(),
            work_name: String::new()
        }
        .validate()
        .is_err());
        assert!(search_query("   ").is_err());
        assert_eq!(search_query(" lee ").unwrap(), "lee");
    }

    #[test]
    fn profile_form_omits_empty_fields() {
        assert!(ProfileForm::default().to_update().is_empty());

        let form = ProfileForm {
            phone: "010-0000-0000".into(),
            gender: String::new(),
            password: "secret".into(),
            ..Default::default()
        };
        let update = form.to_update();
        assert_eq!(update.phone.as_deref(), Some("010-0000-0000"));
        assert_eq!(update.gender, None);
        assert_eq!(update.password.as_deref(), Some("secret"));
    }

    #[test]
    fn drawing_upload_titles_by_file_name() {
        let body = drawing_upload(FilePart {
            file_name: "1층 평면도.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: vec![1, 2, 3],
        });
        let RequestBody::Multipart(fields) = body else {
            panic!("expected multipart body");
        };
        assert_eq!(fields[0].1, FormValue::Text("1층 평면도.pdf".into()));
        assert!(matches!(fields[1].1, FormValue::File(_)));
    }
}
