//! Local form checks. Each validator stops at the first failing rule.

use crate::api::{LoginRequest, RegisterRequest};
use crate::models::FileKind;
use regex::Regex;
use std::sync::OnceLock;

pub(crate) const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ValidationError {
    #[error("用户名长度应为3-20个字符")]
    UsernameLength,
    #[error("请输入有效的邮箱地址")]
    InvalidEmail,
    #[error("密码长度至少6位")]
    PasswordTooShort,
    #[error("两次输入的密码不一致！")]
    PasswordMismatch,
    #[error("请输入用户名")]
    MissingUsername,
    #[error("请输入密码")]
    MissingPassword,
    #[error("请输入笔记标题")]
    MissingTitle,
    #[error("请选择课程")]
    MissingCourse,
    #[error("请选择要上传的文件")]
    MissingFile,
    #[error("不支持的文件类型，请选择PDF或图片文件")]
    UnsupportedFileType,
    #[error("文件大小不能超过10MB")]
    FileTooLarge,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

pub(crate) fn is_valid_username(username: &str) -> bool {
    (3..=20).contains(&username.chars().count())
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub(crate) fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 6
}

/// Raw register form fields.
#[derive(Clone, Debug, Default)]
pub(crate) struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        let username = self.username.trim();
        let email = self.email.trim();

        if !is_valid_username(username) {
            return Err(ValidationError::UsernameLength);
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_valid_password(&self.password) {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(LoginRequest {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Metadata of the file picked in the upload form.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PickedFile {
    pub name: String,
    pub size: u64,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct UploadForm {
    pub title: String,
    pub description: String,
    /// Value of the course `<select>`; empty means nothing chosen.
    pub course_id: String,
    pub file: Option<PickedFile>,
}

/// Upload fields that passed validation; the file bytes are read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ValidUpload {
    pub title: String,
    pub description: String,
    pub course_id: i64,
    pub file: PickedFile,
}

impl UploadForm {
    pub fn validate(&self) -> Result<ValidUpload, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let course_id = self
            .course_id
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::MissingCourse)?;

        let file = self.file.as_ref().ok_or(ValidationError::MissingFile)?;
        if FileKind::from_file_name(&file.name).is_none() {
            return Err(ValidationError::UnsupportedFileType);
        }
        if file.size > MAX_UPLOAD_BYTES {
            return Err(ValidationError::FileTooLarge);
        }

        Ok(ValidUpload {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            course_id,
            file: file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: &str, email: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_username_length_bounds() {
        for name in ["", "ab", "abcdefghijklmnopqrstu"] {
            let err = registration(name, "a@b.co", "secret1", "secret1")
                .validate()
                .unwrap_err();
            assert_eq!(err, ValidationError::UsernameLength, "username {name:?}");
        }
        for name in ["abc", "abcdefghijklmnopqrst", "张三丰"] {
            assert!(registration(name, "a@b.co", "secret1", "secret1").validate().is_ok());
        }
    }

    #[test]
    fn test_username_is_trimmed_before_length_check() {
        let err = registration("  ab  ", "a@b.co", "secret1", "secret1")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::UsernameLength);
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("alice@example.com"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("alice example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Bad email and mismatched passwords: only the email rule is reported.
        let err = registration("alice", "nope", "123", "456").validate().unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
    }

    #[test]
    fn test_password_mismatch_message() {
        let err = registration("alice", "a@b.co", "secret1", "secret2")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::PasswordMismatch);
        assert_eq!(err.to_string(), "两次输入的密码不一致！");
    }

    #[test]
    fn test_short_password() {
        let err = registration("alice", "a@b.co", "12345", "12345").validate().unwrap_err();
        assert_eq!(err, ValidationError::PasswordTooShort);
    }

    #[test]
    fn test_valid_registration_builds_request() {
        let req = registration(" alice ", " a@b.co ", "secret1", "secret1")
            .validate()
            .unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.email, "a@b.co");
        assert_eq!(req.confirm_password, "secret1");
    }

    #[test]
    fn test_login_presence_checks() {
        let form = LoginForm {
            username: "   ".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::MissingUsername);

        let form = LoginForm {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate().unwrap_err(), ValidationError::MissingPassword);
    }

    fn upload(title: &str, course: &str, file: Option<(&str, u64)>) -> UploadForm {
        UploadForm {
            title: title.to_string(),
            description: " 期末复习 ".to_string(),
            course_id: course.to_string(),
            file: file.map(|(name, size)| PickedFile {
                name: name.to_string(),
                size,
            }),
        }
    }

    #[test]
    fn test_upload_rules_in_order() {
        assert_eq!(
            upload("", "", None).validate().unwrap_err(),
            ValidationError::MissingTitle
        );
        assert_eq!(
            upload("t", "", None).validate().unwrap_err(),
            ValidationError::MissingCourse
        );
        assert_eq!(
            upload("t", "2", None).validate().unwrap_err(),
            ValidationError::MissingFile
        );
        assert_eq!(
            upload("t", "2", Some(("a.docx", 10))).validate().unwrap_err(),
            ValidationError::UnsupportedFileType
        );
        assert_eq!(
            upload("t", "2", Some(("a.pdf", MAX_UPLOAD_BYTES + 1)))
                .validate()
                .unwrap_err(),
            ValidationError::FileTooLarge
        );
    }

    #[test]
    fn test_upload_accepts_exact_limit_and_upper_case_extension() {
        let valid = upload(" 笔记 ", "2", Some(("SCAN.PNG", MAX_UPLOAD_BYTES)))
            .validate()
            .unwrap();
        assert_eq!(valid.title, "笔记");
        assert_eq!(valid.description, "期末复习");
        assert_eq!(valid.course_id, 2);
    }
}
