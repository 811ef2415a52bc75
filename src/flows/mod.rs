//! Request/response workflows behind the pages.
//!
//! Every form runs `Idle → Validating → Submitting → {Succeeded, Failed} →
//! Idle`; a failed validation skips `Submitting` and never reaches the
//! backend.

pub(crate) mod actions;
pub(crate) mod auth;
pub(crate) mod listing;
pub(crate) mod upload;

#[cfg(test)]
pub(crate) mod testing;

use crate::api::{ApiError, ApiResult};
use crate::validation::ValidationError;
use std::future::Future;

/// Delay before navigating away after a successful form.
pub(crate) const REDIRECT_DELAY_MS: u32 = 2000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum FlowState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl FlowState {
    pub fn is_busy(self) -> bool {
        self == FlowState::Submitting
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlashKind {
    Success,
    Info,
    Error,
}

/// One line of user feedback for the message banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }

    /// Server text (after `prefix`) for application failures, `offline` for
    /// everything that never got an answer.
    pub fn from_api_error(err: &ApiError, prefix: &str, offline: &str) -> Self {
        match err.server_message() {
            Some(message) => Self::error(format!("{prefix}{message}")),
            None => {
                log::error!("{err}");
                Self::error(offline)
            }
        }
    }
}

/// Counter stamped on each request or timer; only the latest stamp may
/// touch the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn is_current(self, latest: Generation) -> bool {
        self == latest
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Redirect {
    pub path: &'static str,
    pub delay_ms: u32,
}

/// Fixed texts of one form.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FormMessages {
    pub success: &'static str,
    pub failure_prefix: &'static str,
    pub offline: &'static str,
    pub redirect_to: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FormOutcome<T> {
    pub flash: Flash,
    pub redirect: Option<Redirect>,
    pub payload: Option<T>,
}

impl<T> FormOutcome<T> {
    fn failed(flash: Flash) -> Self {
        Self {
            flash,
            redirect: None,
            payload: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.payload.is_some()
    }
}

/// Drives one form submission through the state machine.
///
/// `submit` only runs when `validate` passes. `on_phase` sees every
/// transition, ending with `Idle` whatever the outcome.
pub(crate) async fn run_form<R, T, Fut>(
    messages: &FormMessages,
    on_phase: impl Fn(FlowState),
    validate: impl FnOnce() -> Result<R, ValidationError>,
    submit: impl FnOnce(R) -> Fut,
) -> FormOutcome<T>
where
    Fut: Future<Output = ApiResult<T>>,
{
    on_phase(FlowState::Validating);

    let outcome = match validate() {
        Err(e) => {
            on_phase(FlowState::Failed);
            FormOutcome::failed(Flash::error(e.to_string()))
        }
        Ok(request) => {
            on_phase(FlowState::Submitting);
            match submit(request).await {
                Ok(payload) => {
                    on_phase(FlowState::Succeeded);
                    FormOutcome {
                        flash: Flash::success(messages.success),
                        redirect: Some(Redirect {
                            path: messages.redirect_to,
                            delay_ms: REDIRECT_DELAY_MS,
                        }),
                        payload: Some(payload),
                    }
                }
                Err(e) => {
                    on_phase(FlowState::Failed);
                    FormOutcome::failed(Flash::from_api_error(
                        &e,
                        messages.failure_prefix,
                        messages.offline,
                    ))
                }
            }
        }
    };

    on_phase(FlowState::Idle);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    const MESSAGES: FormMessages = FormMessages {
        success: "ok",
        failure_prefix: "失败：",
        offline: "offline",
        redirect_to: "/next",
    };

    fn run(
        validated: Result<u8, ValidationError>,
        result: ApiResult<u8>,
    ) -> (FormOutcome<u8>, Vec<FlowState>, bool) {
        let phases = RefCell::new(Vec::new());
        let submitted = RefCell::new(false);
        let outcome = {
            let submitted = &submitted;
            block_on(run_form(
                &MESSAGES,
                |p| phases.borrow_mut().push(p),
                || validated,
                move |_| {
                    *submitted.borrow_mut() = true;
                    async move { result }
                },
            ))
        };
        (outcome, phases.into_inner(), submitted.into_inner())
    }

    #[test]
    fn test_validation_failure_skips_submit() {
        let (outcome, phases, submitted) = run(Err(ValidationError::MissingTitle), Ok(1));
        assert!(!submitted);
        assert_eq!(
            phases,
            vec![FlowState::Validating, FlowState::Failed, FlowState::Idle]
        );
        assert_eq!(outcome.flash, Flash::error("请输入笔记标题"));
        assert!(outcome.redirect.is_none());
    }

    #[test]
    fn test_success_path() {
        let (outcome, phases, submitted) = run(Ok(1), Ok(9));
        assert!(submitted);
        assert_eq!(
            phases,
            vec![
                FlowState::Validating,
                FlowState::Submitting,
                FlowState::Succeeded,
                FlowState::Idle
            ]
        );
        assert_eq!(outcome.flash, Flash::success("ok"));
        assert_eq!(
            outcome.redirect,
            Some(Redirect {
                path: "/next",
                delay_ms: 2000
            })
        );
        assert_eq!(outcome.payload, Some(9));
    }

    #[test]
    fn test_application_failure_keeps_server_text() {
        let err = ApiError::Application {
            status: 200,
            message: "用户名或密码错误".to_string(),
        };
        let (outcome, phases, _) = run(Ok(1), Err(err));
        assert_eq!(phases.last(), Some(&FlowState::Idle));
        assert_eq!(outcome.flash, Flash::error("失败：用户名或密码错误"));
        assert!(!outcome.succeeded());
    }

    #[test]
    fn test_transport_and_decode_failures_are_generic() {
        let (outcome, _, _) = run(Ok(1), Err(ApiError::transport("Failed to fetch")));
        assert_eq!(outcome.flash, Flash::error("offline"));

        let (outcome, _, _) = run(Ok(1), Err(ApiError::Decode("eof".to_string())));
        assert_eq!(outcome.flash, Flash::error("offline"));
    }

    #[test]
    fn test_superseded_generation_is_stale() {
        let mut latest = Generation::default();
        let first = latest.next();
        latest = first;
        let second = latest.next();
        latest = second;

        assert!(!first.is_current(latest));
        assert!(second.is_current(latest));
        assert_ne!(first, second);
    }

    #[test]
    fn test_generation_wraps() {
        let last = Generation(u64::MAX);
        assert_eq!(last.next(), Generation(0));
        assert!(!last.is_current(last.next()));
    }

    #[test]
    fn test_only_submitting_is_busy() {
        assert!(FlowState::Submitting.is_busy());
        assert!(!FlowState::Validating.is_busy());
        assert!(!FlowState::Idle.is_busy());
    }
}
