use super::{run_form, FlowState, FormMessages, FormOutcome};
use crate::api::{ApiError, NoteBackend};
use crate::models::UserSession;
use crate::storage::SessionStore;
use crate::validation::{LoginForm, RegistrationForm};

const OFFLINE: &str = "网络错误，请检查后端服务是否启动";

pub(crate) const REGISTER_MESSAGES: FormMessages = FormMessages {
    success: "注册成功！正在跳转到登录页面...",
    failure_prefix: "注册失败：",
    offline: OFFLINE,
    redirect_to: "/login",
};

pub(crate) const LOGIN_MESSAGES: FormMessages = FormMessages {
    success: "登录成功！正在跳转到首页...",
    failure_prefix: "登录失败：",
    offline: OFFLINE,
    redirect_to: "/",
};

pub(crate) async fn register<B: NoteBackend>(
    backend: &B,
    form: &RegistrationForm,
    on_phase: impl Fn(FlowState),
) -> FormOutcome<()> {
    run_form(
        &REGISTER_MESSAGES,
        on_phase,
        || form.validate(),
        |req| async move { backend.register(&req).await },
    )
    .await
}

/// On success the login payload is written to `store` before returning.
pub(crate) async fn login<B: NoteBackend, S: SessionStore>(
    backend: &B,
    store: &S,
    form: &LoginForm,
    on_phase: impl Fn(FlowState),
) -> FormOutcome<UserSession> {
    run_form(
        &LOGIN_MESSAGES,
        on_phase,
        || form.validate(),
        |req| async move {
            let session = backend.login(&req).await?;
            store.save(&session);
            log::info!("logged in as {}", session.username);
            Ok::<_, ApiError>(session)
        },
    )
    .await
}

/// Drops the local record first; the backend call only invalidates the
/// server-side session and its outcome does not matter.
pub(crate) async fn logout<B: NoteBackend, S: SessionStore>(backend: &B, store: &S) {
    store.clear();
    if let Err(e) = backend.logout().await {
        log::warn!("backend logout failed: {e}");
    }
}
