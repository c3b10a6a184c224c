//! Dashboard routes: message log, send form and sync button.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use database::ChatMessage;
use serde::Deserialize;
use tracing::warn;

use crate::error::Result;
use crate::state::AppState;

/// Number of log entries shown on the dashboard.
pub const DASHBOARD_LIMIT: i64 = 50;

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub messages: Vec<ChatMessage>,
    pub form: SendForm,
    pub notice: Option<Notice>,
}

/// Send form fields, kept on validation errors so the operator can fix them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub message: String,
}

/// One-shot banner shown above the form.
#[derive(Debug, Clone)]
pub struct Notice {
    /// CSS level: "success", "info" or "danger".
    pub level: &'static str,
    pub text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            level: "success",
            text: text.into(),
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Self {
            level: "info",
            text: text.into(),
        }
    }

    fn danger(text: impl Into<String>) -> Self {
        Self {
            level: "danger",
            text: text.into(),
        }
    }
}

/// Banner selected by the redirect that follows a form post.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub count: Option<usize>,
    pub detail: Option<String>,
}

impl NoticeQuery {
    fn into_notice(self) -> Option<Notice> {
        let notice = match self.notice.as_deref()? {
            "sent" => Notice::success("Mensaje enviado correctamente."),
            "synced" => Notice::success(format!(
                "{} mensajes sincronizados.",
                self.count.unwrap_or_default()
            )),
            "empty" => Notice::info("No había mensajes nuevos en la cola."),
            "sync-error" => Notice::danger(format!(
                "Error al sincronizar mensajes: {}",
                self.detail.unwrap_or_default()
            )),
            _ => return None,
        };
        Some(notice)
    }
}

/// Render the dashboard page.
///
/// A malformed query string renders the page without a banner.
pub async fn dashboard_page(
    State(state): State<AppState>,
    query: Option<Query<NoticeQuery>>,
) -> Result<DashboardTemplate> {
    let notice = query.and_then(|Query(q)| q.into_notice());
    render(&state, SendForm::default(), notice).await
}

/// Handle the send form.
///
/// Success redirects back to the dashboard so a reload cannot send the
/// message twice. Failures re-render the form with its contents.
pub async fn send_form(
    State(state): State<AppState>,
    Form(form): Form<SendForm>,
) -> Result<Response> {
    match state.send_message(&form.chat_id, &form.message).await {
        Ok(_) => Ok(Redirect::to("/?notice=sent").into_response()),
        Err(err) => {
            warn!(chat_id = %form.chat_id, error = %err, "Send failed");
            let notice = Notice::danger(err.display_with_detail());
            Ok(render(&state, form, Some(notice)).await?.into_response())
        }
    }
}

/// Handle the sync button, then redirect back to the dashboard.
pub async fn sync_form(State(state): State<AppState>) -> Redirect {
    let location = match state.sync().await {
        Ok(report) if report.stored > 0 => format!("/?notice=synced&count={}", report.stored),
        Ok(_) => "/?notice=empty".to_string(),
        Err(err) => {
            warn!(error = %err, "Sync failed");
            format!(
                "/?notice=sync-error&detail={}",
                urlencoding::encode(&err.display_with_detail())
            )
        }
    };

    Redirect::to(&location)
}

async fn render(
    state: &AppState,
    form: SendForm,
    notice: Option<Notice>,
) -> Result<DashboardTemplate> {
    let messages = state.recent_messages(DASHBOARD_LIMIT).await?;
    Ok(DashboardTemplate {
        messages,
        form,
        notice,
    })
}
