//! Axum route handlers for the résumé form, preview, and PDF download.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{Html, IntoResponse, Response},
    Form,
};
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::generate_resume_text;
use crate::models::ResumeFields;
use crate::render::render_resume_pdf;
use crate::session::SessionContext;
use crate::state::AppState;
use crate::templates::{form_page, preview_page};

const PDF_FILENAME: &str = "resume.pdf";

/// GET / and GET /generate/
///
/// Renders the form, pre-filled from the session when one exists.
pub async fn handle_form(session: SessionContext) -> Html<String> {
    Html(form_page(session.data.fields.as_ref()))
}

/// POST /generate/
///
/// Stores the submitted fields, generates and cleans the résumé text, stores it,
/// and renders the preview. Fields are saved before the model is called so the
/// form stays pre-filled even when generation fails.
pub async fn handle_generate(
    State(state): State<AppState>,
    mut session: SessionContext,
    Form(fields): Form<ResumeFields>,
) -> Result<Response, AppError> {
    let ttl = state.sessions.ttl();

    session.data.fields = Some(fields.clone());
    session.save(state.sessions.as_ref()).await?;

    info!("Generating resume for session {}", session.id());
    let text = match generate_resume_text(
        state.generator.as_ref(),
        &fields,
        state.config.generation_timeout,
    )
    .await
    {
        Ok(text) => text,
        Err(e) => return Ok(session.finish(e.into_response(), ttl)),
    };

    let page = preview_page(&text);
    session.data.resume_text = Some(text);
    session.save(state.sessions.as_ref()).await?;

    Ok(session.finish(Html(page).into_response(), ttl))
}

/// GET /download/
///
/// Renders the last generated résumé as a PDF attachment.
/// Returns 400 "No resume generated yet." when the session holds no text.
pub async fn handle_download(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Response, AppError> {
    let text = session
        .data
        .resume_text()
        .ok_or(AppError::NoResumeGenerated)?
        .to_owned();

    let pdf = render_resume_pdf(text, &state.config.font_path).await?;
    Ok(pdf_response(pdf))
}

fn pdf_response(pdf: Vec<u8>) -> Response {
    (
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILENAME}\""),
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response()
}
