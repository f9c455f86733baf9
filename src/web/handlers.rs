//! HTTP request handlers
//!
//! Every page handler follows the same shape: lock the caller's session,
//! apply one [`Action`] and render the resulting view.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use super::{render, AppState};
use crate::session::{apply, Action, ProfileForm, QuizContext};
use crate::AppError;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "age_duel_session";

fn respond(req: &HttpRequest, state: &AppState, action: Action) -> Result<HttpResponse, AppError> {
    let cookie_id = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

    let ctx = QuizContext {
        dataset: &state.dataset,
        db: &state.db,
    };
    let (id, view) = state
        .sessions
        .with_session(cookie_id.as_deref(), |session| apply(session, action, &ctx));
    let view = view?;

    let cookie = Cookie::build(SESSION_COOKIE, id)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .content_type("text/html; charset=utf-8")
        .body(render::page(&view)))
}

/// Read `guess_{i}` for every photo; blank or non-numeric values become `None`
pub fn parse_guesses(form: &HashMap<String, String>, photo_count: usize) -> Vec<Option<u32>> {
    (0..photo_count)
        .map(|i| {
            form.get(&format!("guess_{}", i))
                .and_then(|value| value.trim().parse().ok())
        })
        .collect()
}

/// Content type for an image file, by extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// GET / - current page
pub async fn index(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    respond(&req, &state, Action::Show)
}

/// POST /start - declared age and profession
pub async fn start(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: Option<web::Form<ProfileForm>>,
) -> Result<HttpResponse, AppError> {
    respond(&req, &state, Action::Begin(form.map(web::Form::into_inner)))
}

/// POST /finish - one guess per photo
pub async fn finish(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: Option<web::Form<HashMap<String, String>>>,
) -> Result<HttpResponse, AppError> {
    let form = form.map(web::Form::into_inner).unwrap_or_default();
    let guesses = parse_guesses(&form, state.dataset.len());
    respond(&req, &state, Action::Finish(guesses))
}

/// POST /restart
pub async fn restart(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    respond(&req, &state, Action::Restart)
}

/// GET /images/{index} - photo file for a dataset row
pub async fn image(
    state: web::Data<AppState>,
    path: web::Path<usize>,
) -> Result<HttpResponse, AppError> {
    let index = path.into_inner();
    let Some(record) = state.dataset.get(index) else {
        return Ok(HttpResponse::NotFound().finish());
    };

    let file_path = state.images_dir.join(&record.image);
    match tokio::fs::read(&file_path).await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(&file_path))
            .body(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Image for photo {} not found at {:?}", index + 1, file_path);
            Ok(HttpResponse::NotFound().finish())
        }
        Err(e) => Err(AppError::Io(e)),
    }
}

/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "photos": state.dataset.len(),
        "active_sessions": state.sessions.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_guesses() {
        let form: HashMap<String, String> = [
            ("guess_0", "25"),
            ("guess_1", " 40 "),
            ("guess_2", ""),
            ("guess_3", "abc"),
            ("guess_4", "-3"),
            ("guess_9", "99"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(
            parse_guesses(&form, 6),
            vec![Some(25), Some(40), None, None, None, None]
        );
    }

    #[test]
    fn test_parse_guesses_keeps_zero() {
        let form: HashMap<String, String> =
            [("guess_0".to_string(), "0".to_string())].into_iter().collect();
        assert_eq!(parse_guesses(&form, 1), vec![Some(0)]);
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("1.png")), "image/png");
        assert_eq!(content_type_for(Path::new("face.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }
}
