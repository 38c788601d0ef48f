use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, get_service},
    Router,
};
use tokio::fs;
use tower_http::services::ServeDir;
use tracing::error;

use crate::content::{is_valid_slug, list_posts, parse_front_matter};
use crate::hot_reload::ws_handler;
use crate::markdown::render_markdown_to_html;
use crate::models::PostDetail;
use crate::state::{AppState, RouterState};
use crate::templates;

pub fn router(state: RouterState) -> Router {
    let static_dir = get_service(ServeDir::new(state.app_state.config.static_dir()));

    Router::new()
        .route("/", get(homepage))
        .route("/posts/{slug}", get(show_post))
        .nest_service("/static", static_dir)
        .route("/ws", get(ws_handler))
        .with_state(state)
}

/// Anything the handlers do not handle explicitly becomes a 500.
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn homepage(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let posts = list_posts(&state.config.posts_dir()).await?;
    let layout = fs::read_to_string(state.config.layout_path()).await?;

    let page = templates::render_index_page(
        &layout,
        &state.config.site_title,
        &posts,
        state.is_development,
    );
    Ok(Html(page))
}

async fn show_post(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    if !is_valid_slug(&slug) {
        return Ok((StatusCode::NOT_FOUND, format!("No such post: {}", slug)).into_response());
    }

    let path = state.config.posts_dir().join(&slug).join("index.md");
    let source = match fs::read_to_string(&path).await {
        Ok(source) => source,
        Err(_) => {
            let message = format!("File not found at: {}", path.display());
            return Ok((StatusCode::NOT_FOUND, message).into_response());
        }
    };

    let (front_matter, body) = parse_front_matter(&source)?;
    let post = PostDetail {
        title: front_matter
            .title
            .unwrap_or_else(|| "Untitled Post".to_string()),
        date: front_matter.date.unwrap_or_else(|| "...".to_string()),
        content_html: render_markdown_to_html(&body),
    };

    let layout = fs::read_to_string(state.config.layout_path()).await?;
    let page = templates::render_post_page(&layout, &post, state.is_development);
    Ok(Html(page).into_response())
}
