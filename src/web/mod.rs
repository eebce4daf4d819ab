//! Form-based web front end.
//!
//! `GET /` serves the search form and `POST /fetch` runs the pipeline for
//! the submitted form. HTML results are rendered inline; every other format
//! is saved and sent back as a download.

mod pages;

use axum::extract::{Form, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use crate::export::{ExportFormat, Exporter, TIMESTAMP_FORMAT};
use crate::pipeline::Pipeline;

/// Shared state for the handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: Pipeline,
    exporter: Exporter,
    default_url: String,
}

impl AppState {
    pub fn new(pipeline: Pipeline, exporter: Exporter, default_url: impl Into<String>) -> Self {
        Self {
            pipeline,
            exporter,
            default_url: default_url.into(),
        }
    }
}

/// Submitted search form; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct FetchForm {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub output_format: Option<String>,
}

impl FetchForm {
    /// Comma-separated keywords, trimmed, blanks dropped
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/fetch", post(fetch))
        .route("/health", get(health))
        .with_state(Arc::new(state))
}

/// Bind and serve until Ctrl-C
pub async fn serve(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::form_page(&state.default_url))
}

async fn health() -> &'static str {
    "OK"
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Html(pages::error_page(message))).into_response()
}

async fn fetch(State(state): State<Arc<AppState>>, Form(form): Form<FetchForm>) -> Response {
    let url = form
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(&state.default_url)
        .to_string();
    let keywords = form.keyword_list();

    let format = match form.output_format.as_deref().unwrap_or("html").parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let records = match state.pipeline.collect(&url, keywords.as_slice()).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("{}", e);
            let message = match e {
                crate::pipeline::PipelineError::NoPapersFound { .. } => {
                    "No papers found. Please check the URL or if the website structure has changed."
                }
                crate::pipeline::PipelineError::NoKeywordMatches { .. } => {
                    "No papers match the provided keywords."
                }
            };
            return error_response(StatusCode::OK, message);
        }
    };

    let table = state.pipeline.match_records(&records).await;

    let path = match state.exporter.export(&table, format, Some(keywords.as_slice())) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("Export failed: {}", e));
        }
    };

    if format == ExportFormat::Html {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        return Html(pages::results_page(&table, &keywords, &timestamp)).into_response();
    }

    let body = match tokio::fs::read(&path).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Could not read {}: {}", path.display(), e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Export file could not be read");
        }
    };
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("results.{}", format.extension()));

    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::{make_candidate, MockSource};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const PAGE: &str = r#"<table>
<tr><td><strong>Learning Diffusion Priors For Images</strong><i>J. Smith, A. Lee</i></td></tr>
<tr><td><strong>Neural Radiance Fields in the Wild</strong><i>R. Martin</i></td></tr>
</table>"#;

    fn app(mock: Arc<MockSource>) -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            Pipeline::new(mock.clone(), mock),
            Exporter::new(dir.path()),
            "https://example.org/accepted",
        );
        (router(state), dir)
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/fetch")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_keyword_list() {
        let form = FetchForm {
            keywords: Some(" diffusion, ,NeRF ,".to_string()),
            ..FetchForm::default()
        };
        assert_eq!(form.keyword_list(), vec!["diffusion", "NeRF"]);
        assert!(FetchForm::default().keyword_list().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = app(Arc::new(MockSource::new()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn test_index_has_form() {
        let (app, _dir) = app(Arc::new(MockSource::new()));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains(r#"action="/fetch""#));
        assert!(html.contains("https://example.org/accepted"));
    }

    #[tokio::test]
    async fn test_html_results() {
        let mock = Arc::new(MockSource::new());
        mock.set_page(PAGE);
        mock.set_candidates(vec![make_candidate(
            "2401.01234v2",
            "Learning Diffusion Priors for Image Generation",
        )]);
        let (app, dir) = app(mock.clone());

        let response = app.oneshot(post_form("keywords=diffusion")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Total papers found: 1"));
        assert!(html.contains("http://arxiv.org/pdf/2401.01234v2.pdf"));
        assert!(dir.path().join("diffusion.html").exists());
        assert_eq!(mock.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_download() {
        let mock = Arc::new(MockSource::new());
        mock.set_page(PAGE);
        let (app, _dir) = app(mock);

        let response = app
            .oneshot(post_form("url=&keywords=&output_format=csv"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"all_papers.csv\""
        );

        let body = body_text(response).await;
        assert!(body.starts_with('\u{feff}'));
        assert_eq!(body.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_no_papers_page() {
        let (app, _dir) = app(Arc::new(MockSource::new()));
        let response = app.oneshot(post_form("url=https%3A%2F%2Fexample.org")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No papers found"));
    }

    #[tokio::test]
    async fn test_no_keyword_matches_page() {
        let mock = Arc::new(MockSource::new());
        mock.set_page(PAGE);
        let (app, _dir) = app(mock);
        let response = app.oneshot(post_form("keywords=quantum")).await.unwrap();
        assert!(body_text(response).await.contains("No papers match the provided keywords."));
    }

    #[tokio::test]
    async fn test_keyword_paths_stay_in_output_dir() {
        let outside = tempfile::tempdir().unwrap();
        let target = outside.path().join("pwned").to_string_lossy().into_owned();
        let mock = Arc::new(MockSource::new());
        mock.set_page(format!(
            "<table><tr><td><strong>Notes stored under {} today</strong><i>A. Author</i></td></tr></table>",
            target
        ));
        let (app, dir) = app(mock);

        let response = app
            .oneshot(post_form(&format!("keywords={}&output_format=markdown", target)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert!(!outside.path().join("pwned.md").exists());
        let written: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("_pwned.md"));
    }

    #[tokio::test]
    async fn test_keyword_with_slash_downloads() {
        let mock = Arc::new(MockSource::new());
        mock.set_page(
            "<table><tr><td><strong>Fusing RGB/D Streams For Mapping</strong><i>B. Author</i></td></tr></table>",
        );
        let (app, _dir) = app(mock);

        let response = app
            .oneshot(post_form("keywords=RGB%2FD&output_format=csv"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"RGB_D.csv\""
        );
    }

    #[tokio::test]
    async fn test_unknown_format() {
        let mock = Arc::new(MockSource::new());
        mock.set_page(PAGE);
        let (app, _dir) = app(mock.clone());
        let response = app.oneshot(post_form("output_format=pdf")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(mock.queries().is_empty());
    }
}
