//! Web server exposing the processing pipeline.
//!
//! A thin transport layer: one upload endpoint returning the pipeline's
//! JSON result, a status endpoint reporting engine readiness, and a
//! health check. All decision logic lives in [`crate::pipeline`].

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::pipeline::DocumentPipeline;

/// Shared state for the web server. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DocumentPipeline>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pipeline: Arc::new(DocumentPipeline::new(settings)),
            max_upload_bytes: settings.max_upload_bytes,
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings);

    if state.pipeline.engine_available() {
        tracing::info!("OCR engine ready");
    } else {
        tracing::warn!(
            hint = %state.pipeline.availability_hint(),
            "OCR engine not available, answering with placeholder text"
        );
    }

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::ocr::{OcrEngine, OcrError};

    /// Engine that always answers with fixed text.
    struct StaticEngine(&'static str);

    impl OcrEngine for StaticEngine {
        fn name(&self) -> &str {
            "static"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn availability_hint(&self) -> String {
            "static test engine".to_string()
        }

        fn recognize(&self, _image_path: &Path, _languages: &str) -> Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    fn test_app(text: &'static str) -> axum::Router {
        let settings = Settings::default();
        let state = AppState {
            pipeline: Arc::new(DocumentPipeline::with_engine(
                Arc::new(StaticEngine(text)),
                &settings,
            )),
            max_upload_bytes: settings.max_upload_bytes,
        };
        create_router(state)
    }

    fn sample_png() -> Vec<u8> {
        let img = image::RgbImage::new(16, 16);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    const BOUNDARY: &str = "immidoc-test-boundary";

    fn multipart_upload(document: Option<&[u8]>, username: Option<&str>) -> Body {
        let mut body = Vec::new();
        if let Some(bytes) = document {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"document\"; \
                     filename=\"doc.png\"\r\nContent-Type: image/png\r\n\r\n",
                    BOUNDARY
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(username) = username {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"username\"\r\n\r\n{}\r\n",
                    BOUNDARY, username
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        Body::from(body)
    }

    fn process_request(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/process")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(body)
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app("anything");
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_status() {
        let app = test_app("anything");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "online");
        assert_eq!(json["message"], "Immigration Document OCR API");
        assert_eq!(json["tesseract_available"], true);
    }

    #[tokio::test]
    async fn test_process_upload() {
        let app = test_app("VISA ENTRY PERMIT ABCD12345678");
        let response = app
            .oneshot(process_request(multipart_upload(
                Some(&sample_png()),
                Some("test_user"),
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["document_type"], "visa");
        assert_eq!(json["confidence"], 0.9);
        assert_eq!(json["structured_data"]["visa_number"], "ABCD12345678");
        // Username is pass-through only, never echoed into the result
        assert!(json.get("username").is_none());
    }

    #[tokio::test]
    async fn test_missing_document_field() {
        let app = test_app("anything");
        let response = app
            .oneshot(process_request(multipart_upload(None, Some("someone"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = response_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_non_image_upload() {
        let app = test_app("anything");
        let response = app
            .oneshot(process_request(multipart_upload(
                Some(b"plain text, not an image"),
                None,
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_blank_ocr_reports_failure_with_200() {
        let app = test_app("   ");
        let response = app
            .oneshot(process_request(multipart_upload(Some(&sample_png()), None)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "No text could be extracted from the image");
    }
}
