use crate::api::models::{UPLOAD_ENDPOINT, UploadOutcome, interpret_upload};
use crate::error::ApiError;
use crate::utils::error_helpers::convert_request_error;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const USER_AGENT: &str = concat!("asgard/", env!("CARGO_PKG_VERSION"));

/// Client for a ChartMuseum-style chart repository
#[derive(Debug, Clone)]
pub struct ChartRepoClient {
    client: Client,
    pub base_url: String,
}

impl ChartRepoClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Http {
                status: 0,
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(ChartRepoClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Upload a packaged chart as the multipart field `chart`
    pub async fn upload(&self, archive: &Path) -> crate::Result<UploadOutcome> {
        let bytes = crate::map_file_error!(tokio::fs::read(archive).await, archive)?;
        let file_name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chart.tgz".to_string());

        Ok(self.upload_bytes(file_name, bytes).await?)
    }

    pub async fn upload_bytes(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, ApiError> {
        let form = Form::new().part("chart", Part::bytes(bytes).file_name(file_name));

        let response = self
            .build_request(Method::POST, UPLOAD_ENDPOINT)
            .multipart(form)
            .send()
            .await
            .map_err(|e| convert_request_error(e, UPLOAD_ENDPOINT))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, UPLOAD_ENDPOINT))?;
        log::debug!("{} responded {}: {}", UPLOAD_ENDPOINT, status, body);

        match interpret_upload(&body) {
            Ok(outcome) => Ok(outcome),
            // A non-JSON error page is an HTTP failure, not a parse failure
            Err(_) if !status.is_success() => Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: UPLOAD_ENDPOINT.to_string(),
                message: body,
            }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;
    use crate::error::StorageError;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = ChartRepoClient::new("http://charts.example.test/").expect("client");
        assert_eq!(client.base_url, "http://charts.example.test");
    }

    #[test]
    fn test_build_request() {
        let client = ChartRepoClient::new("http://charts.example.test").expect("client");
        let request = client
            .build_request(Method::POST, UPLOAD_ENDPOINT)
            .build()
            .expect("Failed to build request");
        assert_eq!(
            request.url().as_str(),
            "http://charts.example.test/api/charts"
        );
        assert_eq!(request.method(), Method::POST);
    }

    #[tokio::test]
    async fn test_upload_saved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/charts"))
            .and(body_string_contains("name=\"chart\""))
            .and(body_string_contains("web-0.1.1.tgz"))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"saved":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChartRepoClient::new(&server.uri()).expect("client");
        let outcome = client
            .upload_bytes("web-0.1.1.tgz".to_string(), b"archive".to_vec())
            .await
            .expect("upload");
        assert_eq!(outcome, UploadOutcome::Saved);
    }

    #[tokio::test]
    async fn test_upload_conflict_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/charts"))
            .respond_with(
                ResponseTemplate::new(409).set_body_string(r#"{"error":"file already exists"}"#),
            )
            .mount(&server)
            .await;

        let client = ChartRepoClient::new(&server.uri()).expect("client");
        let outcome = client
            .upload_bytes("web-0.1.1.tgz".to_string(), b"archive".to_vec())
            .await
            .expect("upload");
        assert_eq!(
            outcome,
            UploadOutcome::Rejected(Some("file already exists".to_string()))
        );
    }

    #[tokio::test]
    async fn test_upload_non_json_success_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/charts"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = ChartRepoClient::new(&server.uri()).expect("client");
        let result = client
            .upload_bytes("web-0.1.1.tgz".to_string(), b"archive".to_vec())
            .await;
        assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_upload_non_json_failure_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/charts"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = ChartRepoClient::new(&server.uri()).expect("client");
        let result = client
            .upload_bytes("web-0.1.1.tgz".to_string(), b"archive".to_vec())
            .await;
        match result {
            Err(ApiError::Http { status, message, .. }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_missing_archive() {
        let client = ChartRepoClient::new("http://charts.example.test").expect("client");
        let result = client.upload(Path::new("/nonexistent/web-0.1.1.tgz")).await;
        assert!(matches!(
            result,
            Err(AppError::Storage(StorageError::FileIo { .. }))
        ));
    }
}
