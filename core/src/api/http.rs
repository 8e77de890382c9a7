//! HTTP implementation of the interview service client

use crate::api::{
    is_valid_session_id, EndResponse, InterviewApi, RespondRequest, ResumeUpload, SessionOpened,
    TurnResponse,
};
use crate::config::{ApiPaths, ResolvedClientConfig};
use crate::error::{ApiError, ConfigError, Result};
use crate::interview::Summary;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Interview service client over HTTP + JSON
pub struct HttpInterviewApi {
    client: Client,
    base_url: String,
    paths: ApiPaths,
}

impl HttpInterviewApi {
    /// Create a new client from resolved config
    pub fn new(config: &ResolvedClientConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|message| ConfigError::InvalidValue {
                field: "client".to_string(),
                value: message,
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (key, value) in &config.headers {
            let invalid = || ConfigError::InvalidValue {
                field: format!("headers.{}", key),
                value: value.clone(),
            };
            let name = HeaderName::try_from(key.as_str()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(name, value);
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            paths: config.paths.clone(),
        })
    }

    /// Build an endpoint URL from a route prefix and escaped path segments
    fn endpoint(&self, prefix: &str, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments.iter().find(|s| !is_valid_session_id(s)) {
            return Err(ConfigError::InvalidValue {
                field: "session_id".to_string(),
                value: segment.to_string(),
            }
            .into());
        }

        let mut url = Url::parse(&format!("{}{}", self.base_url, prefix))?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "base_url".to_string(),
                    value: self.base_url.clone(),
                })?
                .pop_if_empty()
                .extend(segments);
        }
        Ok(url)
    }

    /// Send a request and decode a JSON body, treating any non-2xx as failure
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            debug!("{} failed with status {}", operation, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            ApiError::Decode {
                message: format!("{} response: {}", operation, e),
            }
            .into()
        })
    }
}

#[async_trait]
impl InterviewApi for HttpInterviewApi {
    async fn start(&self) -> Result<SessionOpened> {
        let url = self.endpoint(&self.paths.interview, &["start"])?;
        debug!("POST {}", url);
        self.send(self.client.post(url), "start").await
    }

    async fn upload_resume(&self, resume: ResumeUpload) -> Result<SessionOpened> {
        let url = self.endpoint(&self.paths.upload_resume, &[])?;
        debug!(
            "POST {} ({}, {} bytes)",
            url,
            resume.file_name,
            resume.bytes.len()
        );

        let part = Part::bytes(resume.bytes)
            .file_name(resume.file_name)
            .mime_str(resume.content_type.as_ref())?;
        let form = Form::new().part("file", part);

        self.send(self.client.post(url).multipart(form), "upload-resume")
            .await
    }

    async fn respond(&self, session_id: &str, response: &str) -> Result<TurnResponse> {
        let url = self.endpoint(&self.paths.interview, &["respond"])?;
        debug!("POST {} (session {})", url, session_id);

        let body = RespondRequest {
            session_id: session_id.to_string(),
            response: response.to_string(),
        };
        let request = self.client.post(url).json(&body);
        self.send(request, "respond").await
    }

    async fn summary(&self, session_id: &str) -> Result<Summary> {
        let url = self.endpoint(&self.paths.interview, &[session_id, "summary"])?;
        debug!("GET {}", url);
        self.send(self.client.get(url), "summary").await
    }

    async fn end(&self, session_id: &str) -> Result<EndResponse> {
        let url = self.endpoint(&self.paths.interview, &[session_id])?;
        debug!("DELETE {}", url);
        self.send(self.client.delete(url), "end").await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use wiremock::matchers::{any, body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> HttpInterviewApi {
        HttpInterviewApi::new(&ResolvedClientConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_start_posts_to_interview_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interview/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "session_id": "abc123",
                "message": "Hello!",
                "stage": "introduction"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let opened = api_for(&server).start().await.unwrap();

        assert_eq!(opened.session_id, "abc123");
        assert_eq!(opened.stage.unwrap().as_str(), "introduction");
        assert!(opened.audio.is_none());
    }

    #[tokio::test]
    async fn test_respond_sends_session_and_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interview/respond"))
            .and(body_json(serde_json::json!({
                "session_id": "abc123",
                "response": "I have 5 years experience"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "question": "Which languages?",
                "stage": "technical",
                "evaluation": null
            })))
            .mount(&server)
            .await;

        let turn = api_for(&server)
            .respond("abc123", "I have 5 years experience")
            .await
            .unwrap();

        assert_eq!(turn.question, "Which languages?");
        assert_eq!(turn.stage.as_str(), "technical");
    }

    #[tokio::test]
    async fn test_summary_and_end_escape_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/interview/a%2Fb/summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "overall_score": 7.25,
                "stage_scores": {"introduction": 7.25},
                "detailed_scores": [],
                "summary": "Good"
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/interview/a%2Fb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Interview session ended successfully"
            })))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let summary = api.summary("a/b").await.unwrap();
        assert_eq!(summary.overall_score, 7.25);

        let ended = api.end("a/b").await.unwrap();
        assert!(ended.summary.is_none());
        assert!(ended.message.is_some());
    }

    #[tokio::test]
    async fn test_dot_session_ids_never_reach_the_service() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = api_for(&server);
        for session_id in [".", ".."] {
            let err = api.summary(session_id).await.unwrap_err();
            assert!(matches!(err, Error::Config(ConfigError::InvalidValue { .. })));

            let err = api.end(session_id).await.unwrap_err();
            assert!(matches!(err, Error::Config(ConfigError::InvalidValue { .. })));
        }
    }

    #[test]
    fn test_endpoint_keeps_session_id_as_one_segment() {
        let config = ResolvedClientConfig::default();
        let api = HttpInterviewApi::new(&config).unwrap();
        assert!(api.endpoint("/api/interview", &["..", "summary"]).is_err());
        assert!(api.endpoint("/api/interview", &[".."]).is_err());

        let url = api.endpoint("/api/interview", &["a/b", "summary"]).unwrap();
        assert_eq!(url.path(), "/api/interview/a%2Fb/summary");

        let url = api.endpoint("/api/interview", &["..."]).unwrap();
        assert_eq!(url.path(), "/api/interview/...");
    }

    #[tokio::test]
    async fn test_upload_uses_separate_path_and_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/interview/upload-resume"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"resume.pdf\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "session_id": "7",
                "message": "Hello! Tell me about yourself."
            })))
            .mount(&server)
            .await;

        let upload = ResumeUpload::new("resume.pdf", b"%PDF-1.4".to_vec());
        let opened = api_for(&server).upload_resume(upload).await.unwrap();

        assert_eq!(opened.session_id, "7");
        assert!(opened.stage.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/interview/missing/summary"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = api_for(&server).summary("missing").await.unwrap_err();
        match err {
            Error::Api(ApiError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/interview/start"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = api_for(&server).start().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_custom_headers_and_base_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tenant/api/interview/start"))
            .and(header("x-tenant", "acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "session_id": "1",
                "message": "Hi",
                "stage": "introduction"
            })))
            .mount(&server)
            .await;

        let config = ResolvedClientConfig::new(format!("{}/tenant/", server.uri()))
            .with_header("x-tenant".to_string(), "acme".to_string());
        let api = HttpInterviewApi::new(&config).unwrap();

        assert!(api.start().await.is_ok());
        assert!(api.base_url().ends_with("/tenant"));
    }

    #[test]
    fn test_invalid_header_is_config_error() {
        let config = ResolvedClientConfig::default()
            .with_header("bad header".to_string(), "x".to_string());
        let result = HttpInterviewApi::new(&config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let config = ResolvedClientConfig::new("http://127.0.0.1:9".to_string());
        let api = HttpInterviewApi::new(&config).unwrap();

        let err = api.start().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Network { .. })));
    }
}
