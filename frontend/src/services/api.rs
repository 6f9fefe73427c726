use std::future::Future;

use futures::future::{select, Either};
use gloo::net::http::{Request, RequestBuilder, Response};
use gloo::timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    AppConfig, AttendanceRecord, CreateExamRequest, Exam, ExamResult, MarkAttendanceRequest,
    Notice, RecordExamResultRequest, SchoolClass, Student, StudyMaterial, Subject,
    UploadMaterialRequest, UserRole,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u32),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// API client for the school backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    timeout_ms: u32,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(config.api_base_url.clone()).with_timeout(config.api_timeout_ms)
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout_ms: AppConfig::default().api_timeout_ms,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Bearer token sent with every request; the client never persists it
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Get the classes the teacher is class teacher of or teaches in
    pub async fn get_my_classes(&self, teacher_id: i64) -> ApiResult<Vec<SchoolClass>> {
        self.get_json(&format!("/teacher/{}/classes", teacher_id)).await
    }

    pub async fn get_my_students(&self, teacher_id: i64) -> ApiResult<Vec<Student>> {
        self.get_json(&format!("/teacher/{}/students", teacher_id)).await
    }

    pub async fn get_my_subjects(&self, teacher_id: i64) -> ApiResult<Vec<Subject>> {
        self.get_json(&format!("/teacher/{}/subjects", teacher_id)).await
    }

    pub async fn get_my_exams(&self, teacher_id: i64) -> ApiResult<Vec<Exam>> {
        self.get_json(&format!("/teacher/{}/exams", teacher_id)).await
    }

    pub async fn get_my_study_materials(&self, teacher_id: i64) -> ApiResult<Vec<StudyMaterial>> {
        self.get_json(&format!("/teacher/{}/study-materials", teacher_id)).await
    }

    /// Notices addressed to teachers
    pub async fn get_notices(&self) -> ApiResult<Vec<Notice>> {
        self.get_json(&format!("/admin/notices?target_role={}", UserRole::Teacher.as_str()))
            .await
    }

    pub async fn mark_attendance(&self, request: &MarkAttendanceRequest) -> ApiResult<AttendanceRecord> {
        self.post_json("/admin/attendance", request).await
    }

    pub async fn create_exam(&self, request: &CreateExamRequest) -> ApiResult<Exam> {
        self.post_json("/admin/exams", request).await
    }

    pub async fn record_exam_result(&self, request: &RecordExamResultRequest) -> ApiResult<ExamResult> {
        self.post_json("/admin/exam-results", request).await
    }

    pub async fn upload_study_material(
        &self,
        teacher_id: i64,
        request: &UploadMaterialRequest,
    ) -> ApiResult<StudyMaterial> {
        self.post_json(&format!("/teacher/{}/study-materials", teacher_id), request)
            .await
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self
            .authorize(Request::get(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        self.execute(request).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let request = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let response = with_timeout(request.send(), self.timeout_ms).await?;

        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .map(|text| error_detail(&text))
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Error bodies carry `{"detail": "..."}`; anything else is kept verbatim
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(|detail| detail.as_str().map(str::to_string)))
        .unwrap_or_else(|| body.to_string())
}

async fn with_timeout<F>(send: F, timeout_ms: u32) -> ApiResult<Response>
where
    F: Future<Output = Result<Response, gloo::net::Error>>,
{
    let send = Box::pin(send);
    let timer = Box::pin(TimeoutFuture::new(timeout_ms));

    match select(send, timer).await {
        Either::Left((result, _)) => result.map_err(|e| ApiError::Network(e.to_string())),
        Either::Right(_) => Err(ApiError::Timeout(timeout_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::with_base_url("http://localhost:8001/".to_string());
        assert_eq!(client.url("/teacher/1/classes"), "http://localhost:8001/teacher/1/classes");
    }

    #[wasm_bindgen_test]
    fn test_client_from_config() {
        let config = AppConfig {
            api_base_url: "https://api.school.test".to_string(),
            api_timeout_ms: 2500,
            ..AppConfig::default()
        };
        let client = ApiClient::new(&config).with_token("abc");

        assert_eq!(client.timeout_ms, 2500);
        assert_eq!(client.token.as_deref(), Some("abc"));
        assert_eq!(client.url("/admin/exams"), "https://api.school.test/admin/exams");
    }

    #[wasm_bindgen_test]
    fn test_error_messages() {
        let error = ApiError::Status {
            status: 422,
            body: "max_marks must be positive".to_string(),
        };
        assert_eq!(error.to_string(), "Server error 422: max_marks must be positive");
        assert_eq!(ApiError::Timeout(10_000).to_string(), "Request timed out after 10000 ms");
    }

    #[wasm_bindgen_test]
    fn test_error_detail_unwraps_json() {
        assert_eq!(error_detail(r#"{"detail": "Exam not found"}"#), "Exam not found");
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
        assert_eq!(error_detail(r#"{"detail": [1, 2]}"#), r#"{"detail": [1, 2]}"#);
    }
}
