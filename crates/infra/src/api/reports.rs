//! Typed report endpoints
//!
//! Citizen, supervisor and worker calls, all routed through the
//! [`AuthGateway`] so they share token refresh and logout handling.

use std::sync::Arc;

use informado_domain::constants::REPORTS_SORT;
use informado_domain::{Assignment, Attachment, NewReport, Page, Report, Task};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::errors::ApiError;
use super::gateway::AuthGateway;
use super::multipart::MultipartBody;
use super::response::ApiResponse;

/// Where an upload response may carry the stored file URL.
const UPLOAD_URL_POINTERS: [&str; 7] = [
    "/secure_url",
    "/url",
    "/data/secure_url",
    "/data/url",
    "/result/secure_url",
    "/result/url",
    "/files/0/url",
];

/// Client for the report resources of the backend.
pub struct ReportsApi {
    gateway: Arc<AuthGateway>,
}

impl ReportsApi {
    #[must_use]
    pub const fn new(gateway: Arc<AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Reports visible to the current user, newest first.
    ///
    /// # Errors
    /// `ApiError::Auth` without a session or after a failed refresh; other
    /// variants per [`ApiError::from_status`] or for undecodable bodies.
    #[instrument(skip(self))]
    pub async fn list_reports(&self, page: u32, size: u32) -> Result<Page<Report>, ApiError> {
        let path = format!("/reportes?page={page}&size={size}&sort={REPORTS_SORT}");
        let response = self.gateway.get(&path).await?;
        let reports: Page<Report> = decode(&path, &response)?;
        info!(count = reports.content.len(), "Reports listed");
        Ok(reports)
    }

    /// File a new citizen report and return it as stored.
    ///
    /// # Errors
    /// See [`list_reports`](Self::list_reports).
    #[instrument(skip_all, fields(report_type = %report.report_type))]
    pub async fn create_report(&self, report: &NewReport) -> Result<Report, ApiError> {
        let response = self.gateway.post_json("/reporte", report).await?;
        decode("/reporte", &response)
    }

    /// Upload a report photo and return the URL it was stored under.
    ///
    /// The URL goes into [`NewReport::photos`].
    ///
    /// # Errors
    /// `ApiError::Client` for a photo that is not JPEG or PNG, or when the
    /// response names no URL; otherwise see
    /// [`list_reports`](Self::list_reports).
    #[instrument(skip_all, fields(file_name = %photo.file_name))]
    pub async fn upload_photo(&self, photo: &Attachment) -> Result<String, ApiError> {
        ensure_image(photo)?;
        let path = "/reporte/cargar";
        let form = MultipartBody::new().file("file", photo);
        let response = self.gateway.post_multipart(path, form).await?;
        ensure_success(path, &response)?;

        let text = response.text();
        let Some(url) = uploaded_url(&text) else {
            warn!(body = %text, "Upload response carried no file URL");
            return Err(ApiError::Client(format!("{path} returned no file URL")));
        };
        info!("Photo uploaded");
        Ok(url)
    }

    /// Reports waiting for supervisor triage.
    ///
    /// # Errors
    /// See [`list_reports`](Self::list_reports).
    #[instrument(skip(self))]
    pub async fn incoming_reports(&self, page: u32) -> Result<Page<Report>, ApiError> {
        let path = format!("/supervisor/incoming-reports?page={page}");
        let response = self.gateway.get(&path).await?;
        decode(&path, &response)
    }

    /// Route a report to a worker.
    ///
    /// # Errors
    /// See [`list_reports`](Self::list_reports).
    #[instrument(skip_all, fields(report_id = assignment.report_id))]
    pub async fn assign_report(&self, assignment: &Assignment) -> Result<(), ApiError> {
        let path = "/supervisor/assign";
        let response = self.gateway.post_json(path, assignment).await?;
        ensure_success(path, &response)?;
        info!("Report assigned");
        Ok(())
    }

    /// Tasks assigned to the signed-in worker.
    ///
    /// # Errors
    /// See [`list_reports`](Self::list_reports).
    #[instrument(skip(self))]
    pub async fn assigned_tasks(&self, page: u32) -> Result<Page<Task>, ApiError> {
        let path = format!("/trabajador/assigned-tasks?page={page}");
        let response = self.gateway.get(&path).await?;
        decode(&path, &response)
    }

    /// Mark a task resolved with a photo of the finished work.
    ///
    /// # Errors
    /// `ApiError::Client` for evidence that is not JPEG or PNG; otherwise see
    /// [`list_reports`](Self::list_reports).
    #[instrument(skip(self, evidence, comment))]
    pub async fn complete_task(
        &self,
        task_id: i64,
        evidence: &Attachment,
        comment: &str,
    ) -> Result<(), ApiError> {
        ensure_image(evidence)?;
        let path = "/trabajador/complete-task";
        let form = MultipartBody::new()
            .text("taskId", task_id.to_string())
            .file("evidence", evidence)
            .text("comment", comment);
        let response = self.gateway.post_multipart(path, form).await?;
        ensure_success(path, &response)?;
        info!("Task completed");
        Ok(())
    }
}

fn ensure_image(attachment: &Attachment) -> Result<(), ApiError> {
    if attachment.is_supported_image() {
        Ok(())
    } else {
        Err(ApiError::Client(format!(
            "{} is {}; only JPEG and PNG photos are accepted",
            attachment.file_name, attachment.content_type
        )))
    }
}

/// File URL from an upload response: a bare URL, a JSON string, a JSON
/// object with one of the known URL fields, or an array of URLs.
fn uploaded_url(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    match &value {
        Value::String(url) => non_blank(url),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .find(|item| item.starts_with("http://") || item.starts_with("https://"))
            .map(str::to_string),
        _ => UPLOAD_URL_POINTERS
            .iter()
            .filter_map(|pointer| value.pointer(pointer))
            .filter_map(Value::as_str)
            .find_map(non_blank),
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn ensure_success(path: &str, response: &ApiResponse) -> Result<(), ApiError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ApiError::from_status(response.status(), path, &response.text()))
    }
}

fn decode<T: DeserializeOwned>(path: &str, response: &ApiResponse) -> Result<T, ApiError> {
    ensure_success(path, response)?;

    // 204/205 carry no body by definition
    if matches!(response.status(), StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT) {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ApiError::Client(format!(
                "No content response ({}), but a body was expected",
                response.status().as_u16()
            ))
        });
    }

    response.json().map_err(|e| ApiError::Client(format!("Failed to parse response: {e}")))
}
