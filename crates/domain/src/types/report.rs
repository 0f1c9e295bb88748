//! Incident report types exchanged with the backend

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SUPPORTED_IMAGE_TYPES;

/// Lifecycle of a citizen report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "ASIGNADO")]
    Assigned,
    #[serde(rename = "EN_PROCESO")]
    InProgress,
    #[serde(rename = "RESUELTO")]
    Resolved,
    #[serde(rename = "RECHAZADO")]
    Rejected,
}

crate::impl_wire_enum_conversions!(ReportStatus {
    Pending => "PENDIENTE" | "PENDING",
    Assigned => "ASIGNADO" | "ASSIGNED",
    InProgress => "EN_PROCESO" | "IN_PROGRESS",
    Resolved => "RESUELTO" | "RESOLVED",
    Rejected => "RECHAZADO" | "REJECTED",
});

/// Where the issue was observed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportLocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
}

/// A report as listed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Issue category, e.g. waste, weeds, street sweeping
    #[serde(default, rename = "type")]
    pub report_type: Option<String>,
    #[serde(default)]
    pub location: Option<ReportLocation>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub zone: Option<String>,
    pub status: ReportStatus,
    #[serde(default)]
    pub citizen_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for a new citizen report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub report_type: String,
    pub location: ReportLocation,
    pub photos: Vec<String>,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen_email: Option<String>,
}

/// Supervisor decision routing a report to a worker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub report_id: i64,
    pub worker_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_report_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Work item created from an assigned report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    #[serde(default)]
    pub report_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

/// Spring-style page envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages
    }
}

/// A photo sent along with a report or a completed task
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.into(), bytes: bytes.into() }
    }

    /// Only JPEG and PNG photos are accepted by the backend.
    #[must_use]
    pub fn is_supported_image(&self) -> bool {
        SUPPORTED_IMAGE_TYPES.iter().any(|mime| self.content_type.eq_ignore_ascii_case(mime))
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_of_reports_deserializes() {
        let body = r#"{
            "content": [{
                "id": 7,
                "title": "Basura en la esquina",
                "type": "RESIDUOS",
                "location": {"lat": -8.11, "lng": -79.02, "address": "Av. Espana 123"},
                "photos": ["https://img.example/1.jpg"],
                "status": "PENDIENTE",
                "citizenId": "42",
                "createdAt": "2025-03-01T10:00:00Z"
            }],
            "totalElements": 1,
            "totalPages": 1,
            "number": 0,
            "size": 10
        }"#;

        let page: Page<Report> = serde_json::from_str(body).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].status, ReportStatus::Pending);
        assert_eq!(page.content[0].report_type.as_deref(), Some("RESIDUOS"));
        assert!(page.is_last());
    }

    #[test]
    fn test_new_report_skips_missing_citizen_fields() {
        let report = NewReport {
            title: "Maleza".to_string(),
            description: "Parque tomado por maleza".to_string(),
            report_type: "MALEZA".to_string(),
            location: ReportLocation::default(),
            photos: vec![],
            status: ReportStatus::Pending,
            citizen_id: None,
            citizen_name: None,
            citizen_phone: None,
            citizen_email: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "PENDIENTE");
        assert_eq!(json["type"], "MALEZA");
        assert!(json.get("citizenId").is_none());
    }

    #[test]
    fn test_status_parses_english_alias() {
        assert_eq!("resolved".parse::<ReportStatus>(), Ok(ReportStatus::Resolved));
        assert_eq!(ReportStatus::InProgress.to_string(), "EN_PROCESO");
    }

    #[test]
    fn attachment_accepts_only_jpeg_and_png() {
        assert!(Attachment::new("a.jpg", "image/jpeg", vec![1, 2]).is_supported_image());
        assert!(Attachment::new("a.png", "IMAGE/PNG", vec![]).is_supported_image());
        assert!(!Attachment::new("a.gif", "image/gif", vec![]).is_supported_image());

        let debug = format!("{:?}", Attachment::new("a.jpg", "image/jpeg", vec![0; 4096]));
        assert!(debug.contains("len: 4096"));
    }
}
