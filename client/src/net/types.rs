//! Shared wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror the analyzer backend's JSON so serde round-trips stay
//! lossless for every field the UI edits. Nullable backend fields are modeled
//! as `Option`, and the handful of fields the backend defaults (`log_entries`,
//! `part_number_replaced`, `is_airworthy`) decode `null` to that default.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of characters kept in a list-view description.
pub const SUMMARY_DESCRIPTION_MAX_CHARS: usize = 100;

/// Assessed risk of one maintenance entry.
///
/// The model is free to answer outside the three-step scale; such answers are
/// kept verbatim in `Other` so a save sends them back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl RiskLevel {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a form value; blank means "not specified".
    pub fn from_label(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() { None } else { Some(Self::from(raw.to_owned())) }
    }
}

impl From<String> for RiskLevel {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(raw),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(risk: RiskLevel) -> Self {
        match risk {
            RiskLevel::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How soon follow-up work on an entry is needed. Off-scale answers are kept
/// in `Other`, as for [`RiskLevel`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Urgency {
    Normal,
    Medium,
    High,
    Other(String),
}

impl Urgency {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Medium, Self::High];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "Normal",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Other(raw) => raw,
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() { None } else { Some(Self::from(raw.to_owned())) }
    }
}

impl From<String> for Urgency {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "normal" => Self::Normal,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(raw),
        }
    }
}

impl From<Urgency> for String {
    fn from(urgency: Urgency) -> Self {
        match urgency {
            Urgency::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One maintenance event extracted from a log image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub description_of_work_performed: Option<String>,
    #[serde(default)]
    pub reason_for_maintenance: Option<String>,
    /// Replaced part numbers in the order they appear on the log.
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub part_number_replaced: Vec<String>,
    #[serde(default)]
    pub manual_reference: Option<String>,
    #[serde(default)]
    pub ad_compliance: Option<String>,
    #[serde(default)]
    pub next_due_compliance: Option<String>,
    #[serde(default)]
    pub service_bulletin_reference: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub tach_time: Option<String>,
    #[serde(default)]
    pub hobbs_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_enum")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, deserialize_with = "deserialize_lenient_enum")]
    pub urgency: Option<Urgency>,
    /// Missing or `null` means airworthy, matching the backend default.
    #[serde(default = "default_airworthy", deserialize_with = "deserialize_bool_default_true")]
    pub is_airworthy: bool,
    #[serde(default)]
    pub certification_statement: Option<String>,
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            description_of_work_performed: None,
            reason_for_maintenance: None,
            part_number_replaced: Vec::new(),
            manual_reference: None,
            ad_compliance: None,
            next_due_compliance: None,
            service_bulletin_reference: None,
            performed_by: None,
            license_number: None,
            date: None,
            tach_time: None,
            hobbs_time: None,
            risk_level: None,
            urgency: None,
            is_airworthy: true,
            certification_statement: None,
        }
    }
}

/// The editable document of a record. Saving sends this whole value back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLogData {
    #[serde(default)]
    pub aircraft_registration: Option<String>,
    #[serde(default)]
    pub aircraft_make_model: Option<String>,
    /// Free-text overview; only shown when the record has several entries.
    #[serde(default)]
    pub summary: Option<String>,
    /// Backend hint that the image contained more than one entry.
    #[serde(default, deserialize_with = "deserialize_bool_default_false")]
    pub is_mult: bool,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub log_entries: Vec<LogEntry>,
}

/// A complete analyzed record as returned by `GET /logs/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    /// Server-generated identifier. The client never invents one.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default = "default_uploaded_by")]
    pub uploaded_by: String,
    /// Creation instant as an ISO-8601 string (timezone suffix optional).
    pub timestamp: String,
    #[serde(default)]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub original_image_url: Option<String>,
    pub structured_data: MaintenanceLogData,
}

impl MaintenanceLog {
    pub fn aircraft_registration(&self) -> Option<&str> {
        self.structured_data.aircraft_registration.as_deref()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.structured_data.log_entries
    }
}

/// List-view projection of a record (`GET /logs/`, `GET /logs/search/{reg}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub aircraft_registration: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_enum")]
    pub risk_level: Option<RiskLevel>,
}

impl From<&MaintenanceLog> for LogSummary {
    /// Derive the sidebar projection the same way the backend list route does.
    fn from(log: &MaintenanceLog) -> Self {
        let data = &log.structured_data;
        let entries = &data.log_entries;

        let (description, risk_level) = match entries.first() {
            Some(first) => {
                let mut description = first.description_of_work_performed.clone().unwrap_or_default();
                match data.summary.as_deref().filter(|s| !s.is_empty()) {
                    Some(summary) if data.is_mult => description = summary.to_owned(),
                    _ if entries.len() > 1 => {
                        description.push_str(&format!(" (+{} more entries)", entries.len() - 1));
                    }
                    _ => {}
                }
                (description, first.risk_level.clone())
            }
            None => (String::new(), None),
        };

        Self {
            id: log.id.clone(),
            aircraft_registration: data.aircraft_registration.clone(),
            timestamp: log.timestamp.clone(),
            description: Some(truncate_description(&description)),
            risk_level,
        }
    }
}

fn truncate_description(description: &str) -> String {
    if description.is_empty() {
        return "No description".to_owned();
    }
    if description.chars().count() > SUMMARY_DESCRIPTION_MAX_CHARS {
        let mut out: String = description.chars().take(SUMMARY_DESCRIPTION_MAX_CHARS).collect();
        out.push_str("...");
        return out;
    }
    description.to_owned()
}

/// Response body of `POST /upload-log/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub log_id: Option<String>,
    #[serde(default)]
    pub structured_data: Option<MaintenanceLogData>,
}

/// Rendering requested from `POST /logs/{id}/export`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Json,
}

impl ExportFormat {
    /// File extension, also the wire value.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Json => "json",
        }
    }

    /// Upper-case label used in notifications (`PDF`, `JSON`).
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Json => "JSON",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Json => "application/json",
        }
    }

    /// Download name for an exported record: `maintenance_log_<id>.<ext>`.
    pub fn file_name(self, log_id: &str) -> String {
        format!("maintenance_log_{log_id}.{}", self.extension())
    }
}

/// Request body of `POST /logs/{id}/export`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub log_id: String,
}

fn default_uploaded_by() -> String {
    "anonymous".to_owned()
}

fn default_airworthy() -> bool {
    true
}

fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_bool_default_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn deserialize_bool_default_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Case-insensitive enum decoding. Blank strings are "not specified";
/// anything else is kept, recognised or not.
fn deserialize_lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()).map(T::from))
}
