use super::*;
use crate::net::types::RiskLevel;

fn summary(registration: Option<&str>, description: Option<&str>) -> LogSummary {
    LogSummary {
        id: "abc".to_owned(),
        aircraft_registration: registration.map(str::to_owned),
        timestamp: "2024-01-15T10:30:00".to_owned(),
        description: description.map(str::to_owned),
        risk_level: None,
    }
}

#[test]
fn count_label_pluralizes() {
    assert_eq!(log_count_label(0), "0 maintenance logs");
    assert_eq!(log_count_label(1), "1 maintenance log");
    assert_eq!(log_count_label(12), "12 maintenance logs");
}

#[test]
fn missing_fields_fall_back() {
    let log = summary(None, Some("  "));
    assert_eq!(row_registration(&log), "Unknown");
    assert_eq!(row_description(&log), "No description");
    assert_eq!(row_risk(&log), "Unknown");
}

#[test]
fn present_fields_pass_through() {
    let mut log = summary(Some("N123AB"), Some("Oil change"));
    log.risk_level = Some(RiskLevel::High);
    assert_eq!(row_registration(&log), "N123AB");
    assert_eq!(row_description(&log), "Oil change");
    assert_eq!(row_risk(&log), RiskLevel::High.to_string());
}

#[test]
fn off_scale_risk_is_listed_as_extracted() {
    let mut log = summary(Some("N123AB"), None);
    log.risk_level = Some(RiskLevel::Other("Critical".to_owned()));
    assert_eq!(row_risk(&log), "Critical");
}
