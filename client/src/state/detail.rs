//! Detail-view state: edit buffer, entry expansion, and image zoom/pan.
//!
//! DESIGN
//! ======
//! The buffer is a private copy of the committed record's structured data.
//! Edits are `LogEdit` values folded in by the pure `apply_edit`; the store
//! only sees the buffer when Save calls `LogStore::update`. `sync` is run
//! whenever the committed record changes and decides whether the buffer
//! follows it:
//!
//! - different record id: everything resets, including edit mode
//! - same id, new server copy: buffer follows unless the user is editing
//!
//! TRADE-OFFS
//! ==========
//! Switching records while editing drops the unsaved buffer rather than
//! carrying edits from one record onto another.

#[cfg(test)]
#[path = "detail_test.rs"]
mod detail_test;

use std::collections::BTreeSet;

use crate::net::types::{LogEntry, MaintenanceLog, MaintenanceLogData, RiskLevel, Urgency};

pub const ZOOM_STEP: f64 = 0.25;
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;

/// Record-level text fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogField {
    AircraftRegistration,
    AircraftMakeModel,
    Summary,
}

impl LogField {
    pub fn label(self) -> &'static str {
        match self {
            Self::AircraftRegistration => "Aircraft Registration",
            Self::AircraftMakeModel => "Aircraft Make/Model",
            Self::Summary => "Summary",
        }
    }

    pub fn get(self, data: &MaintenanceLogData) -> Option<&str> {
        match self {
            Self::AircraftRegistration => data.aircraft_registration.as_deref(),
            Self::AircraftMakeModel => data.aircraft_make_model.as_deref(),
            Self::Summary => data.summary.as_deref(),
        }
    }

    fn slot(self, data: &mut MaintenanceLogData) -> &mut Option<String> {
        match self {
            Self::AircraftRegistration => &mut data.aircraft_registration,
            Self::AircraftMakeModel => &mut data.aircraft_make_model,
            Self::Summary => &mut data.summary,
        }
    }
}

/// Entry-level free-text fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryField {
    Description,
    Reason,
    ManualReference,
    AdCompliance,
    NextDueCompliance,
    ServiceBulletinReference,
    PerformedBy,
    LicenseNumber,
    Date,
    TachTime,
    HobbsTime,
    CertificationStatement,
}

impl EntryField {
    /// Fields grouped the way the detail view lays them out.
    pub const WORK: [Self; 2] = [Self::Description, Self::Reason];
    pub const REFERENCE: [Self; 1] = [Self::ManualReference];
    pub const COMPLIANCE: [Self; 3] = [Self::AdCompliance, Self::NextDueCompliance, Self::ServiceBulletinReference];
    pub const TECHNICIAN: [Self; 5] =
        [Self::PerformedBy, Self::LicenseNumber, Self::Date, Self::TachTime, Self::HobbsTime];

    pub fn label(self) -> &'static str {
        match self {
            Self::Description => "Description of Work Performed",
            Self::Reason => "Reason for Maintenance",
            Self::ManualReference => "Manual Reference",
            Self::AdCompliance => "AD Compliance",
            Self::NextDueCompliance => "Next Due Compliance",
            Self::ServiceBulletinReference => "Service Bulletin Reference",
            Self::PerformedBy => "Performed By",
            Self::LicenseNumber => "License Number",
            Self::Date => "Date",
            Self::TachTime => "Tach Time",
            Self::HobbsTime => "Hobbs Time",
            Self::CertificationStatement => "Certification Statement",
        }
    }

    /// Long-form fields render as a textarea when editing.
    pub fn multiline(self) -> bool {
        matches!(self, Self::Description | Self::CertificationStatement)
    }

    pub fn get(self, entry: &LogEntry) -> Option<&str> {
        match self {
            Self::Description => entry.description_of_work_performed.as_deref(),
            Self::Reason => entry.reason_for_maintenance.as_deref(),
            Self::ManualReference => entry.manual_reference.as_deref(),
            Self::AdCompliance => entry.ad_compliance.as_deref(),
            Self::NextDueCompliance => entry.next_due_compliance.as_deref(),
            Self::ServiceBulletinReference => entry.service_bulletin_reference.as_deref(),
            Self::PerformedBy => entry.performed_by.as_deref(),
            Self::LicenseNumber => entry.license_number.as_deref(),
            Self::Date => entry.date.as_deref(),
            Self::TachTime => entry.tach_time.as_deref(),
            Self::HobbsTime => entry.hobbs_time.as_deref(),
            Self::CertificationStatement => entry.certification_statement.as_deref(),
        }
    }

    fn slot(self, entry: &mut LogEntry) -> &mut Option<String> {
        match self {
            Self::Description => &mut entry.description_of_work_performed,
            Self::Reason => &mut entry.reason_for_maintenance,
            Self::ManualReference => &mut entry.manual_reference,
            Self::AdCompliance => &mut entry.ad_compliance,
            Self::NextDueCompliance => &mut entry.next_due_compliance,
            Self::ServiceBulletinReference => &mut entry.service_bulletin_reference,
            Self::PerformedBy => &mut entry.performed_by,
            Self::LicenseNumber => &mut entry.license_number,
            Self::Date => &mut entry.date,
            Self::TachTime => &mut entry.tach_time,
            Self::HobbsTime => &mut entry.hobbs_time,
            Self::CertificationStatement => &mut entry.certification_statement,
        }
    }
}

/// One user edit to the buffer. Indexes that are out of range are ignored.
#[derive(Clone, Debug, PartialEq)]
pub enum LogEdit {
    Log { field: LogField, value: String },
    Entry { index: usize, field: EntryField, value: String },
    RiskLevel { index: usize, value: Option<RiskLevel> },
    Urgency { index: usize, value: Option<Urgency> },
    Airworthy { index: usize, value: bool },
    SetPart { index: usize, part: usize, value: String },
    AddPart { index: usize },
    RemovePart { index: usize, part: usize },
}

fn text_value(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Return a copy of `data` with `edit` applied.
pub fn apply_edit(data: &MaintenanceLogData, edit: LogEdit) -> MaintenanceLogData {
    let mut next = data.clone();
    match edit {
        LogEdit::Log { field, value } => *field.slot(&mut next) = text_value(value),
        LogEdit::Entry { index, field, value } => {
            if let Some(entry) = next.log_entries.get_mut(index) {
                *field.slot(entry) = text_value(value);
            }
        }
        LogEdit::RiskLevel { index, value } => {
            if let Some(entry) = next.log_entries.get_mut(index) {
                entry.risk_level = value;
            }
        }
        LogEdit::Urgency { index, value } => {
            if let Some(entry) = next.log_entries.get_mut(index) {
                entry.urgency = value;
            }
        }
        LogEdit::Airworthy { index, value } => {
            if let Some(entry) = next.log_entries.get_mut(index) {
                entry.is_airworthy = value;
            }
        }
        LogEdit::SetPart { index, part, value } => {
            if let Some(slot) = next.log_entries.get_mut(index).and_then(|e| e.part_number_replaced.get_mut(part)) {
                *slot = value;
            }
        }
        LogEdit::AddPart { index } => {
            if let Some(entry) = next.log_entries.get_mut(index) {
                entry.part_number_replaced.push(String::new());
            }
        }
        LogEdit::RemovePart { index, part } => {
            if let Some(entry) = next.log_entries.get_mut(index)
                && part < entry.part_number_replaced.len()
            {
                entry.part_number_replaced.remove(part);
            }
        }
    }
    next
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetailState {
    pub editing: bool,
    /// What the view renders and edits.
    pub buffer: MaintenanceLogData,
    /// Snapshot of the committed record the buffer was seeded from.
    committed: Option<MaintenanceLog>,
    /// Expanded "Entry #n" cards, by entry index.
    pub expanded: BTreeSet<usize>,
    pub zoom: f64,
    pub pan: (f64, f64),
    /// Pointer position minus pan at drag start; `Some` while dragging.
    drag_anchor: Option<(f64, f64)>,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            editing: false,
            buffer: MaintenanceLogData::default(),
            committed: None,
            expanded: BTreeSet::new(),
            zoom: 1.0,
            pan: (0.0, 0.0),
            drag_anchor: None,
        }
    }
}

impl DetailState {
    pub fn committed_id(&self) -> Option<&str> {
        self.committed.as_ref().map(|log| log.id.as_str())
    }

    /// Follow the store's current record.
    pub fn sync(&mut self, current: Option<&MaintenanceLog>) {
        let Some(log) = current else {
            *self = Self::default();
            return;
        };
        if self.committed_id() != Some(log.id.as_str()) {
            *self = Self::default();
            self.buffer = log.structured_data.clone();
            self.committed = Some(log.clone());
            return;
        }
        if self.committed.as_ref() != Some(log) {
            self.committed = Some(log.clone());
            if !self.editing {
                self.buffer = log.structured_data.clone();
            }
        }
    }

    pub fn begin_edit(&mut self) {
        if let Some(log) = &self.committed {
            self.buffer = log.structured_data.clone();
            self.editing = true;
        }
    }

    /// Leave edit mode and throw the buffer away.
    pub fn cancel_edit(&mut self) {
        self.editing = false;
        if let Some(log) = &self.committed {
            self.buffer = log.structured_data.clone();
        }
    }

    /// Leave edit mode after the server accepted `saved`.
    pub fn finish_save(&mut self, saved: &MaintenanceLog) {
        self.editing = false;
        self.buffer = saved.structured_data.clone();
        self.committed = Some(saved.clone());
    }

    /// Fold one edit into the buffer. Ignored outside edit mode.
    pub fn edit(&mut self, edit: LogEdit) {
        if self.editing {
            self.buffer = apply_edit(&self.buffer, edit);
        }
    }

    pub fn toggle_entry(&mut self, index: usize) {
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
        self.pan = (0.0, 0.0);
        self.drag_anchor = None;
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < ZOOM_MAX
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > ZOOM_MIN
    }

    pub fn can_pan(&self) -> bool {
        self.zoom > 1.0
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Readout for the zoom control, e.g. `125`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn start_drag(&mut self, x: f64, y: f64) {
        if self.can_pan() {
            self.drag_anchor = Some((x - self.pan.0, y - self.pan.1));
        }
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        if !self.can_pan() {
            return;
        }
        if let Some((ax, ay)) = self.drag_anchor {
            self.pan = (x - ax, y - ay);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// CSS transform for the image element.
    pub fn image_transform(&self) -> String {
        format!("scale({}) translate({}px, {}px)", self.zoom, self.pan.0, self.pan.1)
    }
}
