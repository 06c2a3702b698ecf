//! Form state → flat multipart payload.
//!
//! Field naming follows the backend's parser exactly: scalars by name,
//! array-of-object members as `name[index][field]`, binaries as file parts
//! under their bracketed key.

use super::aggregate::{DateField, EmployeeForm, RefSlot, TextField};
use super::attachment::{BlobKey, FileValue, UploadedFile};
use super::employment::EmploymentTypeEntry;
use crate::shared::dates::to_wire_date;
use chrono::NaiveDate;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    Text(String),
    /// Explicit "clear this value"; sent as an empty part
    Null,
    File(UploadedFile),
}

impl WireValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Multipart text encoding: `Null` travels as an empty string.
    pub fn to_part_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Null => Some(String::new()),
            Self::File(_) => None,
        }
    }
}

/// Ordered multipart fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WirePayload {
    fields: Vec<(String, WireValue)>,
}

impl WirePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: WireValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.push(key, WireValue::Text(value.into()));
    }

    /// Empty strings become explicit nulls.
    pub fn text_or_null(&mut self, key: impl Into<String>, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(key, WireValue::Null);
        } else {
            self.text(key, trimmed);
        }
    }

    pub fn date(&mut self, key: impl Into<String>, value: Option<NaiveDate>) {
        match value {
            Some(d) => self.text(key, to_wire_date(d)),
            None => self.push(key, WireValue::Null),
        }
    }

    pub fn id(&mut self, key: impl Into<String>, value: Option<i64>) {
        match value {
            Some(id) => self.text(key, id.to_string()),
            None => self.push(key, WireValue::Null),
        }
    }

    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn fields(&self) -> &[(String, WireValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Blob keys of every new upload, in field order.
    pub fn blob_keys(&self) -> Vec<BlobKey> {
        self.fields
            .iter()
            .filter_map(|(_, v)| match v {
                WireValue::File(f) => Some(f.key),
                _ => None,
            })
            .collect()
    }

    /// Rebuild nested JSON from the bracketed keys. Files become their
    /// name; nulls stay null. Numeric-looking scalars stay strings.
    pub fn to_record(&self) -> Value {
        let mut root = Value::Object(Map::new());
        for (key, value) in &self.fields {
            let json = match value {
                WireValue::Text(s) => Value::String(s.clone()),
                WireValue::Null => Value::Null,
                WireValue::File(f) => Value::String(f.name.clone()),
            };
            insert_path(&mut root, &bracket_to_path(key), json);
        }
        root
    }
}

/// `employment_types.0.label` → `employment_types[0][label]`
pub fn path_to_bracket(path: &str) -> String {
    let mut parts = path.split('.');
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        out.push('[');
        out.push_str(part);
        out.push(']');
    }
    out
}

/// `employment_types[0][label]` → `employment_types.0.label`
pub fn bracket_to_path(key: &str) -> String {
    key.replace("][", ".")
        .replace('[', ".")
        .replace(']', "")
}

fn insert_path(root: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let mut cursor = root;
    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        let next_is_index = segments
            .get(i + 1)
            .map(|s| s.parse::<usize>().is_ok())
            .unwrap_or(false);

        if let Ok(index) = segment.parse::<usize>() {
            if !cursor.is_array() {
                *cursor = Value::Array(Vec::new());
            }
            let Value::Array(items) = cursor else { return };
            while items.len() <= index {
                items.push(Value::Null);
            }
            if last {
                items[index] = value;
                return;
            }
            if items[index].is_null() {
                items[index] = container_for(next_is_index);
            }
            cursor = &mut items[index];
        } else {
            if !cursor.is_object() {
                *cursor = Value::Object(Map::new());
            }
            let Value::Object(map) = cursor else { return };
            if last {
                map.insert(segment.to_string(), value);
                return;
            }
            cursor = map
                .entry(segment.to_string())
                .or_insert_with(|| container_for(next_is_index));
        }
    }
}

fn container_for(index: bool) -> Value {
    if index {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

// ============================================================================
// Form → payload
// ============================================================================

pub fn to_wire_payload(form: &EmployeeForm) -> WirePayload {
    let mut payload = WirePayload::new();

    for field in TextField::ALL {
        payload.text_or_null(path_to_bracket(field.path()), form.text(field));
    }
    for field in DateField::ALL {
        payload.date(field.path(), form.date(field));
    }
    for slot in RefSlot::ALL {
        payload.id(path_to_bracket(slot.path()), form.reference(slot).id());
    }
    if let Some(id) = form.attainment.id {
        payload.text("attainments[0][id]", id.to_string());
    }

    for (i, entry) in form.employment_types.iter().enumerate() {
        push_employment_entry(&mut payload, &format!("employment_types[{}]", i), entry);
    }
    // Convenience mirror of the only entry for readers of the "current" state
    if let [only] = form.employment_types.as_slice() {
        push_employment_dates(&mut payload, |field| field.to_string(), only);
    }

    for (i, file) in form.files.iter().enumerate() {
        let prefix = format!("files[{}]", i);
        payload.id(format!("{}[file_type_id]", prefix), file.file_type_id);
        payload.id(format!("{}[file_cabinet_id]", prefix), file.file_cabinet_id);
        payload.text_or_null(format!("{}[file_description]", prefix), &file.file_description);
        if let Some(original) = file.original_file_id {
            payload.text(format!("{}[original_file_id]", prefix), original.to_string());
        }
        match &file.file_attachment {
            FileValue::Upload(upload) => {
                payload.push(format!("{}[file_attachment]", prefix), WireValue::File(upload.clone()))
            }
            // Stored files are referenced through original_file_id; nothing to send
            FileValue::Stored { .. } | FileValue::None => {}
        }
    }

    payload
}

fn push_employment_entry(payload: &mut WirePayload, prefix: &str, entry: &EmploymentTypeEntry) {
    payload.id(format!("{}[id]", prefix), entry.id.server_id());
    match entry.label {
        Some(label) => payload.text(format!("{}[employment_type_label]", prefix), label.as_str()),
        None => payload.push(format!("{}[employment_type_label]", prefix), WireValue::Null),
    }
    push_employment_dates(payload, |field| format!("{}[{}]", prefix, field), entry);
}

/// Only the dates the entry's label uses are sent; an entry without a label
/// sends none.
fn push_employment_dates(
    payload: &mut WirePayload,
    key: impl Fn(&str) -> String,
    entry: &EmploymentTypeEntry,
) {
    let Some(label) = entry.label else {
        return;
    };
    if label.uses_start_date() {
        payload.date(key("employment_start_date"), entry.start_date);
    }
    if label.uses_end_date() {
        payload.date(key("employment_end_date"), entry.end_date);
    }
    if label.uses_regularization_date() {
        payload.date(key("regularization_date"), entry.regularization_date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_employee::attachment::FileAttachment;
    use crate::domain::a001_employee::employment::{EmploymentLabel, EntryId};
    use crate::domain::common::{RefField, ReferenceEntity};
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn text<'a>(p: &'a WirePayload, key: &str) -> Option<&'a str> {
        p.get(key).and_then(|v| v.as_text())
    }

    #[test]
    fn test_reference_objects_become_ids() {
        let form = EmployeeForm {
            region: RefField::Resolved(ReferenceEntity::new(13, "NCR")),
            bank: RefField::Unresolved(5),
            ..Default::default()
        };
        let p = to_wire_payload(&form);
        assert_eq!(text(&p, "region_id"), Some("13"));
        assert_eq!(text(&p, "bank_id"), Some("5"));
        assert_eq!(p.get("province_id"), Some(&WireValue::Null));
        assert_eq!(p.get("attainments[0][degree_id]"), Some(&WireValue::Null));
    }

    #[test]
    fn test_placeholder_ids_sent_as_null_server_ids_kept() {
        let form = EmployeeForm {
            employment_types: vec![
                EmploymentTypeEntry {
                    id: EntryId::Placeholder("tmp-x-1".into()),
                    label: Some(EmploymentLabel::Probationary),
                    start_date: Some(d(2026, 1, 5)),
                    end_date: Some(d(2026, 7, 5)),
                    regularization_date: None,
                },
                EmploymentTypeEntry {
                    id: EntryId::Server(77),
                    label: Some(EmploymentLabel::Regular),
                    start_date: None,
                    end_date: None,
                    regularization_date: Some(d(2026, 7, 6)),
                },
            ],
            ..Default::default()
        };
        let p = to_wire_payload(&form);
        assert_eq!(p.get("employment_types[0][id]"), Some(&WireValue::Null));
        assert_eq!(text(&p, "employment_types[1][id]"), Some("77"));
        assert_eq!(text(&p, "employment_types[0][employment_end_date]"), Some("2026-07-05"));
        assert!(!p.contains_key("employment_types[0][regularization_date]"));
        assert!(!p.contains_key("employment_types[1][employment_start_date]"));
        assert!(!p.contains_key("employment_types[1][employment_end_date]"));
        assert_eq!(text(&p, "employment_types[1][regularization_date]"), Some("2026-07-06"));
        // Two entries: no top-level mirror
        assert!(!p.contains_key("employment_start_date"));
    }

    #[test]
    fn test_single_entry_is_mirrored_top_level() {
        let form = EmployeeForm {
            employment_types: vec![EmploymentTypeEntry {
                id: EntryId::Server(1),
                label: Some(EmploymentLabel::AgencyHired),
                start_date: Some(d(2026, 2, 1)),
                end_date: Some(d(2026, 12, 31)),
                regularization_date: None,
            }],
            ..Default::default()
        };
        let p = to_wire_payload(&form);
        assert_eq!(text(&p, "employment_start_date"), Some("2026-02-01"));
        assert_eq!(text(&p, "employment_end_date"), Some("2026-12-31"));
        assert!(!p.contains_key("regularization_date"));
    }

    #[test]
    fn test_files_flattened_and_stored_files_not_resent() {
        let upload = UploadedFile {
            key: BlobKey(9),
            name: "nbi.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 1024,
        };
        let form = EmployeeForm {
            files: vec![
                FileAttachment {
                    file_type_id: Some(2),
                    file_cabinet_id: None,
                    file_description: "NBI".into(),
                    file_attachment: FileValue::Upload(upload.clone()),
                    original_file_id: None,
                },
                FileAttachment {
                    file_type_id: Some(3),
                    file_cabinet_id: Some(1),
                    file_description: String::new(),
                    file_attachment: FileValue::Stored { marker: "files/tor.pdf".into() },
                    original_file_id: Some(55),
                },
            ],
            ..Default::default()
        };
        let p = to_wire_payload(&form);
        assert_eq!(p.get("files[0][file_attachment]"), Some(&WireValue::File(upload)));
        assert_eq!(text(&p, "files[0][file_type_id]"), Some("2"));
        assert_eq!(p.get("files[1][file_description]"), Some(&WireValue::Null));
        assert!(!p.contains_key("files[1][file_attachment]"));
        assert_eq!(text(&p, "files[1][original_file_id]"), Some("55"));
        assert_eq!(p.blob_keys(), vec![BlobKey(9)]);
    }

    #[test]
    fn test_bracket_paths() {
        assert_eq!(path_to_bracket("attainments.0.school_name"), "attainments[0][school_name]");
        assert_eq!(path_to_bracket("email"), "email");
        assert_eq!(bracket_to_path("files[2][file_type_id]"), "files.2.file_type_id");
    }

    #[test]
    fn test_to_record_unflattens() {
        let mut p = WirePayload::new();
        p.text("first_name", "Ana");
        p.text("employment_types[0][employment_type_label]", "REGULAR");
        p.push("employment_types[0][id]", WireValue::Null);
        p.text("attainments[0][school_name]", "PUP");
        assert_eq!(
            p.to_record(),
            json!({
                "first_name": "Ana",
                "employment_types": [{"employment_type_label": "REGULAR", "id": null}],
                "attainments": [{"school_name": "PUP"}]
            })
        );
    }
}
