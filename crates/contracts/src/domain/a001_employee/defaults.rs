//! API record → form defaults.
//!
//! Records arrive in several historical shapes (`general_info` vs flat,
//! `address` vs `address_info`, flat bracketed submission payloads). Each form
//! field is resolved by trying an ordered list of candidate paths and taking
//! the first present, non-empty value.

use super::aggregate::{DateField, EmployeeForm, RefSlot, TextField};
use super::attachment::{FileAttachment, FileValue};
use super::employment::{EmploymentLabel, EmploymentTypeEntry, EntryId, PlaceholderSeq};
use super::steps::{FormMode, FormStep};
use super::wire::{bracket_to_path, WirePayload, WireValue};
use crate::domain::common::{json_to_id, RefField};
use crate::shared::dates::normalize_date_value;
use crate::shared::formatters;
use serde_json::Value;

/// Dotted lookup; numeric segments index into arrays.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|s| !s.is_empty())
        .try_fold(record, |cursor, segment| match cursor {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// First candidate path holding a present, non-empty value.
pub fn first_present<'a, S: AsRef<str>>(record: &'a Value, paths: &[S]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|p| lookup(record, p.as_ref()))
        .find(|v| !is_blank(v))
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Sections a step's fields may be nested under, most specific first.
/// The empty section stands for the record root.
fn sections(step: FormStep) -> &'static [&'static str] {
    match step {
        FormStep::General => &["general_info", "", "personal_info", "employee"],
        FormStep::Address => &["address", "address_info", "", "general_info"],
        FormStep::Position => &["position_details", "position", "", "general_info"],
        // No root fallback: a root-level `attainment` is the whole row, not the level
        FormStep::Attainment => &["attainments.0", "attainment", "educational_attainment"],
        FormStep::Account => &["account", "accounts", "account_info", "", "general_info"],
        FormStep::Contact => &["contacts", "contact", "contact_info", "", "general_info"],
        FormStep::EmploymentType | FormStep::Files | FormStep::Review => &[""],
    }
}

fn text_names(field: TextField) -> &'static [&'static str] {
    match field {
        TextField::SchoolName => &["school_name", "school"],
        TextField::YearGraduated => &["year_graduated", "graduation_year"],
        TextField::Gender => &["gender", "sex"],
        TextField::PositionTitle => &["position_title", "position_name", "position"],
        TextField::SssNumber => &["sss_number", "sss"],
        TextField::PhilhealthNumber => &["philhealth_number", "philhealth"],
        TextField::PagibigNumber => &["pagibig_number", "pagibig", "hdmf_number"],
        TextField::TinNumber => &["tin_number", "tin"],
        TextField::Email => &["email", "email_address"],
        TextField::MobileNumber => &["mobile_number", "mobile", "contact_number"],
        TextField::TelephoneNumber => &["telephone_number", "telephone", "landline"],
        TextField::Street => &["street", "street_address", "address_line"],
        _ => &[],
    }
}

fn date_names(field: DateField) -> &'static [&'static str] {
    match field {
        DateField::BirthDate => &["birth_date", "birthdate", "date_of_birth"],
        DateField::DateHired => &["date_hired", "hired_date", "date_employed"],
    }
}

fn ref_names(slot: RefSlot) -> &'static [&'static str] {
    match slot {
        RefSlot::Region => &["region"],
        RefSlot::Province => &["province"],
        RefSlot::Municipality => &["municipality", "city"],
        RefSlot::Barangay => &["barangay"],
        RefSlot::JobLevel => &["job_level"],
        RefSlot::Schedule => &["schedule", "work_schedule"],
        RefSlot::Attainment => &["attainment", "attainment_level"],
        RefSlot::Program => &["program"],
        RefSlot::Degree => &["degree"],
        RefSlot::HonorTitle => &["honor_title", "honor"],
        RefSlot::Bank => &["bank"],
    }
}

fn candidates(step: FormStep, names: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for section in sections(step) {
        for name in names {
            if section.is_empty() {
                out.push(name.to_string());
            } else {
                out.push(format!("{}.{}", section, name));
            }
        }
    }
    out
}

fn leaf_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn resolve_text(record: &Value, field: TextField) -> String {
    let own = [leaf_name(field.path())];
    let names: Vec<&str> = own.iter().chain(text_names(field)).copied().collect();
    let raw = first_present(record, &candidates(field.step(), &names))
        .map(as_text)
        .unwrap_or_default();

    match field {
        TextField::SssNumber => formatters::format_sss(&raw),
        TextField::PhilhealthNumber => formatters::format_philhealth(&raw),
        TextField::PagibigNumber => formatters::format_pagibig(&raw),
        TextField::TinNumber => formatters::format_tin(&raw),
        TextField::MobileNumber | TextField::EmergencyContactNumber => formatters::format_mobile(&raw),
        _ => raw,
    }
}

fn resolve_reference(record: &Value, slot: RefSlot) -> RefField {
    // Embedded objects win over bare ids within the same section.
    let mut names = Vec::new();
    for name in ref_names(slot) {
        names.push(name.to_string());
        names.push(format!("{}_id", name));
    }
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    first_present(record, &candidates(slot.step(), &names))
        .map(RefField::from_json)
        .unwrap_or_default()
}

/// Turn a flat bracketed submission payload into nested JSON; nested
/// records pass through untouched.
fn normalize_shape(record: &Value) -> Value {
    let Some(map) = record.as_object() else {
        return record.clone();
    };
    if !map.keys().any(|k| k.contains('[')) {
        return record.clone();
    }
    let mut flat = WirePayload::new();
    let mut passthrough = serde_json::Map::new();
    for (key, value) in map {
        if key.contains('[') {
            let wire = match value {
                Value::Null => WireValue::Null,
                other => WireValue::Text(as_text(other)),
            };
            flat.push(key.clone(), wire);
        } else {
            passthrough.insert(bracket_to_path(key), value.clone());
        }
    }
    let mut nested = flat.to_record();
    if let Value::Object(target) = &mut nested {
        for (k, v) in passthrough {
            target.entry(k).or_insert(v);
        }
    }
    nested
}

fn parse_label(value: &Value) -> Option<EmploymentLabel> {
    match value {
        Value::String(s) => EmploymentLabel::parse(s),
        Value::Object(map) => ["name", "label", "description"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
            .and_then(EmploymentLabel::parse),
        _ => None,
    }
}

fn parse_entry_id(value: Option<&Value>, mode: FormMode, ids: &mut PlaceholderSeq) -> EntryId {
    if mode == FormMode::Create {
        return ids.next_id();
    }
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().map(EntryId::Server),
        Some(Value::String(s)) => EntryId::parse(s),
        _ => None,
    };
    parsed.unwrap_or_else(|| ids.next_id())
}

fn parse_employment_entry(row: &Value, mode: FormMode, ids: &mut PlaceholderSeq) -> EmploymentTypeEntry {
    let date = |names: &[&str]| first_present(row, names).and_then(normalize_date_value);
    EmploymentTypeEntry {
        id: parse_entry_id(row.get("id"), mode, ids),
        label: first_present(row, &["employment_type_label", "label", "employment_type", "type"])
            .and_then(parse_label),
        start_date: date(&["employment_start_date", "start_date"]),
        end_date: date(&["employment_end_date", "end_date"]),
        regularization_date: date(&["regularization_date", "date_regularized"]),
    }
}

fn resolve_employment_types(record: &Value, mode: FormMode, ids: &mut PlaceholderSeq) -> Vec<EmploymentTypeEntry> {
    let list = first_present(
        record,
        &[
            "employment_types",
            "position_details.employment_types",
            "employment_type_details",
            "employee_employment_types",
        ],
    );
    if let Some(Value::Array(rows)) = list {
        return rows
            .iter()
            .filter(|r| r.is_object())
            .map(|r| parse_employment_entry(r, mode, ids))
            .collect();
    }

    // Older records keep a single employment type flat on the record.
    for section in ["position_details", ""] {
        let scope = if section.is_empty() {
            Some(record)
        } else {
            lookup(record, section)
        };
        if let Some(scope) = scope {
            if first_present(scope, &["employment_type_label"]).is_some() {
                let mut entry = parse_employment_entry(scope, mode, ids);
                // The scope's own id is the employee's, not the entry's
                entry.id = ids.next_id();
                return vec![entry];
            }
        }
    }
    Vec::new()
}

fn resolve_files(record: &Value, mode: FormMode) -> Vec<FileAttachment> {
    let Some(Value::Array(rows)) = first_present(record, &["files", "attachments", "employee_files"]) else {
        return Vec::new();
    };
    rows.iter()
        .filter(|r| r.is_object())
        .map(|row| {
            let id_at = |paths: &[&str]| first_present(row, paths).and_then(json_to_id);
            let marker = first_present(row, &["file_attachment", "file_path", "url", "file_name"])
                .map(as_text)
                .filter(|s| !s.is_empty());
            let keep_stored = mode != FormMode::Create;
            FileAttachment {
                file_type_id: id_at(&["file_type_id", "file_type.id"]),
                file_cabinet_id: id_at(&["file_cabinet_id", "file_cabinet.id"]),
                file_description: first_present(row, &["file_description", "description"])
                    .map(as_text)
                    .unwrap_or_default(),
                file_attachment: match marker {
                    Some(marker) if keep_stored => FileValue::Stored { marker },
                    _ => FileValue::None,
                },
                original_file_id: if keep_stored {
                    id_at(&["original_file_id", "id"])
                } else {
                    None
                },
            }
        })
        .collect()
}

/// Build form defaults from a fetched record.
///
/// In create mode (prefilling a new record from an existing one) every
/// server-side row identity is dropped so the backend creates fresh rows.
pub fn to_form_defaults(record: &Value, mode: FormMode, ids: &mut PlaceholderSeq) -> EmployeeForm {
    let record = normalize_shape(record);
    let record = &record;
    let mut form = EmployeeForm::default();

    for field in TextField::ALL {
        *form.text_mut(field) = resolve_text(record, field);
    }
    for field in DateField::ALL {
        *form.date_mut(field) = first_present(record, &candidates(field.step(), date_names(field)))
            .and_then(normalize_date_value);
    }
    for slot in RefSlot::ALL {
        *form.reference_mut(slot) = resolve_reference(record, slot);
    }

    form.attainment.id = if mode == FormMode::Create {
        None
    } else {
        first_present(record, &["attainments.0.id", "attainment.id"]).and_then(json_to_id)
    };
    form.employment_types = resolve_employment_types(record, mode, ids);
    form.files = resolve_files(record, mode);
    form
}

/// Fresh defaults for a blank create session: one empty employment entry.
pub fn blank_form(ids: &mut PlaceholderSeq) -> EmployeeForm {
    EmployeeForm {
        employment_types: vec![EmploymentTypeEntry::new(ids.next_id())],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_employee::aggregate::AttainmentEntry;
    use crate::domain::a001_employee::wire::to_wire_payload;
    use crate::domain::common::ReferenceEntity;
    use chrono::NaiveDate;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_nested_record_with_legacy_keys() {
        let record = json!({
            "id": 10,
            "general_info": {"first_name": "Maria", "last_name": "Santos", "birth_date": "1990-05-02T00:00:00.000Z"},
            "address_info": {"region": {"id": 13, "name": "NCR"}, "province_id": "7", "street": "Rizal Ave"},
            "position_details": {"position": "Clerk", "job_level_id": 2, "date_hired": "2024-01-15"},
            "account": {"bank": {"id": 4, "name": "BPI"}, "sss": "0912345678"},
            "contacts": {"mobile": "+639171234567", "email": "maria@example.com"}
        });
        let mut ids = PlaceholderSeq::new("t");
        let form = to_form_defaults(&record, FormMode::Edit, &mut ids);
        assert_eq!(form.first_name, "Maria");
        assert_eq!(form.birth_date, Some(d(1990, 5, 2)));
        assert_eq!(form.region, RefField::Resolved(ReferenceEntity::new(13, "NCR")));
        assert_eq!(form.province, RefField::Unresolved(7));
        assert_eq!(form.street, "Rizal Ave");
        assert_eq!(form.position_title, "Clerk");
        assert_eq!(form.job_level, RefField::Unresolved(2));
        assert_eq!(form.date_hired, Some(d(2024, 1, 15)));
        assert_eq!(form.bank.id(), Some(4));
        assert_eq!(form.sss_number, "09-1234567-8");
        assert_eq!(form.mobile_number, "917-123-4567");
        assert_eq!(form.email, "maria@example.com");
    }

    #[test]
    fn test_blank_values_fall_through_to_next_candidate() {
        let record = json!({"general_info": {"first_name": ""}, "first_name": "Jose"});
        let form = to_form_defaults(&record, FormMode::View, &mut PlaceholderSeq::new("t"));
        assert_eq!(form.first_name, "Jose");
    }

    #[test]
    fn test_malformed_dates_become_none() {
        let record = json!({"birth_date": "31/31/1990", "employment_types": [
            {"id": 3, "employment_type_label": "PROBATIONARY", "employment_start_date": "garbage"}
        ]});
        let form = to_form_defaults(&record, FormMode::Edit, &mut PlaceholderSeq::new("t"));
        assert_eq!(form.birth_date, None);
        assert_eq!(form.employment_types[0].start_date, None);
        assert_eq!(form.employment_types[0].id, EntryId::Server(3));
    }

    #[test]
    fn test_employment_types_and_files() {
        let record = json!({
            "employment_types": [
                {"id": 5, "employment_type": {"name": "Agency Hired"}, "start_date": "2024-01-01", "end_date": "2024-12-31"},
                {"id": "tmp-old-1", "employment_type_label": "REGULAR", "regularization_date": "2025-01-01"}
            ],
            "files": [{"id": 91, "file_type": {"id": 2}, "file_path": "docs/nbi.pdf", "description": "NBI"}]
        });
        let mut ids = PlaceholderSeq::new("t");
        let form = to_form_defaults(&record, FormMode::Edit, &mut ids);
        assert_eq!(form.employment_types.len(), 2);
        assert_eq!(form.employment_types[0].label, Some(EmploymentLabel::AgencyHired));
        assert_eq!(form.employment_types[0].end_date, Some(d(2024, 12, 31)));
        assert_eq!(form.employment_types[1].id, EntryId::Placeholder("tmp-old-1".into()));
        assert_eq!(form.files[0].file_type_id, Some(2));
        assert_eq!(form.files[0].original_file_id, Some(91));
        assert_eq!(form.files[0].file_attachment, FileValue::Stored { marker: "docs/nbi.pdf".into() });

        let copy = to_form_defaults(&record, FormMode::Create, &mut ids);
        assert!(copy.employment_types.iter().all(|e| e.id.server_id().is_none()));
        assert_eq!(copy.files[0].file_attachment, FileValue::None);
        assert_eq!(copy.files[0].original_file_id, None);
    }

    #[test]
    fn test_flat_single_employment_fallback() {
        let record = json!({"id": 8, "employment_type_label": "probationary", "employment_start_date": "2026-01-01"});
        let form = to_form_defaults(&record, FormMode::Edit, &mut PlaceholderSeq::new("t"));
        assert_eq!(form.employment_types.len(), 1);
        assert_eq!(form.employment_types[0].label, Some(EmploymentLabel::Probationary));
        assert!(form.employment_types[0].id.server_id().is_none());
    }

    #[test]
    fn test_round_trip_single_entry() {
        let form = EmployeeForm {
            first_name: "Ana".into(),
            birth_date: Some(d(1995, 2, 28)),
            date_hired: Some(d(2026, 1, 5)),
            region: RefField::Resolved(ReferenceEntity::new(13, "NCR")),
            barangay: RefField::Unresolved(400),
            bank: RefField::Resolved(ReferenceEntity::new(2, "BDO")),
            sss_number: "09-1234567-8".into(),
            employment_types: vec![EmploymentTypeEntry {
                id: EntryId::Server(21),
                label: Some(EmploymentLabel::Probationary),
                start_date: Some(d(2026, 1, 5)),
                end_date: Some(d(2026, 7, 5)),
                regularization_date: None,
            }],
            attainment: AttainmentEntry {
                degree: RefField::Unresolved(3),
                school_name: "PUP".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let record = to_wire_payload(&form).to_record();
        let back = to_form_defaults(&record, FormMode::Edit, &mut PlaceholderSeq::new("t"));

        assert_eq!(back.birth_date, form.birth_date);
        assert_eq!(back.date_hired, form.date_hired);
        for slot in RefSlot::ALL {
            assert_eq!(back.reference(slot).id(), form.reference(slot).id(), "{:?}", slot);
        }
        assert_eq!(back.employment_types, form.employment_types);
        assert_eq!(back.sss_number, form.sss_number);
        assert_eq!(back.attainment.school_name, "PUP");
    }

    #[test]
    fn test_flat_submission_payload_is_accepted() {
        let record = json!({
            "first_name": "Leo",
            "region_id": "13",
            "employment_types[0][id]": "4",
            "employment_types[0][employment_type_label]": "REGULAR",
            "employment_types[0][regularization_date]": "2026-03-01"
        });
        let form = to_form_defaults(&record, FormMode::Edit, &mut PlaceholderSeq::new("t"));
        assert_eq!(form.first_name, "Leo");
        assert_eq!(form.region, RefField::Unresolved(13));
        assert_eq!(form.employment_types[0].id, EntryId::Server(4));
        assert_eq!(form.employment_types[0].regularization_date, Some(d(2026, 3, 1)));
    }
}
