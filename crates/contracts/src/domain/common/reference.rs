use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Reference entities
// ============================================================================

/// Backend-owned lookup record (bank, region, schedule, ...).
///
/// The form only ever holds a reference to one of these; it never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntity {
    pub id: i64,
    #[serde(alias = "description", alias = "title", alias = "label", default)]
    pub name: String,
}

impl ReferenceEntity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Parse a `{id, name}`-shaped JSON object. Extra keys are ignored.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id").and_then(json_to_id)?;
        let name = ["name", "description", "title", "label"]
            .iter()
            .find_map(|k| obj.get(*k).and_then(|v| v.as_str()))
            .unwrap_or_default()
            .to_string();
        Some(Self { id, name })
    }
}

/// Kind of lookup list a reference field points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Bank,
    Region,
    Province,
    Municipality,
    Barangay,
    Schedule,
    JobLevel,
    Program,
    Degree,
    HonorTitle,
    Attainment,
    FileType,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 12] = [
        Self::Bank,
        Self::Region,
        Self::Province,
        Self::Municipality,
        Self::Barangay,
        Self::Schedule,
        Self::JobLevel,
        Self::Program,
        Self::Degree,
        Self::HonorTitle,
        Self::Attainment,
        Self::FileType,
    ];

    /// Lookup endpoint path, relative to the API prefix.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Bank => "/banks",
            Self::Region => "/regions",
            Self::Province => "/provinces",
            Self::Municipality => "/municipalities",
            Self::Barangay => "/barangays",
            Self::Schedule => "/schedules",
            Self::JobLevel => "/job-levels",
            Self::Program => "/programs",
            Self::Degree => "/degrees",
            Self::HonorTitle => "/honor-titles",
            Self::Attainment => "/attainments",
            Self::FileType => "/file-types",
        }
    }

    /// Query parameter naming the parent in the address chain, if any.
    pub fn parent_param(&self) -> Option<&'static str> {
        match self {
            Self::Province => Some("region_id"),
            Self::Municipality => Some("province_id"),
            Self::Barangay => Some("municipality_id"),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bank => "Bank",
            Self::Region => "Region",
            Self::Province => "Province",
            Self::Municipality => "Municipality",
            Self::Barangay => "Barangay",
            Self::Schedule => "Schedule",
            Self::JobLevel => "Job Level",
            Self::Program => "Program",
            Self::Degree => "Degree",
            Self::HonorTitle => "Honor Title",
            Self::Attainment => "Attainment",
            Self::FileType => "File Type",
        }
    }
}

// ============================================================================
// Reference field
// ============================================================================

/// A form slot holding a reference to a lookup record.
///
/// Upstream data delivers references as bare ids, numeric strings or full
/// objects. They are normalised into this union once, at the boundary, and
/// `Unresolved` ids are upgraded when the matching lookup list arrives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RefField {
    #[default]
    Empty,
    Unresolved(i64),
    Resolved(ReferenceEntity),
}

impl RefField {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Empty => None,
            Self::Unresolved(id) => Some(*id),
            Self::Resolved(entity) => Some(entity.id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Display name, falling back to `#id` while unresolved.
    pub fn display_name(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Unresolved(id) => format!("#{}", id),
            Self::Resolved(entity) => entity.name.clone(),
        }
    }

    /// Normalise an upstream JSON value (object, number or numeric string).
    pub fn from_json(value: &Value) -> Self {
        if value.is_object() {
            return ReferenceEntity::from_json(value)
                .map(Self::Resolved)
                .unwrap_or_default();
        }
        json_to_id(value).map(Self::Unresolved).unwrap_or_default()
    }

    /// Upgrade an unresolved id using a loaded lookup list. Returns true if
    /// the field changed.
    pub fn resolve_against(&mut self, entries: &[ReferenceEntity]) -> bool {
        let Self::Unresolved(id) = self else {
            return false;
        };
        match entries.iter().find(|e| e.id == *id) {
            Some(entity) => {
                *self = Self::Resolved(entity.clone());
                true
            }
            None => false,
        }
    }
}

impl From<ReferenceEntity> for RefField {
    fn from(entity: ReferenceEntity) -> Self {
        Self::Resolved(entity)
    }
}

/// Integer id from a JSON number or a numeric string.
pub fn json_to_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Parse a lookup-list response: either a bare array or a `{data: [...]}`
/// paginated envelope. Malformed rows are skipped.
pub fn parse_reference_list(value: &Value) -> Vec<ReferenceEntity> {
    let rows = match value {
        Value::Array(rows) => rows.as_slice(),
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(rows)) => rows.as_slice(),
            _ => &[],
        },
        _ => &[],
    };
    rows.iter().filter_map(ReferenceEntity::from_json).collect()
}
