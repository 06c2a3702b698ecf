use super::attachment::FileAttachment;
use super::employment::EmploymentTypeEntry;
use super::steps::FormStep;
use crate::domain::common::{RefField, ReferenceKind};
use crate::integer_id;
use chrono::NaiveDate;

// ============================================================================
// ID Type
// ============================================================================

integer_id!(
    /// Backend id of an employee record
    EmployeeId
);

// ============================================================================
// Form state
// ============================================================================

/// Educational attainment. The backend models attainments as a list; the
/// form edits exactly one and sends it as `attainments[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttainmentEntry {
    pub id: Option<i64>,
    pub attainment: RefField,
    pub program: RefField,
    pub degree: RefField,
    pub honor_title: RefField,
    pub school_name: String,
    pub year_graduated: String,
}

/// In-progress employee registration, owned by one open wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeForm {
    // General
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub suffix: String,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: String,
    pub gender: String,
    pub civil_status: String,
    pub nationality: String,
    pub religion: String,
    pub blood_type: String,

    // Address (strict chain: region → province → municipality → barangay)
    pub region: RefField,
    pub province: RefField,
    pub municipality: RefField,
    pub barangay: RefField,
    pub street: String,
    pub zip_code: String,

    // Position
    pub employee_number: String,
    pub position_title: String,
    pub department: String,
    pub job_level: RefField,
    pub schedule: RefField,
    pub date_hired: Option<NaiveDate>,

    // Employment types
    pub employment_types: Vec<EmploymentTypeEntry>,

    // Attainment
    pub attainment: AttainmentEntry,

    // Account
    pub bank: RefField,
    pub account_number: String,
    pub sss_number: String,
    pub philhealth_number: String,
    pub pagibig_number: String,
    pub tin_number: String,

    // Contact
    pub email: String,
    pub mobile_number: String,
    pub telephone_number: String,
    pub emergency_contact_name: String,
    pub emergency_contact_relationship: String,
    pub emergency_contact_number: String,

    // Files
    pub files: Vec<FileAttachment>,
}

impl EmployeeForm {
    pub fn full_name(&self) -> String {
        [
            self.first_name.trim(),
            self.middle_name.trim(),
            self.last_name.trim(),
            self.suffix.trim(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::FirstName => &self.first_name,
            TextField::MiddleName => &self.middle_name,
            TextField::LastName => &self.last_name,
            TextField::Suffix => &self.suffix,
            TextField::BirthPlace => &self.birth_place,
            TextField::Gender => &self.gender,
            TextField::CivilStatus => &self.civil_status,
            TextField::Nationality => &self.nationality,
            TextField::Religion => &self.religion,
            TextField::BloodType => &self.blood_type,
            TextField::Street => &self.street,
            TextField::ZipCode => &self.zip_code,
            TextField::EmployeeNumber => &self.employee_number,
            TextField::PositionTitle => &self.position_title,
            TextField::Department => &self.department,
            TextField::SchoolName => &self.attainment.school_name,
            TextField::YearGraduated => &self.attainment.year_graduated,
            TextField::AccountNumber => &self.account_number,
            TextField::SssNumber => &self.sss_number,
            TextField::PhilhealthNumber => &self.philhealth_number,
            TextField::PagibigNumber => &self.pagibig_number,
            TextField::TinNumber => &self.tin_number,
            TextField::Email => &self.email,
            TextField::MobileNumber => &self.mobile_number,
            TextField::TelephoneNumber => &self.telephone_number,
            TextField::EmergencyContactName => &self.emergency_contact_name,
            TextField::EmergencyContactRelationship => &self.emergency_contact_relationship,
            TextField::EmergencyContactNumber => &self.emergency_contact_number,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::FirstName => &mut self.first_name,
            TextField::MiddleName => &mut self.middle_name,
            TextField::LastName => &mut self.last_name,
            TextField::Suffix => &mut self.suffix,
            TextField::BirthPlace => &mut self.birth_place,
            TextField::Gender => &mut self.gender,
            TextField::CivilStatus => &mut self.civil_status,
            TextField::Nationality => &mut self.nationality,
            TextField::Religion => &mut self.religion,
            TextField::BloodType => &mut self.blood_type,
            TextField::Street => &mut self.street,
            TextField::ZipCode => &mut self.zip_code,
            TextField::EmployeeNumber => &mut self.employee_number,
            TextField::PositionTitle => &mut self.position_title,
            TextField::Department => &mut self.department,
            TextField::SchoolName => &mut self.attainment.school_name,
            TextField::YearGraduated => &mut self.attainment.year_graduated,
            TextField::AccountNumber => &mut self.account_number,
            TextField::SssNumber => &mut self.sss_number,
            TextField::PhilhealthNumber => &mut self.philhealth_number,
            TextField::PagibigNumber => &mut self.pagibig_number,
            TextField::TinNumber => &mut self.tin_number,
            TextField::Email => &mut self.email,
            TextField::MobileNumber => &mut self.mobile_number,
            TextField::TelephoneNumber => &mut self.telephone_number,
            TextField::EmergencyContactName => &mut self.emergency_contact_name,
            TextField::EmergencyContactRelationship => &mut self.emergency_contact_relationship,
            TextField::EmergencyContactNumber => &mut self.emergency_contact_number,
        }
    }

    pub fn date(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::BirthDate => self.birth_date,
            DateField::DateHired => self.date_hired,
        }
    }

    pub fn date_mut(&mut self, field: DateField) -> &mut Option<NaiveDate> {
        match field {
            DateField::BirthDate => &mut self.birth_date,
            DateField::DateHired => &mut self.date_hired,
        }
    }

    pub fn reference(&self, slot: RefSlot) -> &RefField {
        match slot {
            RefSlot::Region => &self.region,
            RefSlot::Province => &self.province,
            RefSlot::Municipality => &self.municipality,
            RefSlot::Barangay => &self.barangay,
            RefSlot::JobLevel => &self.job_level,
            RefSlot::Schedule => &self.schedule,
            RefSlot::Attainment => &self.attainment.attainment,
            RefSlot::Program => &self.attainment.program,
            RefSlot::Degree => &self.attainment.degree,
            RefSlot::HonorTitle => &self.attainment.honor_title,
            RefSlot::Bank => &self.bank,
        }
    }

    pub fn reference_mut(&mut self, slot: RefSlot) -> &mut RefField {
        match slot {
            RefSlot::Region => &mut self.region,
            RefSlot::Province => &mut self.province,
            RefSlot::Municipality => &mut self.municipality,
            RefSlot::Barangay => &mut self.barangay,
            RefSlot::JobLevel => &mut self.job_level,
            RefSlot::Schedule => &mut self.schedule,
            RefSlot::Attainment => &mut self.attainment.attainment,
            RefSlot::Program => &mut self.attainment.program,
            RefSlot::Degree => &mut self.attainment.degree,
            RefSlot::HonorTitle => &mut self.attainment.honor_title,
            RefSlot::Bank => &mut self.bank,
        }
    }
}

// ============================================================================
// Field keys
// ============================================================================

/// Free-text fields of the form. `path()` is the dotted error/record path,
/// which is also the wire key once converted to bracket notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    FirstName,
    MiddleName,
    LastName,
    Suffix,
    BirthPlace,
    Gender,
    CivilStatus,
    Nationality,
    Religion,
    BloodType,
    Street,
    ZipCode,
    EmployeeNumber,
    PositionTitle,
    Department,
    SchoolName,
    YearGraduated,
    AccountNumber,
    SssNumber,
    PhilhealthNumber,
    PagibigNumber,
    TinNumber,
    Email,
    MobileNumber,
    TelephoneNumber,
    EmergencyContactName,
    EmergencyContactRelationship,
    EmergencyContactNumber,
}

impl TextField {
    pub const ALL: [TextField; 28] = [
        Self::FirstName,
        Self::MiddleName,
        Self::LastName,
        Self::Suffix,
        Self::BirthPlace,
        Self::Gender,
        Self::CivilStatus,
        Self::Nationality,
        Self::Religion,
        Self::BloodType,
        Self::Street,
        Self::ZipCode,
        Self::EmployeeNumber,
        Self::PositionTitle,
        Self::Department,
        Self::SchoolName,
        Self::YearGraduated,
        Self::AccountNumber,
        Self::SssNumber,
        Self::PhilhealthNumber,
        Self::PagibigNumber,
        Self::TinNumber,
        Self::Email,
        Self::MobileNumber,
        Self::TelephoneNumber,
        Self::EmergencyContactName,
        Self::EmergencyContactRelationship,
        Self::EmergencyContactNumber,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::MiddleName => "middle_name",
            Self::LastName => "last_name",
            Self::Suffix => "suffix",
            Self::BirthPlace => "birth_place",
            Self::Gender => "gender",
            Self::CivilStatus => "civil_status",
            Self::Nationality => "nationality",
            Self::Religion => "religion",
            Self::BloodType => "blood_type",
            Self::Street => "street",
            Self::ZipCode => "zip_code",
            Self::EmployeeNumber => "employee_number",
            Self::PositionTitle => "position_title",
            Self::Department => "department",
            Self::SchoolName => "attainments.0.school_name",
            Self::YearGraduated => "attainments.0.year_graduated",
            Self::AccountNumber => "account_number",
            Self::SssNumber => "sss_number",
            Self::PhilhealthNumber => "philhealth_number",
            Self::PagibigNumber => "pagibig_number",
            Self::TinNumber => "tin_number",
            Self::Email => "email",
            Self::MobileNumber => "mobile_number",
            Self::TelephoneNumber => "telephone_number",
            Self::EmergencyContactName => "emergency_contact_name",
            Self::EmergencyContactRelationship => "emergency_contact_relationship",
            Self::EmergencyContactNumber => "emergency_contact_number",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::MiddleName => "Middle Name",
            Self::LastName => "Last Name",
            Self::Suffix => "Suffix",
            Self::BirthPlace => "Birth Place",
            Self::Gender => "Gender",
            Self::CivilStatus => "Civil Status",
            Self::Nationality => "Nationality",
            Self::Religion => "Religion",
            Self::BloodType => "Blood Type",
            Self::Street => "Street",
            Self::ZipCode => "Zip Code",
            Self::EmployeeNumber => "Employee Number",
            Self::PositionTitle => "Position",
            Self::Department => "Department",
            Self::SchoolName => "School Name",
            Self::YearGraduated => "Year Graduated",
            Self::AccountNumber => "Account Number",
            Self::SssNumber => "SSS Number",
            Self::PhilhealthNumber => "PhilHealth Number",
            Self::PagibigNumber => "Pag-IBIG Number",
            Self::TinNumber => "TIN",
            Self::Email => "Email",
            Self::MobileNumber => "Mobile Number",
            Self::TelephoneNumber => "Telephone Number",
            Self::EmergencyContactName => "Emergency Contact Name",
            Self::EmergencyContactRelationship => "Emergency Contact Relationship",
            Self::EmergencyContactNumber => "Emergency Contact Number",
        }
    }

    pub fn step(&self) -> FormStep {
        match self {
            Self::FirstName
            | Self::MiddleName
            | Self::LastName
            | Self::Suffix
            | Self::BirthPlace
            | Self::Gender
            | Self::CivilStatus
            | Self::Nationality
            | Self::Religion
            | Self::BloodType => FormStep::General,
            Self::Street | Self::ZipCode => FormStep::Address,
            Self::EmployeeNumber | Self::PositionTitle | Self::Department => FormStep::Position,
            Self::SchoolName | Self::YearGraduated => FormStep::Attainment,
            Self::AccountNumber
            | Self::SssNumber
            | Self::PhilhealthNumber
            | Self::PagibigNumber
            | Self::TinNumber => FormStep::Account,
            Self::Email
            | Self::MobileNumber
            | Self::TelephoneNumber
            | Self::EmergencyContactName
            | Self::EmergencyContactRelationship
            | Self::EmergencyContactNumber => FormStep::Contact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    BirthDate,
    DateHired,
}

impl DateField {
    pub const ALL: [DateField; 2] = [Self::BirthDate, Self::DateHired];

    pub fn path(&self) -> &'static str {
        match self {
            Self::BirthDate => "birth_date",
            Self::DateHired => "date_hired",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BirthDate => "Birth Date",
            Self::DateHired => "Date Hired",
        }
    }

    pub fn step(&self) -> FormStep {
        match self {
            Self::BirthDate => FormStep::General,
            Self::DateHired => FormStep::Position,
        }
    }
}

/// Reference-valued fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefSlot {
    Region,
    Province,
    Municipality,
    Barangay,
    JobLevel,
    Schedule,
    Attainment,
    Program,
    Degree,
    HonorTitle,
    Bank,
}

impl RefSlot {
    pub const ALL: [RefSlot; 11] = [
        Self::Region,
        Self::Province,
        Self::Municipality,
        Self::Barangay,
        Self::JobLevel,
        Self::Schedule,
        Self::Attainment,
        Self::Program,
        Self::Degree,
        Self::HonorTitle,
        Self::Bank,
    ];

    /// Address chain in parent → child order
    pub const ADDRESS_CHAIN: [RefSlot; 4] = [
        Self::Region,
        Self::Province,
        Self::Municipality,
        Self::Barangay,
    ];

    pub fn kind(&self) -> ReferenceKind {
        match self {
            Self::Region => ReferenceKind::Region,
            Self::Province => ReferenceKind::Province,
            Self::Municipality => ReferenceKind::Municipality,
            Self::Barangay => ReferenceKind::Barangay,
            Self::JobLevel => ReferenceKind::JobLevel,
            Self::Schedule => ReferenceKind::Schedule,
            Self::Attainment => ReferenceKind::Attainment,
            Self::Program => ReferenceKind::Program,
            Self::Degree => ReferenceKind::Degree,
            Self::HonorTitle => ReferenceKind::HonorTitle,
            Self::Bank => ReferenceKind::Bank,
        }
    }

    /// Dotted path of the id on the wire (and of backend errors)
    pub fn path(&self) -> &'static str {
        match self {
            Self::Region => "region_id",
            Self::Province => "province_id",
            Self::Municipality => "municipality_id",
            Self::Barangay => "barangay_id",
            Self::JobLevel => "job_level_id",
            Self::Schedule => "schedule_id",
            Self::Attainment => "attainments.0.attainment_id",
            Self::Program => "attainments.0.program_id",
            Self::Degree => "attainments.0.degree_id",
            Self::HonorTitle => "attainments.0.honor_title_id",
            Self::Bank => "bank_id",
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    pub fn step(&self) -> FormStep {
        match self {
            Self::Region | Self::Province | Self::Municipality | Self::Barangay => FormStep::Address,
            Self::JobLevel | Self::Schedule => FormStep::Position,
            Self::Attainment | Self::Program | Self::Degree | Self::HonorTitle => FormStep::Attainment,
            Self::Bank => FormStep::Account,
        }
    }

    /// Parent in the address chain, whose id keys this slot's lookup list.
    pub fn parent(&self) -> Option<RefSlot> {
        match self {
            Self::Province => Some(Self::Region),
            Self::Municipality => Some(Self::Province),
            Self::Barangay => Some(Self::Municipality),
            _ => None,
        }
    }

    /// Slots that must be cleared when this one changes.
    pub fn descendants(&self) -> &'static [RefSlot] {
        match self {
            Self::Region => &[Self::Province, Self::Municipality, Self::Barangay],
            Self::Province => &[Self::Municipality, Self::Barangay],
            Self::Municipality => &[Self::Barangay],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ReferenceEntity;

    #[test]
    fn test_full_name_skips_blanks() {
        let form = EmployeeForm {
            first_name: "Juan".into(),
            middle_name: " ".into(),
            last_name: "Dela Cruz".into(),
            suffix: "Jr.".into(),
            ..Default::default()
        };
        assert_eq!(form.full_name(), "Juan Dela Cruz Jr.");
    }

    #[test]
    fn test_accessors_hit_nested_attainment() {
        let mut form = EmployeeForm::default();
        *form.text_mut(TextField::SchoolName) = "UP Diliman".into();
        *form.reference_mut(RefSlot::Degree) = ReferenceEntity::new(4, "BS").into();
        assert_eq!(form.attainment.school_name, "UP Diliman");
        assert_eq!(form.attainment.degree.id(), Some(4));
        assert_eq!(form.text(TextField::SchoolName), "UP Diliman");
    }

    #[test]
    fn test_address_chain_descendants() {
        assert_eq!(RefSlot::Region.descendants().len(), 3);
        assert_eq!(RefSlot::Barangay.parent(), Some(RefSlot::Municipality));
        assert!(RefSlot::Bank.descendants().is_empty());
    }
}
