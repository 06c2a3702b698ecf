pub mod aggregate;
pub mod attachment;
pub mod defaults;
pub mod employment;
pub mod schema;
pub mod steps;
pub mod wire;

pub use aggregate::{AttainmentEntry, DateField, EmployeeForm, EmployeeId, RefSlot, TextField};
pub use attachment::{BlobKey, FileAttachment, FileValue, UploadedFile};
pub use defaults::{blank_form, to_form_defaults};
pub use employment::{
    apply_employment_rules, representative_entry, EmploymentDateField, EmploymentLabel,
    EmploymentTypeEntry, EntryId, PlaceholderSeq,
};
pub use schema::{validate_all, validate_step, FieldError, ValidationErrors};
pub use steps::{FormMode, FormStep};
pub use wire::{to_wire_payload, WirePayload, WireValue};
