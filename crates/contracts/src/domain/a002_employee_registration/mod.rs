pub mod aggregate;

pub use aggregate::{
    resolve_submission_payload, ApprovalStatus, RegistrationBucket, RegistrationListQuery,
    RegistrationPage, RegistrationRow, SubmissionId, SubmissionPayload,
};
