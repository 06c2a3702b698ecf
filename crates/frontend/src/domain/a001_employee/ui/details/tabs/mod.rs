//! One component per wizard step

mod account;
mod address;
mod attainment;
mod contact;
mod employment_type;
mod fields;
mod files;
mod general;
mod position;
mod review;

pub use account::AccountTab;
pub use address::AddressTab;
pub use attainment::AttainmentTab;
pub use contact::ContactTab;
pub use employment_type::EmploymentTypeTab;
pub use files::FilesTab;
pub use general::GeneralTab;
pub use position::PositionTab;
pub use review::ReviewTab;
