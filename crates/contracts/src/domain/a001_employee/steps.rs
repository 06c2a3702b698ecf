use serde::{Deserialize, Serialize};

/// One of the nine wizard sections, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    General,
    Address,
    Position,
    EmploymentType,
    Attainment,
    Account,
    Contact,
    Files,
    Review,
}

impl FormStep {
    pub const ALL: [FormStep; 9] = [
        Self::General,
        Self::Address,
        Self::Position,
        Self::EmploymentType,
        Self::Attainment,
        Self::Account,
        Self::Contact,
        Self::Files,
        Self::Review,
    ];

    pub const FIRST: FormStep = Self::General;
    pub const LAST: FormStep = Self::Review;

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::General => "General Info",
            Self::Address => "Address",
            Self::Position => "Position",
            Self::EmploymentType => "Employment Type",
            Self::Attainment => "Attainment",
            Self::Account => "Account",
            Self::Contact => "Contact",
            Self::Files => "Files",
            Self::Review => "Review",
        }
    }
}

/// Orthogonal to the step: governs mutability and the action set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit,
    View,
}

impl FormMode {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::View)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_bounds() {
        assert_eq!(FormStep::General.prev(), None);
        assert_eq!(FormStep::General.next(), Some(FormStep::Address));
        assert_eq!(FormStep::Review.next(), None);
        assert_eq!(FormStep::from_index(3), Some(FormStep::EmploymentType));
        assert!(FormStep::LAST.is_last());
    }
}
