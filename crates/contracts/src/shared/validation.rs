//! Validation rules for single text fields

use super::formatters::matches_mask;

/// Rules for one text field. `Copy` so rule tables can live in `const`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub max_length: Option<usize>,
    /// Fixed-token mask (`X` = digit), checked only on non-blank values
    pub mask: Option<&'static str>,
    pub custom_error: Option<&'static str>,
}

impl ValidationRules {
    /// Optional field without constraints
    pub const fn none() -> Self {
        Self {
            required: false,
            max_length: None,
            mask: None,
            custom_error: None,
        }
    }

    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn max_length(self, max: usize) -> Self {
        Self {
            max_length: Some(max),
            ..self
        }
    }

    pub const fn mask(self, mask: &'static str) -> Self {
        Self {
            mask: Some(mask),
            ..self
        }
    }

    pub const fn with_error(self, message: &'static str) -> Self {
        Self {
            custom_error: Some(message),
            ..self
        }
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            if self.required {
                return Err(format!("{} is required", field_label));
            }
            return Ok(());
        }

        if let Some(max) = self.max_length {
            if value.chars().count() > max {
                return Err(format!("{} must not exceed {} characters", field_label, max));
            }
        }

        if let Some(mask) = self.mask {
            if !matches_mask(value, mask) {
                return Err(match self.custom_error {
                    Some(message) => message.to_string(),
                    None => format!("{} must match the format {}", field_label, mask),
                });
            }
        }

        Ok(())
    }
}

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::formatters::SSS_MASK;

    #[test]
    fn test_required_and_optional() {
        let rules = ValidationRules::required();
        assert_eq!(
            rules.validate_string("  ", "First Name"),
            Err("First Name is required".to_string())
        );
        assert!(ValidationRules::none().validate_string("", "Suffix").is_ok());
    }

    #[test]
    fn test_mask_only_on_non_blank() {
        let rules = ValidationRules::none().mask(SSS_MASK);
        assert!(rules.validate_string("", "SSS Number").is_ok());
        assert!(rules.validate_string("09-1234567-8", "SSS Number").is_ok());
        assert!(rules.validate_string("9-1234567-8", "SSS Number").is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("juan@example.ph"));
        assert!(!is_valid_email("juan@"));
        assert!(!is_valid_email("juan example@x.ph"));
        assert!(!is_valid_email("juan@localhost"));
    }
}
