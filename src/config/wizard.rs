//! Enrollment wizard configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tuning knobs for the enrollment wizard.
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// Minimum query length before an existing-parent search is issued.
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,

    /// Upper bound, in bytes, for a single photo attachment.
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: usize,
}

impl WizardConfig {
    /// Validate wizard configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.search_min_chars == 0 {
            return Err(ValidationError::InvalidSearchMinChars);
        }
        if self.max_photo_bytes == 0 {
            return Err(ValidationError::InvalidPhotoCeiling);
        }
        if self.max_photo_bytes > 32 * 1024 * 1024 {
            return Err(ValidationError::PhotoCeilingTooLarge);
        }
        Ok(())
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            search_min_chars: default_search_min_chars(),
            max_photo_bytes: default_max_photo_bytes(),
        }
    }
}

fn default_search_min_chars() -> usize {
    2
}

fn default_max_photo_bytes() -> usize {
    // 5 MiB, matching the upload limit enforced by the dashboard
    5 * 1024 * 1024
}
