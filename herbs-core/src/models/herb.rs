//! Herb record and its write-time validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Minimum length of a trimmed herb name
pub const MIN_NAME_LEN: usize = 2;

/// Maximum length of a herb name (matches `VARCHAR(255)`)
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of a latin name (matches `VARCHAR(255)`)
pub const MAX_LATIN_NAME_LEN: usize = 255;

/// Maximum length of an image path (matches `VARCHAR(500)`)
pub const MAX_IMAGE_PATH_LEN: usize = 500;

/// A medicinal herb as stored in the `herbs` table.
///
/// `id` and `created_at` are assigned by storage on insert and never
/// written back on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Herb {
    pub id: i32,
    pub name: String,
    pub latin_name: Option<String>,
    pub description: Option<String>,
    pub is_poisonous: bool,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Herb {
    /// Unsaved herb with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Check field constraints before a write.
    ///
    /// # Rules (checked in order, first failure wins)
    /// - name is not blank after trimming
    /// - trimmed name has at least 2 characters
    /// - name has at most 255 characters
    /// - latin name, when non-empty, has at most 255 characters
    /// - image path, when non-empty, has at most 500 characters
    ///
    /// # Example
    /// ```
    /// use herbs_core::Herb;
    ///
    /// assert!(Herb::new("Chamomile").validate().is_ok());
    /// assert!(Herb::new("   ").validate().is_err());
    /// assert!(Herb::new("x").validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if char_len(trimmed) < MIN_NAME_LEN {
            return Err(ValidationError::TooShort {
                field: "name",
                min: MIN_NAME_LEN,
            });
        }

        if char_len(&self.name) > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }

        check_optional_len(self.latin_name.as_deref(), "latin name", MAX_LATIN_NAME_LEN)?;
        check_optional_len(self.image_path.as_deref(), "image path", MAX_IMAGE_PATH_LEN)?;

        Ok(())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn check_optional_len(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_empty() && char_len(v) > max => {
            Err(ValidationError::TooLong { field, max })
        }
        _ => Ok(()),
    }
}

/// Trim user input; blank input means "no value".
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Explicitly supplied field changes for an update.
///
/// `None` leaves the field untouched. For the optional text fields
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HerbPatch {
    pub name: Option<String>,
    pub latin_name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub is_poisonous: Option<bool>,
    pub image_path: Option<Option<String>>,
}

impl HerbPatch {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.latin_name.is_none()
            && self.description.is_none()
            && self.is_poisonous.is_none()
            && self.image_path.is_none()
    }

    /// Overwrite the supplied fields of `herb`. `id` and `created_at` are untouched.
    pub fn apply_to(&self, herb: &mut Herb) {
        if let Some(name) = &self.name {
            herb.name = name.clone();
        }
        if let Some(latin_name) = &self.latin_name {
            herb.latin_name = latin_name.clone();
        }
        if let Some(description) = &self.description {
            herb.description = description.clone();
        }
        if let Some(is_poisonous) = self.is_poisonous {
            herb.is_poisonous = is_poisonous;
        }
        if let Some(image_path) = &self.image_path {
            herb.image_path = image_path.clone();
        }
    }
}
