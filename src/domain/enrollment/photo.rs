//! PhotoAttachment - in-memory photo handles bounded to the wizard session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four people a draft can carry a photo for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoRole {
    Student,
    Guardian,
    Father,
    Mother,
}

impl PhotoRole {
    /// All photo slots, in multipart order.
    pub fn all() -> &'static [PhotoRole] {
        &[
            PhotoRole::Student,
            PhotoRole::Guardian,
            PhotoRole::Father,
            PhotoRole::Mother,
        ]
    }
}

impl fmt::Display for PhotoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhotoRole::Student => "student",
            PhotoRole::Guardian => "guardian",
            PhotoRole::Father => "father",
            PhotoRole::Mother => "mother",
        };
        write!(f, "{}", s)
    }
}

/// An in-memory binary photo, not persisted until submission.
///
/// Transmitted as a sibling multipart part alongside the JSON payload,
/// never embedded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size of the binary content in bytes.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}
