use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageId, ImageName, StoredFileName};

/// Canonical image record.
///
/// `file` names the stored object in the image store; the row and the stored
/// file live and die together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub name: ImageName,
    pub file: StoredFileName,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Image`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewImage {
    pub name: ImageName,
    pub file: StoredFileName,
    pub enable: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
