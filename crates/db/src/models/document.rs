//! Document entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhub_core::types::{DbId, Timestamp};

/// A document row from the `documents` table.
///
/// `file_path` is the server-side storage location of the uploaded blob,
/// relative to the media root.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub project_id: DbId,
    pub uploaded_by: DbId,
    pub name: String,
    pub description: Option<String>,
    pub file_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a document. The uploader is never client-supplied.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub file_path: String,
}

/// DTO for updating document metadata. The stored file is immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDocument {
    pub name: Option<String>,
    pub description: Option<String>,
}
