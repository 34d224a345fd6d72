//! Repository for the `documents` table.

use sqlx::PgPool;
use taskhub_core::types::DbId;

use crate::models::document::{CreateDocument, Document, UpdateDocument};

/// Column list shared across queries, qualified for joined reads.
const COLUMNS: &str =
    "d.id, d.project_id, d.uploaded_by, d.name, d.description, d.file_path, \
     d.created_at, d.updated_at";

/// Provides owner-scoped CRUD operations for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new document uploaded by `uploaded_by`, returning the row.
    pub async fn create(
        pool: &PgPool,
        uploaded_by: DbId,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error> {
        let query = "INSERT INTO documents (project_id, uploaded_by, name, description, file_path)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, project_id, uploaded_by, name, description, file_path, \
                       created_at, updated_at";
        sqlx::query_as::<_, Document>(query)
            .bind(input.project_id)
            .bind(uploaded_by)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.file_path)
            .fetch_one(pool)
            .await
    }

    /// Find a document by ID, visible only to the project owner.
    pub async fn find_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents d
             JOIN projects p ON p.id = d.project_id
             WHERE d.id = $1 AND p.owner_id = $2"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List all documents across the owner's projects, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents d
             JOIN projects p ON p.id = d.project_id
             WHERE p.owner_id = $1
             ORDER BY d.created_at DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update document metadata. Returns `None` if the document is not in scope.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateDocument,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = "UPDATE documents SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1 AND project_id IN (SELECT id FROM projects WHERE owner_id = $2)
             RETURNING id, project_id, uploaded_by, name, description, file_path, \
                       created_at, updated_at";
        sqlx::query_as::<_, Document>(query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a document, returning the removed row so the caller can unlink
    /// the stored file. Returns `None` if the document is not in scope.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = "DELETE FROM documents
             WHERE id = $1 AND project_id IN (SELECT id FROM projects WHERE owner_id = $2)
             RETURNING id, project_id, uploaded_by, name, description, file_path, \
                       created_at, updated_at";
        sqlx::query_as::<_, Document>(query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }
}
