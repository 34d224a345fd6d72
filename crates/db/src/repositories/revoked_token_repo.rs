//! Repository for the `revoked_tokens` table (logout blacklist).

use sqlx::PgPool;

/// Provides blacklist operations for revoked tokens.
pub struct RevokedTokenRepo;

impl RevokedTokenRepo {
    /// Record a token hash as revoked.
    ///
    /// Returns `true` if the token was newly revoked, `false` if its hash was
    /// already on the blacklist.
    pub async fn revoke(pool: &PgPool, token_hash: &str, jti: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO revoked_tokens (token_hash, jti)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_revoked_tokens_token_hash DO NOTHING",
        )
        .bind(token_hash)
        .bind(jti)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
