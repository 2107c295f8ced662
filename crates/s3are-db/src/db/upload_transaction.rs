use crate::store::{NewUploadTransaction, TransactionStore, UploadCompletion};
use async_trait::async_trait;
use s3are_core::{AppError, UploadTransaction};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const TRANSACTION_COLUMNS: &str = r#"
    transaction_id, consumer, user_name, file_name, file_extension, object_key,
    file_size, file_type, upload_url, upload_expires_at, download_url,
    download_expires_at, status, created_at, updated_at
"#;

/// Repository for upload transactions stored in Postgres
#[derive(Clone)]
pub struct UploadTransactionRepository {
    pool: PgPool,
}

impl UploadTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TransactionStore for UploadTransactionRepository {
    #[tracing::instrument(skip(self, new), fields(transaction_id = %new.transaction_id))]
    async fn create(&self, new: NewUploadTransaction) -> Result<UploadTransaction, AppError> {
        // Use dynamic SQLx queries to avoid requiring DATABASE_URL/sqlx prepare
        let query = format!(
            r#"
            INSERT INTO upload_transactions (
                transaction_id, consumer, user_name, file_name, file_extension,
                object_key, upload_url, upload_expires_at, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'waiting_file')
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(new.transaction_id)
            .bind(&new.consumer)
            .bind(&new.user_name)
            .bind(&new.file_name)
            .bind(&new.file_extension)
            .bind(&new.object_key)
            .bind(&new.upload_url)
            .bind(new.upload_expires_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(transaction_from_row(&row)?)
    }

    #[tracing::instrument(skip(self, completion), fields(transaction_id = %completion.transaction_id))]
    async fn complete(
        &self,
        completion: UploadCompletion,
    ) -> Result<Option<UploadTransaction>, AppError> {
        // The status predicate makes the transition a single compare-and-set.
        let query = format!(
            r#"
            UPDATE upload_transactions
            SET status = 'file_uploaded',
                file_size = $3,
                file_type = $4,
                download_url = $5,
                download_expires_at = $6,
                updated_at = NOW()
            WHERE transaction_id = $1
              AND consumer = $2
              AND object_key = $7
              AND status = 'waiting_file'
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(completion.transaction_id)
            .bind(&completion.consumer)
            .bind(completion.file_size)
            .bind(&completion.file_type)
            .bind(&completion.download_url)
            .bind(completion.download_expires_at)
            .bind(&completion.object_key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(transaction_from_row).transpose()?)
    }

    async fn find_owned(
        &self,
        transaction_id: Uuid,
        consumer: &str,
        user_name: &str,
    ) -> Result<Option<UploadTransaction>, AppError> {
        let query = format!(
            r#"
            SELECT {}
            FROM upload_transactions
            WHERE transaction_id = $1 AND consumer = $2 AND user_name = $3
            "#,
            TRANSACTION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(transaction_id)
            .bind(consumer)
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(transaction_from_row).transpose()?)
    }
}

fn transaction_from_row(row: &PgRow) -> Result<UploadTransaction, sqlx::Error> {
    Ok(UploadTransaction {
        transaction_id: row.try_get("transaction_id")?,
        consumer: row.try_get("consumer")?,
        user_name: row.try_get("user_name")?,
        file_name: row.try_get("file_name")?,
        file_extension: row.try_get("file_extension")?,
        object_key: row.try_get("object_key")?,
        upload_url: row.try_get("upload_url")?,
        upload_expires_at: row.try_get("upload_expires_at")?,
        download_url: row.try_get("download_url")?,
        download_expires_at: row.try_get("download_expires_at")?,
        file_size: row.try_get("file_size")?,
        file_type: row.try_get("file_type")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
