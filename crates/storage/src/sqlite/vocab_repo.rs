use super::mapping::{entry_id_from_i64, map_vocab_row};
use super::SqliteRepository;
use crate::repository::{NewVocabRecord, StorageError, VocabRecord, VocabRepository};

#[async_trait::async_trait]
impl VocabRepository for SqliteRepository {
    async fn append_entry(&self, entry: &NewVocabRecord) -> Result<VocabRecord, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO vocab_entries (word, definition, example, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(&entry.word)
        .bind(&entry.definition)
        .bind(&entry.example)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(VocabRecord {
            id: entry_id_from_i64(res.last_insert_rowid())?,
            word: entry.word.clone(),
            definition: entry.definition.clone(),
            example: entry.example.clone(),
            created_at: entry.created_at,
        })
    }

    async fn list_entries(&self) -> Result<Vec<VocabRecord>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, word, definition, example, created_at
            FROM vocab_entries
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        rows.iter().map(map_vocab_row).collect()
    }
}
