use quiz_core::model::EntryId;
use sqlx::Row;

use crate::repository::{SnapshotRecord, StorageError, VocabRecord};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn entry_id_from_i64(v: i64) -> Result<EntryId, StorageError> {
    u64::try_from(v)
        .map(EntryId::new)
        .map_err(|_| StorageError::Serialization("entry_id sign overflow".into()))
}

pub(crate) fn map_vocab_row(row: &sqlx::sqlite::SqliteRow) -> Result<VocabRecord, StorageError> {
    Ok(VocabRecord {
        id: entry_id_from_i64(row.try_get("id").map_err(ser)?)?,
        word: row.try_get("word").map_err(ser)?,
        definition: row.try_get("definition").map_err(ser)?,
        example: row.try_get("example").map_err(ser)?,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}

pub(crate) fn map_snapshot_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<SnapshotRecord, StorageError> {
    Ok(SnapshotRecord {
        key: row.try_get("key").map_err(ser)?,
        payload: row.try_get("payload").map_err(ser)?,
        saved_at: row.try_get("saved_at").map_err(ser)?,
    })
}
