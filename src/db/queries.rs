//! Database query implementations
//!
//! The quiz only ever appends; nothing here reads predictions back.

use rusqlite::{params, Connection};
use super::DbError;

/// Insert one completed session inside its own transaction
pub fn insert_prediction(
    conn: &mut Connection,
    declared_age: u32,
    declared_profession: &str,
    guesses: &[u32],
) -> Result<i64, DbError> {
    let guesses_json = serde_json::to_string(guesses)?;

    let tx = conn.transaction()?;
    tx.execute(
        r#"
        INSERT INTO predictions (declared_age, declared_profession, guesses)
        VALUES (?1, ?2, ?3)
        "#,
        params![declared_age, declared_profession, guesses_json],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    fn stored(conn: &Connection, id: i64) -> (u32, String, Vec<u32>) {
        conn.query_row(
            "SELECT declared_age, declared_profession, guesses FROM predictions WHERE id = ?1",
            params![id],
            |row| {
                let guesses: String = row.get(2)?;
                Ok((row.get(0)?, row.get(1)?, serde_json::from_str(&guesses).unwrap()))
            },
        )
        .unwrap()
    }

    #[test]
    fn test_insert_prediction_round_trip() {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();

        let id = insert_prediction(&mut conn, 29, "librarian", &[18, 33, 71]).unwrap();

        let (age, profession, guesses) = stored(&conn, id);
        assert_eq!(age, 29);
        assert_eq!(profession, "librarian");
        assert_eq!(guesses, vec![18, 33, 71]);
    }

    #[test]
    fn test_guesses_stored_as_json_array() {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();

        let id = insert_prediction(&mut conn, 40, "", &[5, 6]).unwrap();
        let raw: String = conn
            .query_row("SELECT guesses FROM predictions WHERE id = ?1", params![id], |row| row.get(0))
            .unwrap();

        assert_eq!(raw, "[5,6]");
    }

    #[test]
    fn test_consecutive_inserts_are_independent() {
        let mut conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();

        let first = insert_prediction(&mut conn, 30, "chef", &[10, 20]).unwrap();
        let second = insert_prediction(&mut conn, 60, "judge", &[90, 80]).unwrap();

        assert_ne!(first, second);
        assert_eq!(stored(&conn, first).2, vec![10, 20]);
        assert_eq!(stored(&conn, second).2, vec![90, 80]);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM predictions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_insert_without_table_fails() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(insert_prediction(&mut conn, 30, "chef", &[10]).is_err());
    }
}
