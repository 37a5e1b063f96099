//! Referential integrity checks
//!
//! The store's own foreign-key constraints normally guarantee that every
//! view references a workbook and every statistic references a view and a
//! user. Snapshots loaded with foreign keys disabled can violate this, so
//! the check exists as an explicit, read-only verification step.

use crate::{Result, UsageError};

/// Verify that every foreign key in the snapshot resolves
///
/// Reports dangling `views.workbook_id`, `views_stats.view_id`, and
/// `views_stats.user_id` references as a [`UsageError::DataIntegrity`]
/// naming the reference kind and count. A well-formed store passes.
pub fn check_referential_integrity(conn: &rusqlite::Connection) -> Result<()> {
    let checks: &[(&str, &str)] = &[
        (
            "views.workbook_id",
            "SELECT COUNT(*) FROM views v
             LEFT JOIN workbooks w ON w.id = v.workbook_id
             WHERE w.id IS NULL",
        ),
        (
            "views_stats.view_id",
            "SELECT COUNT(*) FROM views_stats vs
             LEFT JOIN views v ON v.id = vs.view_id
             WHERE v.id IS NULL",
        ),
        (
            "views_stats.user_id",
            "SELECT COUNT(*) FROM views_stats vs
             LEFT JOIN system_users u ON u.id = vs.user_id
             WHERE u.id IS NULL",
        ),
    ];

    for (reference, sql) in checks {
        let dangling: i64 = conn.query_row(sql, [], |row| row.get(0))?;
        if dangling > 0 {
            return Err(UsageError::DataIntegrity(format!(
                "{} dangling {} reference(s)",
                dangling, reference
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_repository_schema;

    #[test]
    fn test_well_formed_store_passes() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        init_repository_schema(&conn).unwrap();

        conn.execute_batch(
            r#"
            INSERT INTO workbooks (id, name) VALUES (1, 'Sales');
            INSERT INTO views (id, workbook_id, name) VALUES (1, 1, 'Dashboard');
            INSERT INTO system_users (id, name) VALUES (1, 'alice');
            INSERT INTO views_stats (view_id, user_id, nviews) VALUES (1, 1, 3);
            "#,
        )
        .unwrap();

        check_referential_integrity(&conn).unwrap();
    }

    #[test]
    fn test_dangling_stat_reference_detected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        init_repository_schema(&conn).unwrap();

        // With foreign keys disabled on the connection, the dangling
        // insert goes through, as it would in a careless import.
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = OFF;
            INSERT INTO workbooks (id, name) VALUES (1, 'Sales');
            INSERT INTO views (id, workbook_id, name) VALUES (1, 1, 'Dashboard');
            INSERT INTO system_users (id, name) VALUES (1, 'alice');
            INSERT INTO views_stats (view_id, user_id, nviews) VALUES (99, 1, 3);
            "#,
        )
        .unwrap();

        let err = check_referential_integrity(&conn).unwrap_err();
        match err {
            UsageError::DataIntegrity(msg) => {
                assert!(msg.contains("views_stats.view_id"));
            }
            other => panic!("expected DataIntegrity, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_view_reference_detected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        init_repository_schema(&conn).unwrap();

        conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
        conn.execute("INSERT INTO views (workbook_id, name) VALUES (42, 'Orphan')", [])
            .unwrap();

        let err = check_referential_integrity(&conn).unwrap_err();
        assert!(matches!(err, UsageError::DataIntegrity(_)));
    }
}
