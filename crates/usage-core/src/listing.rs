//! Read-only listings of the repository relations.

use crate::{Result, SystemUser, View, ViewStat, Workbook};

/// List all workbooks, ordered by name
pub fn list_workbooks(conn: &rusqlite::Connection) -> Result<Vec<Workbook>> {
    let mut stmt = conn.prepare("SELECT id, name FROM workbooks ORDER BY name ASC, id ASC")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Workbook {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// List the views belonging to a workbook, ordered by name
pub fn list_views(conn: &rusqlite::Connection, workbook_id: i64) -> Result<Vec<View>> {
    let mut stmt = conn.prepare(
        "SELECT id, workbook_id, name FROM views WHERE workbook_id = ?1 ORDER BY name ASC, id ASC",
    )?;
    let rows = stmt
        .query_map([workbook_id], |row| {
            Ok(View {
                id: row.get(0)?,
                workbook_id: row.get(1)?,
                name: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// List the raw statistics observations for a view
pub fn list_view_stats(conn: &rusqlite::Connection, view_id: i64) -> Result<Vec<ViewStat>> {
    let mut stmt = conn.prepare(
        "SELECT id, view_id, user_id, nviews FROM views_stats WHERE view_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt
        .query_map([view_id], |row| {
            Ok(ViewStat {
                id: row.get(0)?,
                view_id: row.get(1)?,
                user_id: row.get(2)?,
                nviews: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// List all users, ordered by name
pub fn list_users(conn: &rusqlite::Connection) -> Result<Vec<SystemUser>> {
    let mut stmt = conn.prepare("SELECT id, name FROM system_users ORDER BY name ASC, id ASC")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SystemUser {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
