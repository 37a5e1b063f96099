//! Report Queries
//!
//! Read-only popularity reports over a repository snapshot:
//! - View counts per workbook/view/user (the core report)
//! - Total views per workbook
//! - Most-viewed views across the server
//! - Views with no recorded traffic
//!
//! Every query runs as a single synchronous read on a caller-provided
//! connection. Nothing here mutates the store; running a report twice
//! against an unchanged snapshot yields identical output.

use serde::Serialize;

use crate::Result;

/// Total view count for one `(workbook, view, user)` combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewCountRow {
    pub workbook_name: String,
    pub view_name: String,
    pub user_name: String,
    pub total_views: i64,
}

/// Total view count for one workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookTotalRow {
    pub workbook_name: String,
    pub total_views: i64,
}

/// Total view count for one view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopViewRow {
    pub workbook_name: String,
    pub view_name: String,
    pub total_views: i64,
}

/// A view with no statistics recorded at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdleViewRow {
    pub workbook_name: String,
    pub view_name: String,
}

/// View counts per workbook/view/user
///
/// Inner-joins workbooks, views, statistics, and users, then sums `nviews`
/// per `(workbook, view, user)` group. Combinations with no statistics are
/// excluded by the inner join. Output is ordered by workbook name ascending,
/// then total views descending; equal totals order by view name, then user
/// name, so the output is deterministic.
pub fn view_counts_by_user(conn: &rusqlite::Connection) -> Result<Vec<ViewCountRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT
            w.name AS workbook_name,
            v.name AS view_name,
            u.name AS user_name,
            SUM(vs.nviews) AS total_views
        FROM workbooks w
        JOIN views v ON v.workbook_id = w.id
        JOIN views_stats vs ON vs.view_id = v.id
        JOIN system_users u ON u.id = vs.user_id
        GROUP BY w.name, v.name, u.name
        ORDER BY w.name ASC, total_views DESC, v.name ASC, u.name ASC
        "#,
    )?;

    let rows: Vec<ViewCountRow> = stmt
        .query_map([], |row| {
            Ok(ViewCountRow {
                workbook_name: row.get(0)?,
                view_name: row.get(1)?,
                user_name: row.get(2)?,
                total_views: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!(rows = rows.len(), "computed view counts by user");

    Ok(rows)
}

/// Total views per workbook, most viewed first
pub fn workbook_totals(conn: &rusqlite::Connection) -> Result<Vec<WorkbookTotalRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT
            w.name AS workbook_name,
            SUM(vs.nviews) AS total_views
        FROM workbooks w
        JOIN views v ON v.workbook_id = w.id
        JOIN views_stats vs ON vs.view_id = v.id
        GROUP BY w.name
        ORDER BY total_views DESC, w.name ASC
        "#,
    )?;

    let rows: Vec<WorkbookTotalRow> = stmt
        .query_map([], |row| {
            Ok(WorkbookTotalRow {
                workbook_name: row.get(0)?,
                total_views: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Most-viewed views across all workbooks
///
/// `limit` caps the number of rows returned; `None` returns every view
/// that has at least one statistics row.
pub fn top_views(conn: &rusqlite::Connection, limit: Option<usize>) -> Result<Vec<TopViewRow>> {
    // SQLite treats LIMIT -1 as unlimited
    let limit = limit.map_or(-1, |n| n as i64);

    let mut stmt = conn.prepare(
        r#"
        SELECT
            w.name AS workbook_name,
            v.name AS view_name,
            SUM(vs.nviews) AS total_views
        FROM workbooks w
        JOIN views v ON v.workbook_id = w.id
        JOIN views_stats vs ON vs.view_id = v.id
        GROUP BY w.name, v.name
        ORDER BY total_views DESC, w.name ASC, v.name ASC
        LIMIT ?1
        "#,
    )?;

    let rows: Vec<TopViewRow> = stmt
        .query_map(rusqlite::params![limit], |row| {
            Ok(TopViewRow {
                workbook_name: row.get(0)?,
                view_name: row.get(1)?,
                total_views: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Views with no statistics recorded
///
/// The read-only complement of the core report's inner join: exactly the
/// views that `view_counts_by_user` can never surface.
pub fn idle_views(conn: &rusqlite::Connection) -> Result<Vec<IdleViewRow>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT
            w.name AS workbook_name,
            v.name AS view_name
        FROM workbooks w
        JOIN views v ON v.workbook_id = w.id
        LEFT JOIN views_stats vs ON vs.view_id = v.id
        WHERE vs.id IS NULL
        ORDER BY w.name ASC, v.name ASC
        "#,
    )?;

    let rows: Vec<IdleViewRow> = stmt
        .query_map([], |row| {
            Ok(IdleViewRow {
                workbook_name: row.get(0)?,
                view_name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
