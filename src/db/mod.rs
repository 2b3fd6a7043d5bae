use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use sqlx::{any::install_default_drivers, Any, AnyConnection, Connection, QueryBuilder};
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::schema::TableSchema;

pub mod encode;

use encode::render_cell;

/// Bound values per insert statement. SQLite allows 32766 host parameters
/// since 3.32, MySQL 65535 per prepared statement.
pub const MAX_BIND_PARAMS: usize = 32_766;

/// Open one connection to the store behind `url` (`mysql://…`, `sqlite://…`).
pub async fn connect(url: &str) -> Result<AnyConnection> {
    install_default_drivers();
    AnyConnection::connect(url)
        .await
        .with_context(|| format!("connecting to {}", redact(url)))
}

/// Drop and recreate `schema.name`, then insert every row of `batch` inside a
/// single transaction committed once at the end. Returns the rows inserted.
///
/// If an insert fails the transaction is rolled back, leaving the freshly
/// created table empty.
pub async fn replace_table(
    conn: &mut AnyConnection,
    schema: &TableSchema,
    batch: &RecordBatch,
) -> Result<u64> {
    replace_table_with_limit(conn, schema, batch, MAX_BIND_PARAMS).await
}

#[instrument(level = "info", skip(conn, schema, batch), fields(table = %schema.name, rows = batch.num_rows()))]
async fn replace_table_with_limit(
    conn: &mut AnyConnection,
    schema: &TableSchema,
    batch: &RecordBatch,
    max_params: usize,
) -> Result<u64> {
    let drop_sql = schema.drop_sql();
    sqlx::query(&drop_sql)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("running `{}`", drop_sql))?;

    let create = schema.create_sql();
    sqlx::query(&create)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("creating table `{}`", schema.name))?;
    debug!(columns = schema.columns.len(), "created table");

    let prefix = schema.insert_prefix();
    let chunk = schema.rows_per_insert(max_params);
    let start = Instant::now();
    let mut tx = conn.begin().await.context("starting insert transaction")?;
    let mut inserted = 0u64;
    let mut statements = 0usize;

    for first in (0..batch.num_rows()).step_by(chunk) {
        let last = (first + chunk).min(batch.num_rows());
        let rows = (first..last)
            .map(|row| {
                batch
                    .columns()
                    .iter()
                    .map(|column| render_cell(column, row))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut query = QueryBuilder::<Any>::new(&prefix);
        query.push_values(rows, |mut values, row| {
            for cell in row {
                values.push_bind(cell);
            }
        });
        inserted += query
            .build()
            .execute(&mut *tx)
            .await
            .with_context(|| {
                format!("inserting rows {}..{} into `{}`", first, last, schema.name)
            })?
            .rows_affected();
        statements += 1;
    }

    tx.commit()
        .await
        .with_context(|| format!("committing inserts into `{}`", schema.name))?;
    info!(inserted, statements, elapsed = ?start.elapsed(), "table replaced");
    Ok(inserted)
}

/// Hide the password part of a connection URL for logs and errors.
pub fn redact(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            let _ = parsed.set_password(Some("***"));
            parsed.to_string()
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_csv;
    use crate::test_support::init_tracing;
    use sqlx::Row;
    use tempfile::TempDir;

    fn sqlite_url(dir: &TempDir) -> String {
        format!("sqlite://{}?mode=rwc", dir.path().join("etl.db").display())
    }

    async fn table_rows(conn: &mut AnyConnection, sql: &str) -> Result<Vec<Vec<Option<String>>>> {
        let rows = sqlx::query(sql).fetch_all(&mut *conn).await?;
        rows.iter()
            .map(|r| {
                (0..r.len())
                    .map(|i| r.try_get::<Option<String>, _>(i).map_err(Into::into))
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn replaces_instead_of_accumulating() -> Result<()> {
        init_tracing();
        let dir = tempfile::tempdir()?;
        let mut conn = connect(&sqlite_url(&dir)).await?;

        let batch = parse_csv("hotel,country\nResort Hotel,PRT\nCity Hotel,\n")?;
        let schema = TableSchema::from_batch("bookings", &batch);

        assert_eq!(replace_table(&mut conn, &schema, &batch).await?, 2);
        assert_eq!(replace_table(&mut conn, &schema, &batch).await?, 2);

        let rows = table_rows(&mut conn, "SELECT hotel, country FROM bookings ORDER BY rowid").await?;
        assert_eq!(
            rows,
            vec![
                vec![Some("Resort Hotel".into()), Some("PRT".into())],
                vec![Some("City Hotel".into()), None],
            ]
        );
        conn.close().await?;
        Ok(())
    }

    #[tokio::test]
    async fn every_column_is_text_in_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut conn = connect(&sqlite_url(&dir)).await?;

        let batch = parse_csv("b,a,order\n1,2,3\n")?;
        let schema = TableSchema::from_batch("t", &batch);
        replace_table(&mut conn, &schema, &batch).await?;

        let cols =
            table_rows(&mut conn, "SELECT name, type FROM pragma_table_info('t') ORDER BY cid").await?;
        assert_eq!(
            cols,
            vec![
                vec![Some("b".into()), Some("TEXT".into())],
                vec![Some("a".into()), Some("TEXT".into())],
                vec![Some("order".into()), Some("TEXT".into())],
            ]
        );
        conn.close().await?;
        Ok(())
    }

    #[tokio::test]
    async fn rows_are_split_across_multi_row_inserts() -> Result<()> {
        init_tracing();
        let dir = tempfile::tempdir()?;
        let mut conn = connect(&sqlite_url(&dir)).await?;

        let batch = parse_csv("id,note\n1,a\n2,\n3,c\n4,d\n5,e\n")?;
        let schema = TableSchema::from_batch("notes", &batch);

        // two rows per statement, three statements
        assert_eq!(replace_table_with_limit(&mut conn, &schema, &batch, 5).await?, 5);

        let rows = table_rows(&mut conn, "SELECT id, note FROM notes ORDER BY rowid").await?;
        let ids: Vec<Option<String>> = rows.iter().map(|r| r[0].clone()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"].map(|v| Some(v.to_string())).to_vec());
        assert_eq!(rows[1][1], None);
        conn.close().await?;
        Ok(())
    }

    #[tokio::test]
    async fn connection_failures_are_reported() {
        let Err(err) = connect("sqlite:///definitely/not/here/etl.db").await else {
            panic!("connected to a missing database");
        };
        assert!(format!("{err:#}").contains("connecting to"), "{err:#}");
    }

    #[test]
    fn redact_hides_passwords() {
        assert_eq!(
            redact("mysql://etl:secret@db:3306/hotel"),
            "mysql://etl:***@db:3306/hotel"
        );
        assert_eq!(redact("sqlite://x.db"), "sqlite://x.db");
    }
}
