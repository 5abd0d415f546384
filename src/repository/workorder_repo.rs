// ==========================================
// 工单缓存同步系统 - 工单数据仓储 (SQLite)
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: workorder/routing_row/tracking_row/cache_meta/sync_log
//       表的快照读写与刷新审计记录
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::types::WorkOrderStatus;
use crate::domain::update_report::UpdateReport;
use crate::domain::workorder::{OperationRow, TrackingRow, WorkOrderRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::snapshot::CacheSnapshot;
use crate::repository::PersistenceAdapter;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// WorkOrderRepository - 工单仓储
// ==========================================

/// 工单仓储（关系型持久化后端）
pub struct WorkOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkOrderRepository {
    /// 创建新的工单仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// 从已有连接创建仓储实例
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&conn_guard)?;
        }

        let repo = Self { conn };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保缓存表结构存在
    fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );
            INSERT OR IGNORE INTO schema_version (version) VALUES (1);

            CREATE TABLE IF NOT EXISTS cache_meta (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                timestamp_data TEXT,
                timestamp_save TEXT
            );

            CREATE TABLE IF NOT EXISTS workorder (
                wo_index TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                order_quantity INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS routing_row (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                wo_index TEXT NOT NULL REFERENCES workorder(wo_index) ON DELETE CASCADE,
                seq INTEGER NOT NULL,
                op TEXT NOT NULL,
                op_desc TEXT NOT NULL DEFAULT '',
                resource TEXT NOT NULL DEFAULT '',
                complete INTEGER NOT NULL DEFAULT 0,
                complete_total REAL NOT NULL DEFAULT 0,
                complete_date TEXT
            );

            CREATE TABLE IF NOT EXISTS tracking_row (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                wo_index TEXT NOT NULL REFERENCES workorder(wo_index) ON DELETE CASCADE,
                seq INTEGER NOT NULL,
                date_started TEXT NOT NULL,
                date_ended TEXT,
                op TEXT NOT NULL,
                resource TEXT NOT NULL DEFAULT '',
                quantity_start REAL NOT NULL DEFAULT 0,
                quantity_end REAL NOT NULL DEFAULT 0,
                quantity_total REAL NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS sync_log (
                sync_id TEXT PRIMARY KEY,
                time_started TEXT NOT NULL,
                time_ended TEXT NOT NULL,
                records_updated INTEGER NOT NULL DEFAULT 0,
                records_failed INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_routing_row_wo
              ON routing_row(wo_index, seq);

            CREATE INDEX IF NOT EXISTS idx_tracking_row_wo
              ON tracking_row(wo_index, seq);
            "#,
        )?;
        Ok(())
    }

    // ==========================================
    // 刷新审计
    // ==========================================

    /// 写入一轮刷新的审计记录
    pub fn record_sync(&self, report: &UpdateReport) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO sync_log (
                sync_id, time_started, time_ended, records_updated, records_failed
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                report.sync_id.to_string(),
                report.time_started,
                report.time_ended,
                report.records_updated as i64,
                report.records_failed as i64,
            ],
        )?;
        Ok(())
    }

    /// 读取最近的刷新审计记录（按开始时间倒序）
    pub fn recent_syncs(&self, limit: usize) -> RepositoryResult<Vec<UpdateReport>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT sync_id, time_started, time_ended, records_updated, records_failed
            FROM sync_log
            ORDER BY time_started DESC
            LIMIT ?1
            "#,
        )?;

        let reports = stmt
            .query_map(params![limit as i64], |row| {
                let sync_id_str: String = row.get(0)?;
                Ok(UpdateReport {
                    sync_id: Uuid::parse_str(&sync_id_str).unwrap_or(Uuid::nil()),
                    time_started: row.get(1)?,
                    time_ended: row.get(2)?,
                    records_updated: row.get::<_, i64>(3)? as usize,
                    records_failed: row.get::<_, i64>(4)? as usize,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reports)
    }

    // ==========================================
    // 内部: 行装载
    // ==========================================

    fn load_routing_rows(
        conn: &Connection,
        wo_index: &str,
    ) -> RepositoryResult<Vec<OperationRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT op, op_desc, resource, complete, complete_total, complete_date
            FROM routing_row
            WHERE wo_index = ?1
            ORDER BY seq
            "#,
        )?;

        let rows = stmt
            .query_map(params![wo_index], |row| {
                Ok(OperationRow {
                    op: row.get(0)?,
                    op_desc: row.get(1)?,
                    resource: row.get(2)?,
                    complete: row.get(3)?,
                    complete_total: row.get(4)?,
                    complete_date: row.get::<_, Option<DateTime<Utc>>>(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn load_tracking_rows(
        conn: &Connection,
        wo_index: &str,
    ) -> RepositoryResult<Vec<TrackingRow>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT date_started, date_ended, op, resource,
                   quantity_start, quantity_end, quantity_total
            FROM tracking_row
            WHERE wo_index = ?1
            ORDER BY seq
            "#,
        )?;

        let rows = stmt
            .query_map(params![wo_index], |row| {
                Ok(TrackingRow {
                    date_started: row.get(0)?,
                    date_ended: row.get::<_, Option<DateTime<Utc>>>(1)?,
                    op: row.get(2)?,
                    resource: row.get(3)?,
                    quantity_start: row.get(4)?,
                    quantity_end: row.get(5)?,
                    quantity_total: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

impl PersistenceAdapter for WorkOrderRepository {
    /// 从数据库装载完整快照
    fn load(&self) -> RepositoryResult<CacheSnapshot> {
        let conn = self.get_conn()?;

        let meta = conn
            .query_row(
                "SELECT timestamp_data, timestamp_save FROM cache_meta WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, Option<DateTime<Utc>>>(0)?,
                        row.get::<_, Option<DateTime<Utc>>>(1)?,
                    ))
                },
            )
            .optional()?;
        let (timestamp_data, timestamp_save) = meta.unwrap_or((None, None));

        let mut stmt = conn.prepare(
            "SELECT wo_index, status, order_quantity FROM workorder ORDER BY rowid",
        )?;
        let mut workorders = stmt
            .query_map([], |row| {
                let status_str: String = row.get(1)?;
                Ok(WorkOrderRecord {
                    index: row.get(0)?,
                    status: WorkOrderStatus::from_db_str(&status_str),
                    order_quantity: row.get(2)?,
                    routing_rows: Vec::new(),
                    tracking_rows: Vec::new(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for wo in &mut workorders {
            wo.routing_rows = Self::load_routing_rows(&conn, &wo.index)?;
            wo.tracking_rows = Self::load_tracking_rows(&conn, &wo.index)?;
        }

        tracing::debug!("数据库快照装载完成: {} 条记录", workorders.len());

        Ok(CacheSnapshot {
            timestamp_data,
            timestamp_save,
            workorders,
        })
    }

    /// 整体写入快照（事务内先清空后重建）
    fn save(&self, snapshot: &CacheSnapshot) -> RepositoryResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute("DELETE FROM tracking_row", [])?;
        tx.execute("DELETE FROM routing_row", [])?;
        tx.execute("DELETE FROM workorder", [])?;

        tx.execute(
            r#"
            INSERT INTO cache_meta (id, timestamp_data, timestamp_save)
            VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                timestamp_data = excluded.timestamp_data,
                timestamp_save = excluded.timestamp_save
            "#,
            params![snapshot.timestamp_data, snapshot.timestamp_save],
        )?;

        for wo in &snapshot.workorders {
            // 主键约束兜底快照内的重复工单号
            tx.execute(
                "INSERT INTO workorder (wo_index, status, order_quantity) VALUES (?1, ?2, ?3)",
                params![wo.index, wo.status.to_db_str(), wo.order_quantity],
            )?;

            for (seq, row) in wo.routing_rows.iter().enumerate() {
                tx.execute(
                    r#"
                    INSERT INTO routing_row (
                        wo_index, seq, op, op_desc, resource,
                        complete, complete_total, complete_date
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        wo.index,
                        seq as i64,
                        row.op,
                        row.op_desc,
                        row.resource,
                        row.complete,
                        row.complete_total,
                        row.complete_date,
                    ],
                )?;
            }

            for (seq, row) in wo.tracking_rows.iter().enumerate() {
                tx.execute(
                    r#"
                    INSERT INTO tracking_row (
                        wo_index, seq, date_started, date_ended, op,
                        resource, quantity_start, quantity_end, quantity_total
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                    params![
                        wo.index,
                        seq as i64,
                        row.date_started,
                        row.date_ended,
                        row.op,
                        row.resource,
                        row.quantity_start,
                        row.quantity_end,
                        row.quantity_total,
                    ],
                )?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::debug!("数据库快照写入完成: {} 条记录", snapshot.workorders.len());
        Ok(())
    }
}
