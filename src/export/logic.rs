// src/export/logic.rs

use crate::core::calculator::compliance::{RevenueSource, weekly_crew_summary};
use crate::core::filters::{search_hours, search_job_logs};
use crate::core::hours::HoursLogic;
use crate::core::job_logs::JobLogLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{HoursExport, JobLogExport, WeeklyWorkerExport};
use crate::export::{ExportFormat, ExportTarget};
use crate::models::session::Session;
use crate::ui::messages::warning;
use crate::utils::date::DateRange;
use crate::utils::path::{expand_tilde, is_absolute};
use std::path::Path;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub target: ExportTarget,
    pub format: ExportFormat,
    /// Absolute output path.
    pub file: String,
    pub range: DateRange,
    pub search: Option<String>,
    /// Crew filter for job logs; required for the weekly report.
    pub crew_id: Option<String>,
    pub week_start: Option<String>,
    pub source: RevenueSource,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Returns the number of exported records (0 means nothing was written).
    pub fn export(pool: &mut DbPool, session: &Session, req: &ExportRequest) -> AppResult<usize> {
        session.require_admin()?;

        let expanded = expand_tilde(&req.file);
        let path = expanded.as_path();
        if !is_absolute(&req.file) {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                req.file
            )));
        }

        let written = match req.target {
            ExportTarget::JobLogs => {
                let logs = match req.crew_id.as_deref() {
                    Some(crew) => JobLogLogic::list_for_crew(pool, session, Some(crew), &req.range)?,
                    None => JobLogLogic::list_all(pool, session, &req.range)?,
                };
                let logs = search_job_logs(logs, req.search.as_deref());
                let rows: Vec<JobLogExport> = logs.iter().map(JobLogExport::from).collect();
                write_rows(&rows, req, path)?
            }
            ExportTarget::Hours => {
                let entries = HoursLogic::list_all(pool, session, &req.range)?;
                let entries = search_hours(entries, req.search.as_deref());
                let rows: Vec<HoursExport> = entries.iter().map(HoursExport::from).collect();
                write_rows(&rows, req, path)?
            }
            ExportTarget::Weekly => return Self::export_weekly(pool, session, req, path),
        };

        if written > 0 {
            ttlog(
                &pool.conn,
                "export",
                &req.file,
                &format!("{} rows exported as {}", written, req.format.as_str()),
            )?;
        }
        Ok(written)
    }

    /// The weekly report is written even when no worker logged hours.
    /// Returns the number of records in the file: CSV lines, or 1 for the
    /// JSON document.
    fn export_weekly(
        pool: &mut DbPool,
        session: &Session,
        req: &ExportRequest,
        path: &Path,
    ) -> AppResult<usize> {
        let crew_id = req.crew_id.as_deref().ok_or(AppError::MissingField("crew_id"))?;
        let week_start = req
            .week_start
            .as_deref()
            .ok_or(AppError::MissingField("week_start"))?;
        let summary = weekly_crew_summary(pool, session, crew_id, week_start, req.source)?;

        ensure_writable(path, req.force)?;
        let written = match req.format {
            ExportFormat::Json => {
                export_json(&summary, path)?;
                1
            }
            ExportFormat::Csv => {
                let rows = WeeklyWorkerExport::rows(&summary);
                export_csv(&rows, path)?;
                rows.len()
            }
        };

        ttlog(
            &pool.conn,
            "export",
            &req.file,
            &format!(
                "weekly report for {} ({} workers, {} records) exported as {}",
                summary.week_start,
                summary.workers.len(),
                written,
                req.format.as_str()
            ),
        )?;
        Ok(written)
    }
}

fn write_rows<T: serde::Serialize>(rows: &[T], req: &ExportRequest, path: &Path) -> AppResult<usize> {
    if rows.is_empty() {
        warning("No rows found for the selected filters.");
        return Ok(0);
    }

    ensure_writable(path, req.force)?;
    match req.format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
    }
    Ok(rows.len())
}
