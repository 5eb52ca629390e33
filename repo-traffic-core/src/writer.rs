//! CSV output
//!
//! Both files use the same dialect as the spreadsheets they feed: comma
//! separated, minimal quoting, CRLF line endings. The detail file is rewritten
//! on every run, the summary file only ever grows.

use chrono::NaiveDate;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::constants;
use crate::error::Result;
use crate::traffic::TrafficTables;

/// Row counts of one detail write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailStats {
    pub written: usize,
    pub skipped_today: usize,
}

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out)
}

fn format_day(day: &NaiveDate) -> String {
    day.format(constants::DATE_FORMAT).to_string()
}

/// Write the header and every detail row not dated `today`.
///
/// Rows for `today` are left out because GitHub is still counting that day.
pub fn write_details<W: Write>(out: W, tables: &TrafficTables, today: NaiveDate) -> Result<DetailStats> {
    let mut wtr = csv_writer(out);
    let mut stats = DetailStats::default();

    wtr.write_record(constants::DETAILS_HEADER)?;
    for (day, repo, row) in tables.details() {
        if *day == today {
            info!(
                "Skipping data that is timestamped today (as could be potentially incomplete): {} {} {:?}",
                day, repo, row
            );
            stats.skipped_today += 1;
            continue;
        }

        wtr.write_record([
            format_day(day),
            repo.to_string(),
            row.clone_count().to_string(),
            row.clone_uniques().to_string(),
            row.view_count().to_string(),
            row.view_uniques().to_string(),
        ])?;
        stats.written += 1;
    }

    wtr.flush()?;
    Ok(stats)
}

/// Write one row per repository, each starting with `run_date`. No header.
pub fn write_summary<W: Write>(out: W, tables: &TrafficTables, run_date: NaiveDate) -> Result<usize> {
    let mut wtr = csv_writer(out);
    let run_date = format_day(&run_date);
    let mut written = 0;

    for (repo, row) in tables.summaries() {
        info!("Summary: {} {:?}", repo, row);
        wtr.write_record([
            run_date.clone(),
            repo.to_string(),
            row.clone_count.to_string(),
            row.clone_uniques.to_string(),
            row.view_count.to_string(),
            row.view_uniques.to_string(),
        ])?;
        written += 1;
    }

    wtr.flush()?;
    Ok(written)
}

/// Truncate `path` and write the detail table into it
pub fn write_details_file(path: &Path, tables: &TrafficTables, today: NaiveDate) -> Result<DetailStats> {
    let file = File::create(path)?;
    write_details(file, tables, today)
}

/// Append the summary table to `path`, creating the file if needed
pub fn write_summary_file(path: &Path, tables: &TrafficTables, run_date: NaiveDate) -> Result<usize> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    write_summary(file, tables, run_date)
}
