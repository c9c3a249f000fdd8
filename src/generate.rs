//! The generators: read the knowledge base, write SQL.
//!
//! Each generator makes a single pass over the input and writes complete
//! statements plus `--` comment lines to a [`Write`] sink. Batches are
//! written as soon as they fill, except in
//! [`MetricsMode::Deduplicated`], which must see every row before it can
//! emit anything.

use core::fmt::{self, Display};
use std::io::{Read, Write};

use hashbrown::HashSet;
use tracing::{debug, info};

use crate::config::{GeneratorConfig, MetricsMode};
use crate::dedup::Deduplicator;
use crate::errors::Result;
use crate::literal::SqlLiteral;
use crate::records::{CompetitorRecord, LocationRecord, MetricsRecord};
use crate::render::{Batcher, CorrelatedRow, SelectUnionInsert, ValuesInsert};
use crate::schema::{
    COMPETITOR_BY_NAME, COMPETITOR_LOCATIONS, COMPETITOR_METRICS_DAILY, COMPETITORS,
    TIMEFRAME_WINDOW, Table,
};
use crate::source::CsvSource;

/// Which table a run generates statements for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The `competitors` values list.
    Competitors,
    /// `competitor_metrics_daily` upserts.
    Metrics,
    /// `competitor_locations` inserts.
    Locations,
}

impl Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Competitors => f.write_str("competitors"),
            Target::Metrics => f.write_str("metrics"),
            Target::Locations => f.write_str("locations"),
        }
    }
}

/// What a run read and wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Input rows read.
    pub rows_read: usize,
    /// Records rendered into statements.
    pub records_written: usize,
    /// `INSERT` statements written.
    pub statements: usize,
    /// Rows left out: without metrics, or beyond the competitor limit.
    pub rows_skipped: usize,
    /// Rows that replaced an earlier row for the same competitor.
    pub duplicates_replaced: usize,
}

/// Generates SQL according to a [`GeneratorConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Create a generator for `config`.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Open the configured input and generate statements for `target`.
    ///
    /// # Errors
    ///
    /// * `OpenInput` - If the input file cannot be opened.
    /// * `Csv` - If a record cannot be read.
    /// * `MissingColumn` - If the input header lacks a required column.
    /// * `Io` - If writing to `out` fails.
    pub fn run<W: Write>(&self, target: Target, out: &mut W) -> Result<GenerationSummary> {
        info!("Generating {target} SQL from {}", self.config.input.display());
        let mut source = CsvSource::open(&self.config.input)?;
        let summary = match target {
            Target::Competitors => self.competitors(&mut source, out)?,
            Target::Metrics => self.metrics(&mut source, out)?,
            Target::Locations => self.locations(&mut source, out)?,
        };
        out.flush()?;
        info!(
            "Wrote {} {target} records in {} statements ({} rows read, {} skipped, {} duplicates replaced)",
            summary.records_written,
            summary.statements,
            summary.rows_read,
            summary.rows_skipped,
            summary.duplicates_replaced
        );
        Ok(summary)
    }

    /// Write the `competitors` values list.
    ///
    /// Every row counts towards the totals in the trailing comments, but only
    /// the first `competitor_limit` rows, when a limit is configured, are
    /// inserted.
    ///
    /// # Errors
    ///
    /// * `Csv` - If a record cannot be read.
    /// * `MissingColumn` - If the input header lacks a competitor or location column.
    /// * `Io` - If writing to `out` fails.
    pub fn competitors<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        out: &mut W,
    ) -> Result<GenerationSummary> {
        let limit = self.config.competitor_limit;
        let mut records = Vec::new();
        let mut locations = 0usize;
        let mut cities = HashSet::new();
        let mut states = HashSet::new();

        while let Some(row) = source.next_row()? {
            let competitor = CompetitorRecord::from_row(&row)?;
            let location = LocationRecord::from_row(&row)?;
            locations += 1;
            cities.insert(location.city_name().to_owned());
            states.insert(location.state_name().to_owned());
            if limit.is_none_or(|limit| records.len() < limit) {
                records.push(competitor);
            }
        }

        let total = source.rows_read();
        let mut summary = GenerationSummary {
            rows_read: total,
            records_written: records.len(),
            rows_skipped: total - records.len(),
            ..GenerationSummary::default()
        };

        writeln!(out, "-- Insert competitors")?;
        if records.is_empty() {
            writeln!(out, "-- No competitors to insert")?;
        } else {
            writeln!(out, "{}", ValuesInsert::new(&COMPETITORS, &records))?;
            summary.statements = 1;
        }

        writeln!(out, "\n")?;
        writeln!(out, "-- Locations are generated separately, after competitors")?;
        writeln!(out, "-- Total: {total} competitors, {locations} locations")?;
        writeln!(
            out,
            "-- Distinct cities: {}, distinct states: {}",
            cities.len(),
            states.len()
        )?;
        if summary.rows_skipped > 0 {
            writeln!(
                out,
                "-- Limit: inserted the first {} of {total} competitors",
                records.len()
            )?;
        }
        Ok(summary)
    }

    /// Write `competitor_metrics_daily` upserts in the configured
    /// [`MetricsMode`].
    ///
    /// Rows with neither a rating nor a review count are skipped.
    ///
    /// # Errors
    ///
    /// * `Csv` - If a record cannot be read.
    /// * `MissingColumn` - If the input header lacks a metrics column.
    /// * `Io` - If writing to `out` fails.
    pub fn metrics<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        out: &mut W,
    ) -> Result<GenerationSummary> {
        match self.config.metrics_mode {
            MetricsMode::Deduplicated => self.metrics_deduplicated(source, out),
            MetricsMode::PerRow => self.metrics_per_row(source, out),
        }
    }

    fn metrics_deduplicated<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        out: &mut W,
    ) -> Result<GenerationSummary> {
        writeln!(
            out,
            "-- Import competitor metrics from CSV (deduplicated, last row per competitor wins)"
        )?;
        writeln!(out, "-- Generated metrics for unique competitors only")?;
        writeln!(out, "-- Run this in the Supabase SQL Editor after the competitors import\n")?;

        let mut dedup = Deduplicator::new();
        let mut skipped = 0usize;
        while let Some(row) = source.next_row()? {
            let Some(record) = MetricsRecord::from_row(&row)? else {
                skipped += 1;
                continue;
            };
            if dedup.insert(record) {
                debug!(
                    "Line {}: replaced earlier metrics for the same competitor",
                    row.line()
                );
            }
        }

        let duplicates_replaced = dedup.replaced();
        let records = dedup.into_records();
        writeln!(out, "-- Total unique competitors with metrics: {}\n", records.len())?;

        let mut writer = MetricsWriter::new(self.config);
        for batch in records.chunks(self.config.batch_size.get()) {
            writer.write_batch(out, batch)?;
        }

        writeln!(out, "-- Total unique metrics to import: {}", records.len())?;
        Ok(GenerationSummary {
            rows_read: source.rows_read(),
            records_written: records.len(),
            statements: writer.statements,
            rows_skipped: skipped,
            duplicates_replaced,
        })
    }

    fn metrics_per_row<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        out: &mut W,
    ) -> Result<GenerationSummary> {
        writeln!(
            out,
            "-- Import competitor metrics from CSV (one select per row, duplicates kept)"
        )?;
        writeln!(out, "-- Generated metrics for every row with a rating or review count")?;
        writeln!(out, "-- Run this in the Supabase SQL Editor after the competitors import\n")?;

        let mut writer = MetricsWriter::new(self.config);
        let mut batcher = Batcher::new(self.config.batch_size);
        let mut written = 0usize;
        let mut skipped = 0usize;
        while let Some(row) = source.next_row()? {
            let Some(record) = MetricsRecord::from_row(&row)? else {
                skipped += 1;
                continue;
            };
            written += 1;
            if let Some(batch) = batcher.push(record) {
                writer.write_batch(out, &batch)?;
            }
        }
        if let Some(batch) = batcher.finish() {
            writer.write_batch(out, &batch)?;
        }

        writeln!(out, "-- Total metrics to import: {written}")?;
        Ok(GenerationSummary {
            rows_read: source.rows_read(),
            records_written: written,
            statements: writer.statements,
            rows_skipped: skipped,
            duplicates_replaced: 0,
        })
    }

    /// Write `competitor_locations` inserts, one select per input row.
    ///
    /// # Errors
    ///
    /// * `Csv` - If a record cannot be read.
    /// * `MissingColumn` - If the input header lacks a location column.
    /// * `Io` - If writing to `out` fails.
    pub fn locations<R: Read, W: Write>(
        &self,
        source: &mut CsvSource<R>,
        out: &mut W,
    ) -> Result<GenerationSummary> {
        writeln!(out, "-- Insert competitor locations")?;
        writeln!(
            out,
            "-- Run after the competitors import; rows naming an unknown competitor select nothing\n"
        )?;

        let mut statements = 0usize;
        let mut batcher = Batcher::new(self.config.batch_size);
        while let Some(row) = source.next_row()? {
            if let Some(batch) = batcher.push(LocationRecord::from_row(&row)?) {
                write_select_union(out, &COMPETITOR_LOCATIONS, &[], &[], &batch)?;
                statements += 1;
            }
        }
        if let Some(batch) = batcher.finish() {
            write_select_union(out, &COMPETITOR_LOCATIONS, &[], &[], &batch)?;
            statements += 1;
        }

        let total = source.rows_read();
        writeln!(out, "-- Total locations to import: {total}")?;
        Ok(GenerationSummary {
            rows_read: total,
            records_written: total,
            statements,
            ..GenerationSummary::default()
        })
    }
}

/// Renders metrics batches with the snapshot and timeframe constants.
struct MetricsWriter {
    leading: [SqlLiteral; 1],
    trailing: [SqlLiteral; 1],
    statements: usize,
}

impl MetricsWriter {
    fn new(config: &GeneratorConfig) -> Self {
        Self {
            leading: [config.snapshot_date.to_literal()],
            trailing: [SqlLiteral::Text(TIMEFRAME_WINDOW.to_owned())],
            statements: 0,
        }
    }

    fn write_batch<W: Write>(&mut self, out: &mut W, batch: &[MetricsRecord]) -> Result<()> {
        write_select_union(
            out,
            &COMPETITOR_METRICS_DAILY,
            &self.leading,
            &self.trailing,
            batch,
        )?;
        self.statements += 1;
        Ok(())
    }
}

fn write_select_union<W: Write, R: CorrelatedRow>(
    out: &mut W,
    table: &Table,
    leading: &[SqlLiteral],
    trailing: &[SqlLiteral],
    batch: &[R],
) -> Result<()> {
    let statement = SelectUnionInsert::new(table, &COMPETITOR_BY_NAME, batch)
        .leading(leading)
        .trailing(trailing);
    debug!("Writing {} statement with {} selects", table.name(), statement.len());
    writeln!(out, "{statement}\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::num::NonZeroUsize;

    const METRICS_HEADER: &str = "competitor_name,rating_avg,review_count,market_presence_label\n";

    fn metrics_sql(config: &GeneratorConfig, csv: &str) -> (String, GenerationSummary) {
        let mut source = CsvSource::from_reader(csv.as_bytes()).unwrap();
        let mut out = Vec::new();
        let summary = Generator::new(config)
            .metrics(&mut source, &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_deduplicated_keeps_last_row() {
        let config = GeneratorConfig::new("unused.csv");
        let csv =
            format!("{METRICS_HEADER}Tanishq,4.1,10,\nKalyan,4.0,5,\nTanishq,4.8,12,Strong\n");
        let (sql, summary) = metrics_sql(&config, &csv);

        assert_eq!(summary.records_written, 2);
        assert_eq!(summary.duplicates_replaced, 1);
        assert_eq!(summary.statements, 1);
        assert!(sql.contains(
            "SELECT c.id, CURRENT_DATE, 4.8, 12, 'Strong', 'last_90_days' FROM competitors c \
             WHERE c.competitor_name = 'Tanishq'"
        ));
        assert!(!sql.contains("4.1"));
        assert_eq!(sql.matches("c.competitor_name = 'Tanishq'").count(), 1);
        assert!(sql.ends_with("-- Total unique metrics to import: 2\n"));
    }

    #[test]
    fn test_per_row_keeps_duplicates() {
        let config = GeneratorConfig::new("unused.csv").metrics_mode(MetricsMode::PerRow);
        let csv = format!("{METRICS_HEADER}Tanishq,4.1,10,\nTanishq,4.8,12,\n");
        let (sql, summary) = metrics_sql(&config, &csv);

        assert_eq!(summary.records_written, 2);
        assert_eq!(sql.matches("c.competitor_name = 'Tanishq'").count(), 2);
        assert!(sql.ends_with("-- Total metrics to import: 2\n"));
    }

    #[test]
    fn test_rows_without_metrics_are_skipped() {
        let config = GeneratorConfig::new("unused.csv");
        let csv = format!("{METRICS_HEADER}A,4.1,,\nB,,,Emerging\nC,,7,\n");
        let (sql, summary) = metrics_sql(&config, &csv);

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.records_written, 2);
        assert_eq!(summary.rows_skipped, 1);
        assert!(!sql.contains("'B'"));
    }

    #[test]
    fn test_batches_of_fifty() {
        for mode in [MetricsMode::Deduplicated, MetricsMode::PerRow] {
            let config = GeneratorConfig::new("unused.csv").metrics_mode(mode);
            let mut csv = String::from(METRICS_HEADER);
            for i in 0..120 {
                csv.push_str(&format!("Store {i},4.{},{i},\n", i % 10));
            }
            let (sql, summary) = metrics_sql(&config, &csv);

            assert_eq!(summary.statements, 3);
            let statements: Vec<&str> = sql
                .split("INSERT INTO competitor_metrics_daily")
                .skip(1)
                .collect();
            assert_eq!(statements.len(), 3);
            let selects: Vec<usize> = statements
                .iter()
                .map(|s| s.matches("SELECT c.id").count())
                .collect();
            assert_eq!(selects, vec![50, 50, 20]);
            let unions: Vec<usize> = statements
                .iter()
                .map(|s| s.matches("UNION ALL").count())
                .collect();
            assert_eq!(unions, vec![49, 49, 19]);
        }
    }

    #[test]
    fn test_custom_batch_size() {
        let config = GeneratorConfig::new("unused.csv").batch_size(NonZeroUsize::new(2).unwrap());
        let csv = format!("{METRICS_HEADER}A,1,,\nB,2,,\nC,3,,\n");
        let (_, summary) = metrics_sql(&config, &csv);
        assert_eq!(summary.statements, 2);
    }

    #[test]
    fn test_empty_metrics_input() {
        let config = GeneratorConfig::new("unused.csv");
        let (sql, summary) = metrics_sql(&config, METRICS_HEADER);
        assert_eq!(summary.statements, 0);
        assert!(!sql.contains("INSERT"));
        assert!(sql.contains("-- Total unique competitors with metrics: 0"));
    }

    #[test]
    fn test_locations_batches() {
        let config = GeneratorConfig::new("unused.csv").batch_size(NonZeroUsize::new(2).unwrap());
        let csv = "competitor_name,city,state,locality,store_count,branch_count\n\
                   A,Pune,Maharashtra,,3,1\nB,,,Camp,x,\nC,Surat,Gujarat,Ring Road,1,0\n";
        let mut source = CsvSource::from_reader(csv.as_bytes()).unwrap();
        let mut out = Vec::new();
        let summary = Generator::new(&config)
            .locations(&mut source, &mut out)
            .unwrap();
        let sql = String::from_utf8(out).unwrap();

        assert_eq!(summary.statements, 2);
        assert_eq!(summary.records_written, 3);
        assert!(sql.contains(
            "SELECT c.id, 'Unknown', 'Unknown', 'Camp', 1, 0 FROM competitors c \
             WHERE c.competitor_name = 'B'"
        ));
        assert_eq!(sql.matches("ON CONFLICT DO NOTHING;").count(), 2);
    }
}
