//! The sync pipeline — one linear pass, no retries.
//!
//! ```text
//! destination tail ──► watermark ──► offset in source ──► new rows
//!     new rows ──► validate/clean ──► enrich ──► finalize ──► bulk append
//!                                                            └► checkpoint
//! ```
//!
//! Aborts (empty destination, watermark missing from the source) happen
//! before any mutation. Per-record problems never abort: invalid emails
//! are dropped and counted, enrichment failures degrade to the fallback
//! triple and are counted.

use campus_core::clean::{clean_name, is_valid_email};
use campus_core::types::{
    source_columns, CandidateRecord, EmailAddress, EnrichedRecord, FinalRecord, SourceRow,
};
use campus_enrich::{Enricher, Enrichment, Usage};
use campus_sheets::{DestinationTable, SourceTable};

use crate::checkpoint::CheckpointStore;
use crate::error::SyncError;

/// Where the resume watermark comes from.
///
/// The destination's own tail is ground truth by default; the checkpoint
/// store is an audit log that can also drive resumption when the
/// destination is not trusted (e.g. after manual edits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatermarkSource {
    #[default]
    DestinationTail,
    CheckpointStore,
}

/// Knobs for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub watermark: WatermarkSource,
    /// Report what would be appended without touching the destination or
    /// the checkpoint log.
    pub dry_run: bool,
}

/// Outcome of a completed (non-aborted) run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Source rows found after the watermark.
    pub fetched: usize,
    /// Final records appended (or, under dry-run, that would have been).
    pub appended: usize,
    /// Rows dropped for a malformed shape or invalid email.
    pub invalid: usize,
    /// Records that fell back to the Unknown/Unknown triple.
    pub enrich_failures: usize,
    /// Accumulated completion-token usage across the run.
    pub usage: Usage,
    /// Email of the last appended record; `None` on a no-op run.
    pub last_email: Option<String>,
    pub dry_run: bool,
}

/// Run the pipeline once.
///
/// This is the canonical sync entrypoint; `campus sync` is a thin wrapper
/// around it.
pub fn run<S, D, E>(
    source: &S,
    dest: &D,
    enricher: &E,
    store: &CheckpointStore,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError>
where
    S: SourceTable,
    D: DestinationTable,
    E: Enricher,
{
    // Step 1: the destination tail is the resume anchor; an empty
    // destination means there is nothing to resume from.
    let dest_rows = dest.fetch_rows()?;
    if dest_rows.is_empty() {
        return Err(SyncError::EmptyDestination);
    }

    // Step 2: resolve the watermark.
    let watermark = match options.watermark {
        WatermarkSource::DestinationTail => dest_rows
            .last()
            .and_then(|row| row.first())
            .cloned()
            .unwrap_or_default(),
        WatermarkSource::CheckpointStore => store
            .last()?
            .map(|entry| entry.last_email)
            .ok_or(SyncError::NoCheckpoint)?,
    };
    tracing::info!("resume watermark: {watermark}");

    // Step 3: locate the watermark in the source email column.
    let source_rows = source.fetch_rows()?;
    let offset = locate_offset(&source_rows, &watermark)
        .ok_or(SyncError::WatermarkNotFound { email: watermark })?;

    // Step 4: everything after the watermark, in source order.
    let new_rows = &source_rows[offset..];
    tracing::info!("{} new row(s) after watermark", new_rows.len());

    // Step 5: validate emails, normalize names.
    let (candidates, invalid) = screen_rows(new_rows);
    if invalid > 0 {
        tracing::warn!("dropped {invalid} row(s) with malformed shape or invalid email");
    }

    // Steps 6–7: enrich sequentially, then reduce phones to digits.
    let mut usage = Usage::default();
    let mut enrich_failures = 0usize;
    let mut finals: Vec<FinalRecord> = Vec::with_capacity(candidates.len());
    let total = candidates.len();
    for (index, candidate) in candidates.into_iter().enumerate() {
        tracing::info!("[{}/{total}] enriching {}", index + 1, candidate.email);
        let enrichment = match enricher.enrich(&candidate.city, &candidate.phone) {
            Ok((enrichment, call_usage)) => {
                usage.absorb(call_usage);
                enrichment
            }
            Err(err) => {
                enrich_failures += 1;
                tracing::warn!("enrichment failed for {}: {err}", candidate.email);
                Enrichment::fallback(&candidate.phone)
            }
        };
        let enriched = EnrichedRecord::from_candidate(
            candidate,
            enrichment.country,
            enrichment.continent,
            enrichment.phone_corrected,
        );
        finals.push(enriched.finalize());
    }

    // No surviving records: a no-op success. The checkpoint stays put.
    if finals.is_empty() {
        tracing::info!("no records to append");
        return Ok(SyncReport {
            fetched: new_rows.len(),
            appended: 0,
            invalid,
            enrich_failures,
            usage,
            last_email: None,
            dry_run: options.dry_run,
        });
    }

    // Steps 8–9: one bulk append, then advance the checkpoint. A crash
    // between the two duplicates rows on the next run; that is the
    // documented at-least-once contract.
    let appended = finals.len();
    let last_email = finals
        .last()
        .map(|record| record.email.to_string())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = finals.into_iter().map(FinalRecord::into_cells).collect();

    if options.dry_run {
        tracing::info!("[dry-run] would append {appended} row(s)");
    } else {
        dest.append_rows(&rows)?;
        store.record(&last_email)?;
        tracing::info!("appended {appended} row(s); checkpoint -> {last_email}");
    }

    Ok(SyncReport {
        fetched: new_rows.len(),
        appended,
        invalid,
        enrich_failures,
        usage,
        last_email: Some(last_email),
        dry_run: options.dry_run,
    })
}

/// Index of the first row *after* the one whose email cell equals
/// `watermark`, or `None` if no row matches.
pub(crate) fn locate_offset(rows: &[Vec<String>], watermark: &str) -> Option<usize> {
    rows.iter()
        .position(|row| {
            row.get(source_columns::EMAIL)
                .map(|cell| cell == watermark)
                .unwrap_or(false)
        })
        .map(|index| index + 1)
}

/// Validate and clean raw rows: malformed shapes and invalid emails are
/// dropped and counted; survivors get a trimmed email and normalized name.
pub(crate) fn screen_rows(rows: &[Vec<String>]) -> (Vec<CandidateRecord>, usize) {
    let mut candidates = Vec::new();
    let mut invalid = 0usize;

    for cells in rows {
        let row = SourceRow::new(cells.clone());
        if !row.is_shaped() {
            invalid += 1;
            continue;
        }
        let email = row.email().unwrap_or_default().trim().to_owned();
        if !is_valid_email(&email) {
            invalid += 1;
            continue;
        }
        candidates.push(CandidateRecord {
            email: EmailAddress::from(email),
            name: clean_name(row.name().unwrap_or_default()),
            city: row.city().unwrap_or_default().to_owned(),
            phone: row.phone().unwrap_or_default().to_owned(),
        });
    }

    (candidates, invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn offset_points_past_the_matching_row() {
        let source = rows(&[
            &["t0", "a@x.com", "A", "c", "p"],
            &["t1", "b@x.com", "B", "c", "p"],
            &["t2", "c@x.com", "C", "c", "p"],
        ]);
        assert_eq!(locate_offset(&source, "b@x.com"), Some(2));
    }

    #[test]
    fn offset_none_when_watermark_absent() {
        let source = rows(&[&["t0", "a@x.com", "A", "c", "p"]]);
        assert_eq!(locate_offset(&source, "zz@x.com"), None);
    }

    #[test]
    fn offset_matches_email_column_not_timestamp() {
        // Watermark value also appears in the timestamp column of an
        // earlier row; only the email column counts.
        let source = rows(&[
            &["b@x.com", "a@x.com", "A", "c", "p"],
            &["t1", "b@x.com", "B", "c", "p"],
        ]);
        assert_eq!(locate_offset(&source, "b@x.com"), Some(2));
    }

    #[test]
    fn screen_drops_short_and_invalid_rows() {
        let source = rows(&[
            &["t0", "good@x.com", "Dr. Jane K. Doe", "Nairobi", "0711"],
            &["t1", "not-an-email", "B", "c", "p"],
            &["t2", "short@x.com"],
        ]);
        let (candidates, invalid) = screen_rows(&source);
        assert_eq!(candidates.len(), 1);
        assert_eq!(invalid, 2);
        assert_eq!(candidates[0].email.0, "good@x.com");
        assert_eq!(candidates[0].name, "Jane Doe TKT ONLINE CAMPUS");
    }

    #[test]
    fn screen_trims_email_whitespace() {
        let source = rows(&[&["t0", "  padded@x.com ", "Pat Doe", "Lagos", "080"]]);
        let (candidates, invalid) = screen_rows(&source);
        assert_eq!(invalid, 0);
        assert_eq!(candidates[0].email.0, "padded@x.com");
    }
}
