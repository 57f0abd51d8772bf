//! View state for the landfall record list.
//!
//! One struct owns everything the presentation layers derive from: the
//! record set, the list and export phases, and the pagination cursor. It is
//! only ever mutated by the thread that owns it; fetch outcomes arrive as
//! `DataEvent`s and are applied here.

use crate::api::FetchError;
use crate::model::{DataEvent, Hurricane};

pub const PAGE_SIZE: usize = 10;

/// Fixed text shown when a load never reaches the server.
pub const LOAD_FAILED: &str = "Failed to fetch hurricane data.";
/// Fixed text shown when an export never reaches the server.
pub const EXPORT_FAILED: &str = "Failed to export CSV.";

/// Lifecycle of the record list. A load attempt moves Loading to exactly
/// one of Ready or Failed; a failed load stays failed until re-triggered.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPhase {
    Loading,
    Ready,
    Failed(String),
}

/// Lifecycle of the export action, tracked independently of the list.
/// Success is recorded on the sticky `export_completed` flag instead of a
/// phase so later failures cannot erase it.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportPhase {
    Idle,
    Running,
    Failed(String),
}

#[derive(Debug)]
pub struct ViewState {
    pub records: Vec<Hurricane>,
    pub list: ListPhase,
    pub export: ExportPhase,
    pub export_completed: bool,
    /// 1-based page cursor, clamped into the available range.
    pub page: usize,
    pub fetched_at: Option<String>,
    generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            list: ListPhase::Loading,
            export: ExportPhase::Idle,
            export_completed: false,
            page: 1,
            fetched_at: None,
            generation: 0,
        }
    }
}

impl ViewState {
    pub fn page_count(&self) -> usize {
        self.records.len().div_ceil(PAGE_SIZE)
    }

    /// The window of records for the current page, clamped to what exists.
    pub fn visible_records(&self) -> &[Hurricane] {
        let start = (self.page - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.records.len());
        if start >= end {
            &[]
        } else {
            &self.records[start..end]
        }
    }

    /// Pure cursor mutation; out-of-range requests clamp silently and never
    /// touch the records.
    pub fn set_page(&mut self, page: usize) {
        let max = self.page_count().max(1);
        self.page = page.clamp(1, max);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.page_count().max(1));
    }

    pub fn is_loading(&self) -> bool {
        self.list == ListPhase::Loading
    }

    /// Apply one fetch outcome. Completions from a superseded load carry a
    /// stale generation and are dropped without touching any field; the
    /// return value says whether the event was applied.
    pub fn apply_event(&mut self, ev: DataEvent) -> bool {
        match ev {
            DataEvent::LoadStarted { generation } => {
                self.generation = generation;
                self.list = ListPhase::Loading;
            }
            DataEvent::LoadFinished { generation, result } => {
                if generation != self.generation {
                    return false;
                }
                match result {
                    Ok(records) => {
                        self.records = records;
                        self.set_page(self.page);
                        self.fetched_at = Some(now_rfc3339());
                        self.list = ListPhase::Ready;
                    }
                    Err(e) => {
                        self.list = ListPhase::Failed(load_error_message(&e));
                    }
                }
            }
            DataEvent::ExportStarted => {
                self.export = ExportPhase::Running;
            }
            DataEvent::ExportFinished { result } => match result {
                Ok(()) => {
                    self.export_completed = true;
                    self.export = ExportPhase::Idle;
                }
                Err(e) => {
                    self.export = ExportPhase::Failed(export_error_message(&e));
                }
            },
        }
        true
    }
}

/// Collapse a load failure to its display message. Transport and protocol
/// failures surface the collaborator's text; a request that never completed
/// gets the fixed generic.
pub fn load_error_message(err: &FetchError) -> String {
    match err {
        FetchError::Network(_) => LOAD_FAILED.to_string(),
        other => other.to_string(),
    }
}

pub fn export_error_message(err: &FetchError) -> String {
    match err {
        FetchError::Network(_) => EXPORT_FAILED.to_string(),
        other => other.to_string(),
    }
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "now".into())
}
