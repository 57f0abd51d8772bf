use serde::{Deserialize, Serialize};

use crate::api::FetchError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
}

/// One historical landfall event, as returned by the collaborator API.
///
/// Replaced wholesale by a successful fetch; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hurricane {
    pub name: String,
    pub year: i32,
    pub month: u8,
    // Upstream serializes the day-of-month as text; kept opaque, never parsed.
    pub day: String,
    pub wind: u32,
    pub latitude: f64,
    pub longitude: f64,
}

impl Hurricane {
    /// Date column text in the upstream dashboard's month/day/year layout.
    pub fn date_display(&self) -> String {
        format!("{}/{}/{}", self.month, self.day, self.year)
    }
}

/// Events emitted by spawned fetch tasks and consumed by the view state.
#[derive(Debug)]
pub enum DataEvent {
    LoadStarted {
        generation: u64,
    },
    LoadFinished {
        generation: u64,
        result: Result<Vec<Hurricane>, FetchError>,
    },
    ExportStarted,
    ExportFinished {
        result: Result<(), FetchError>,
    },
}
