use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use snapzone_data::{sample::Sample, statistics::Statistics};

/// Common header of every report written by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
}

impl ReportHeader {
    #[must_use]
    pub fn new(source: PathBuf) -> Self {
        Self {
            generated_at: Utc::now(),
            source,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub strategy: String,
    pub markers: Vec<String>,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub index: usize,
    pub sort_by: Option<String>,
    pub sample: Sample,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkersReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub strategy: String,
    pub original: Vec<String>,
    pub active: Vec<String>,
    pub color_linked: Vec<ColorLinkedMarker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorLinkedMarker {
    pub name: String,
    /// Position in the active order, absent when the marker is not active.
    pub position: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub sort_by: String,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GridReport {
    pub items: u64,
    pub rows: u64,
    pub columns: u64,
    pub spare: u64,
}
