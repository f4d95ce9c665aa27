//! Canonical acquisition types shared by every source.

use serde::{Deserialize, Serialize};

use super::classify::classify;

/// Semantic kind of a file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Video,
    Subtitle,
    Image,
    Other,
}

impl FileKind {
    /// Returns the string representation for API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Video => "video",
            FileKind::Subtitle => "subtitle",
            FileKind::Image => "image",
            FileKind::Other => "other",
        }
    }
}

/// Where an acquisition currently lives.
///
/// Torrent-sourced items are always `Downloading`, landed items are always
/// `Completed`. No transition between the two is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionState {
    Downloading,
    Completed,
}

impl AcquisitionState {
    /// Returns the string representation for API responses and filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            AcquisitionState::Downloading => "downloading",
            AcquisitionState::Completed => "completed",
        }
    }
}

/// One file belonging to an acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the acquisition, `/`-separated.
    pub name: String,
    /// Kind derived from the extension of `name`.
    #[serde(rename = "file_type")]
    pub kind: FileKind,
}

impl FileRecord {
    /// Build a record from an already-normalized display name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = classify(&name);
        Self { name, kind }
    }
}

/// One logical download item, either an active transfer or a landed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acquisition {
    pub id: String,
    pub state: AcquisitionState,
    pub name: String,
    /// Fraction complete in `[0.0, 1.0]`.
    pub progress: f64,
    /// Sorted ascending by name.
    pub files: Vec<FileRecord>,
}

impl Acquisition {
    /// An item still being transferred by the torrent client.
    pub fn downloading(
        id: impl Into<String>,
        name: impl Into<String>,
        progress: f64,
        files: Vec<FileRecord>,
    ) -> Self {
        Self::build(
            id.into(),
            AcquisitionState::Downloading,
            name.into(),
            progress.clamp(0.0, 1.0),
            files,
        )
    }

    /// An item that has landed in the incoming directory.
    pub fn completed(id: impl Into<String>, name: impl Into<String>, files: Vec<FileRecord>) -> Self {
        Self::build(id.into(), AcquisitionState::Completed, name.into(), 1.0, files)
    }

    fn build(
        id: String,
        state: AcquisitionState,
        name: String,
        progress: f64,
        mut files: Vec<FileRecord>,
    ) -> Self {
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            id,
            state,
            name,
            progress,
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_as_str() {
        assert_eq!(AcquisitionState::Downloading.as_str(), "downloading");
        assert_eq!(AcquisitionState::Completed.as_str(), "completed");
    }

    #[test]
    fn test_file_kind_serialization() {
        assert_eq!(serde_json::to_string(&FileKind::Video).unwrap(), "\"video\"");
        assert_eq!(
            serde_json::to_string(&FileKind::Subtitle).unwrap(),
            "\"subtitle\""
        );
    }

    #[test]
    fn test_file_record_serializes_kind_as_file_type() {
        let record = FileRecord::new("movie.mkv");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "movie.mkv");
        assert_eq!(json["file_type"], "video");
    }

    #[test]
    fn test_constructors_sort_files() {
        let acquisition = Acquisition::completed(
            "Show",
            "Show",
            vec![FileRecord::new("b.srt"), FileRecord::new("a.mkv")],
        );
        let names: Vec<_> = acquisition.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.mkv", "b.srt"]);
        assert_eq!(acquisition.state, AcquisitionState::Completed);
        assert!((acquisition.progress - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_downloading_clamps_progress() {
        let acquisition = Acquisition::downloading("1", "x", 1.7, vec![]);
        assert!((acquisition.progress - 1.0).abs() < f64::EPSILON);

        let acquisition = Acquisition::downloading("1", "x", -0.2, vec![]);
        assert!(acquisition.progress.abs() < f64::EPSILON);
    }
}
