//! File kind classification by extension.

use std::path::Path;

use super::FileKind;

const VIDEO_EXTENSIONS: &[&str] = &[
    "asf", "avi", "mov", "mp4", "mpeg", "mpegts", "ts", "mkv", "wmv",
];
const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "smi", "ssa", "ass", "vtt"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Classify a file by the extension of its final path component.
///
/// Matching is case-insensitive. Anything unrecognised, including a missing
/// extension, is [`FileKind::Other`].
pub fn classify(path: impl AsRef<Path>) -> FileKind {
    let ext = match path.as_ref().extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return FileKind::Other,
    };

    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Video
    } else if SUBTITLE_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Subtitle
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Image
    } else {
        FileKind::Other
    }
}
