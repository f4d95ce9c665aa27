//! Display-name normalization for grouped file paths.

/// Strip the grouping root segment from a torrent file path.
///
/// Torrent clients report multi-file paths as `<torrent root>/<path>`. The
/// root is dropped so names are relative to the acquisition; single-segment
/// paths have no root and pass through. Empty segments are collapsed.
pub fn normalize(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => String::new(),
        [single] => (*single).to_string(),
        [_, rest @ ..] => rest.join("/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_root() {
        assert_eq!(normalize("Show/S01E01.mkv"), "S01E01.mkv");
    }

    #[test]
    fn test_normalize_single_segment_passthrough() {
        assert_eq!(normalize("single.mkv"), "single.mkv");
    }

    #[test]
    fn test_normalize_idempotent_on_single_segment() {
        let once = normalize("single.mkv");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalize_keeps_nested_structure() {
        assert_eq!(
            normalize("Show/Season 1/Subs/S01E01.en.srt"),
            "Season 1/Subs/S01E01.en.srt"
        );
    }

    #[test]
    fn test_normalize_collapses_empty_segments() {
        assert_eq!(normalize("Show//S01E01.mkv"), "S01E01.mkv");
        assert_eq!(normalize("Show/"), "Show");
        assert_eq!(normalize(""), "");
    }
}
