//! Text preview of a source file.

use std::fs;
use std::path::Path;

use conv_core::SourceKind;
use serde_json::Value;

/// Render file content for display.
///
/// JSON sources are re-indented with two spaces when they parse; everything
/// else, including broken JSON, is shown as-is. Invalid UTF-8 is replaced.
#[must_use]
pub fn render_preview(file_name: &str, content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);

    if SourceKind::from_file_name(file_name) == Some(SourceKind::Json)
        && let Ok(value) = serde_json::from_str::<Value>(&text)
        && let Ok(pretty) = serde_json::to_string_pretty(&value)
    {
        return pretty;
    }

    text.into_owned()
}

/// Read a file and render its preview.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_preview(path: &Path) -> std::io::Result<String> {
    let content = fs::read(path)?;
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    Ok(render_preview(name, &content))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_is_pretty_printed_in_order() {
        let out = render_preview("data.JSON", br#"{"b":1,"a":[true]}"#);
        assert_eq!(out, "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}");
    }

    #[test]
    fn test_broken_json_is_shown_raw() {
        let out = render_preview("data.json", b"{not json");
        assert_eq!(out, "{not json");
    }

    #[test]
    fn test_other_files_are_untouched() {
        let out = render_preview("data.csv", b"a;b\n1;2\n");
        assert_eq!(out, "a;b\n1;2\n");
        let out = render_preview("data.txt", br#"{"x":1}"#);
        assert_eq!(out, r#"{"x":1}"#);
    }

    #[test]
    fn test_read_preview_from_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("in.json");
        fs::write(&path, "[1,2]").unwrap();
        assert_eq!(read_preview(&path).unwrap(), "[\n  1,\n  2\n]");
    }
}
