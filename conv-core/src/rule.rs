//! Delimiter requirement rule.

/// Source file suffixes treated as structured.
const STRUCTURED_SUFFIXES: &[&str] = &[".json", ".xml"];

/// Output format names treated as structured.
const STRUCTURED_FORMATS: &[&str] = &["json", "xml"];

/// Decide whether a delimiter must be supplied.
///
/// A delimiter is optional only for a structured-to-structured conversion:
/// the source name ends in `.json` or `.xml` and the output format is `json`
/// or `xml`. Suffixes are compared exactly. Empty input on either side
/// always requires a delimiter.
#[must_use]
pub fn delimiter_required(source_file_name: &str, output_format: &str) -> bool {
    if source_file_name.is_empty() || output_format.is_empty() {
        return true;
    }

    let source_structured = STRUCTURED_SUFFIXES
        .iter()
        .any(|suffix| source_file_name.ends_with(suffix));
    let target_structured = STRUCTURED_FORMATS.contains(&output_format);

    !(source_structured && target_structured)
}
