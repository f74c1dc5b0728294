/// Derives the artifact name by replacing the first literal occurrence of
/// `source_suffix` with `target_suffix`.
///
/// This is a plain substring replace, not an extension parser: matching is
/// case-sensitive, the first occurrence wins wherever it sits, and a name
/// without the suffix comes back unchanged.
pub fn target_file_name(original: &str, source_suffix: &str, target_suffix: &str) -> String {
    if source_suffix.is_empty() {
        return original.to_string();
    }
    original.replacen(source_suffix, target_suffix, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(name: &str) -> String {
        target_file_name(name, ".pdf", ".epub")
    }

    #[test]
    fn replaces_suffix() {
        assert_eq!(transform("report.pdf"), "report.epub");
        assert_eq!(transform("document.pdf"), "document.epub");
    }

    #[test]
    fn keeps_inner_dots() {
        assert_eq!(transform("archive.tar.pdf"), "archive.tar.epub");
    }

    #[test]
    fn no_match_is_unchanged() {
        assert_eq!(transform("noext"), "noext");
        assert_eq!(transform("slides.pptx"), "slides.pptx");
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(transform("SCAN.PDF"), "SCAN.PDF");
    }

    #[test]
    fn first_occurrence_wins() {
        assert_eq!(transform("a.pdf.notes.pdf"), "a.epub.notes.pdf");
    }

    #[test]
    fn empty_source_suffix_is_a_no_op() {
        assert_eq!(target_file_name("book.pdf", "", ".epub"), "book.pdf");
    }
}
