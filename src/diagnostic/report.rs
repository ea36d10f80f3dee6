//! Report text formatting.
//!
//! Turns a list of problem descriptions into the text block an operator
//! reads, and a set of identifiers into a snippet that can be pasted into a
//! settings file.

use std::collections::BTreeSet;

/// Line inserted between a report header and its body.
pub const ATTEND_LINE: &str = "Please attend to the following:";

/// Prefix each message with its 1-based ordinal (`"1. ..."`).
pub fn enumerate_messages<S: AsRef<str>>(messages: &[S]) -> Vec<String> {
    messages
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}. {}", i + 1, m.as_ref()))
        .collect()
}

/// Format a list of messages as a report.
///
/// Returns `None` when there is nothing to report; callers must not emit
/// anything in that case. A single message is used as-is, two or more are
/// numbered and separated by a blank line.
///
/// # Example
///
/// ```
/// use preflight::diagnostic::format_report;
///
/// assert_eq!(format_report::<&str>(&[], None, None), None);
/// assert_eq!(format_report(&["only one"], None, None).unwrap(), "only one");
/// assert_eq!(format_report(&["a", "b"], None, None).unwrap(), "1. a\n\n2. b");
/// ```
pub fn format_report<S: AsRef<str>>(
    messages: &[S],
    header: Option<&str>,
    footer: Option<&str>,
) -> Option<String> {
    if messages.is_empty() {
        return None;
    }

    let body = if messages.len() == 1 {
        messages[0].as_ref().to_string()
    } else {
        enumerate_messages(messages).join("\n\n")
    };

    let mut report = String::new();
    if let Some(header) = header {
        report.push_str(header);
        report.push('\n');
        report.push_str(ATTEND_LINE);
        report.push_str("\n\n");
    }
    report.push_str(&body);
    if let Some(footer) = footer {
        report.push_str("\n\n");
        report.push_str(footer);
    }
    Some(report)
}

/// Render identifiers as quoted, comma-terminated lines indented by four
/// spaces. Items are deduplicated and sorted.
pub fn format_literal_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sorted: BTreeSet<String> = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect();

    sorted
        .iter()
        .map(|item| format!("    '{}',", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_messages_are_a_no_op() {
        let none: [&str; 0] = [];
        assert!(format_report(&none, Some("Header"), Some("Footer")).is_none());
    }

    #[test]
    fn single_message_is_unprefixed() {
        assert_eq!(format_report(&["only one"], None, None).unwrap(), "only one");
    }

    #[test]
    fn multiple_messages_are_numbered() {
        assert_eq!(
            format_report(&["a", "b", "c"], None, None).unwrap(),
            "1. a\n\n2. b\n\n3. c"
        );
    }

    #[test]
    fn header_adds_attend_line() {
        let report = format_report(&["fix it"], Some("Cache is misconfigured"), None).unwrap();
        assert_eq!(
            report,
            "Cache is misconfigured\nPlease attend to the following:\n\nfix it"
        );
    }

    #[test]
    fn footer_follows_blank_line() {
        let report = format_report(&["a", "b"], None, Some("See the docs")).unwrap();
        assert_eq!(report, "1. a\n\n2. b\n\nSee the docs");
    }

    #[test]
    fn enumerate_starts_at_one() {
        let numbered = enumerate_messages(&["x", "y"]);
        assert_eq!(numbered, vec!["1. x".to_string(), "2. y".to_string()]);
    }

    #[test]
    fn literal_list_is_sorted_and_indented() {
        let list = format_literal_list(["b.Middleware", "a.Middleware"]);
        assert_eq!(list, "    'a.Middleware',\n    'b.Middleware',");
    }

    #[test]
    fn literal_list_deduplicates() {
        let list = format_literal_list(vec!["x", "x"]);
        assert_eq!(list, "    'x',");
    }

    #[test]
    fn literal_list_of_nothing_is_empty() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(format_literal_list(empty), "");
    }
}
