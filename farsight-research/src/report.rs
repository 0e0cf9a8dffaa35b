//! Append-only report assembly. Each method pushes finished lines; the
//! buffer is joined with newlines once at the end and never edited in place.

use farsight_web::SearchResult;

const MAX_KEY_POINTS: usize = 10;
/// Headings this short are navigation noise, not key points.
const MIN_HEADING_CHARS: usize = 4;
const SUMMARY_SEGMENTS: usize = 3;
const SUMMARY_CHAR_LIMIT: usize = 500;

pub struct ReportBuilder {
    lines: Vec<String>,
}

impl ReportBuilder {
    pub fn new(topic: &str) -> Self {
        Self {
            lines: vec![format!("# Deep Research: {topic}\n")],
        }
    }

    /// Numbered list of every hit, in provider order.
    pub fn overview(&mut self, results: &[SearchResult]) {
        self.lines.push("## Search Results Overview\n".into());
        for (idx, result) in results.iter().enumerate() {
            self.lines.push(format!("{}. **{}**", idx + 1, result.title));
            self.lines.push(format!("   URL: {}", result.url));
            self.lines.push(format!("   Summary: {}\n", result.snippet));
        }
    }

    pub fn begin_analysis(&mut self) {
        self.lines.push("## Detailed Content Analysis\n".into());
    }

    pub fn source_header(&mut self, rank: usize, title: &str, url: &str) {
        self.lines.push(format!("### Source {rank}: {title}"));
        self.lines.push(format!("URL: {url}\n"));
    }

    pub fn source_unreachable(&mut self, reason: &str) {
        self.lines.push(format!(
            "Could not access this page: Error fetching page: {reason}\n"
        ));
    }

    /// Outline of the page: up to ten substantial headings, or an explicit
    /// "none found" line so silence is distinguishable from an empty page.
    pub fn key_points(&mut self, headings: &[String]) {
        self.lines.push("#### Key Points:\n".into());
        let mut found = false;
        for text in headings
            .iter()
            .filter(|t| t.chars().count() >= MIN_HEADING_CHARS)
            .take(MAX_KEY_POINTS)
        {
            self.lines.push(format!("- {text}"));
            found = true;
        }
        if !found {
            self.lines
                .push("- No clear headings found on this page.".into());
        }
        self.lines.push(String::new());
    }

    /// First few segments of the page's best content guess, hard-capped.
    pub fn summary(&mut self, text: &str) {
        self.lines.push("#### Summary of Content:\n".into());
        let lead: String = text
            .split('\n')
            .take(SUMMARY_SEGMENTS)
            .collect::<Vec<_>>()
            .join(" ");
        let mut clipped: String = lead.chars().take(SUMMARY_CHAR_LIMIT).collect();
        clipped.push_str("...");
        self.lines.push(clipped);
    }

    pub fn end_source(&mut self) {
        self.lines.push("\n---\n".into());
    }

    pub fn finish(mut self, explored: usize, topic: &str) -> String {
        self.lines.push("## Research Summary".into());
        self.lines.push(format!(
            "This research explored {explored} sources on the topic '{topic}'. To further \
             explore this topic, consider reading the full content of the most relevant \
             sources or refining your search terms."
        ));
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str, snippet: &str) -> SearchResult {
        SearchResult {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }

    #[test]
    fn overview_numbers_results_in_given_order() {
        let mut report = ReportBuilder::new("rust");
        report.overview(&[
            result("First", "https://a.example", "about a"),
            result("Second", "https://b.example", "about b"),
        ]);
        let out = report.finish(0, "rust");

        let first = out.find("1. **First**").unwrap();
        let second = out.find("2. **Second**").unwrap();
        assert!(first < second);
        assert!(out.contains("   URL: https://a.example"));
        assert!(out.contains("   Summary: about a\n"));
    }

    #[test]
    fn key_points_filters_short_headings_and_caps_at_ten() {
        let mut report = ReportBuilder::new("t");
        let headings: Vec<String> = (0..15)
            .map(|i| format!("Heading number {i}"))
            .chain(["ad".to_string(), String::new()])
            .collect();
        report.key_points(&headings);
        let out = report.finish(1, "t");

        assert_eq!(out.matches("\n- ").count(), 10);
        assert!(!out.contains("- ad"));
        assert!(out.contains("- Heading number 0"));
        assert!(out.contains("- Heading number 9"));
        assert!(!out.contains("- Heading number 10"));
    }

    #[test]
    fn key_points_without_headings_says_so() {
        let mut report = ReportBuilder::new("t");
        report.key_points(&["nav".to_string()]);
        let out = report.finish(1, "t");
        assert!(out.contains("- No clear headings found on this page."));
    }

    #[test]
    fn summary_takes_first_three_segments_and_caps_at_500() {
        let mut report = ReportBuilder::new("t");
        let text = format!("{}\nsecond\nthird\nfourth", "x".repeat(600));
        report.summary(&text);
        let out = report.finish(1, "t");

        let summary_line = out
            .lines()
            .find(|l| l.starts_with('x'))
            .expect("summary line");
        assert_eq!(summary_line.chars().count(), 503);
        assert!(summary_line.ends_with("..."));
        assert!(!out.contains("fourth"));
    }

    #[test]
    fn footer_names_explored_count_and_topic() {
        let report = ReportBuilder::new("rust ownership");
        let out = report.finish(2, "rust ownership");
        assert!(out.starts_with("# Deep Research: rust ownership\n"));
        assert!(out.contains(
            "This research explored 2 sources on the topic 'rust ownership'."
        ));
    }
}
