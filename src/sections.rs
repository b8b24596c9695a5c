use crate::models::PageSection;
use lazy_static::lazy_static;
use regex::Regex;

/// Title given to any text that appears before the first heading on a page.
pub const INTRODUCTION_TITLE: &str = "Introduction";

lazy_static! {
    // An uppercase letter followed by at least three of: uppercase, digit, space, hyphen.
    static ref HEADING_RE: Regex = Regex::new(r"^[A-Z][A-Z0-9 \-]{3,}$").unwrap();
}

/// True when the trimmed line looks like an all-caps heading.
pub fn is_heading(line: &str) -> bool {
    HEADING_RE.is_match(line.trim())
}

struct Draft<'a> {
    title: String,
    lines: Vec<&'a str>,
}

impl<'a> Draft<'a> {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }

    fn finish(self) -> Option<PageSection> {
        let text = self.lines.join("\n").trim().to_string();
        if text.is_empty() {
            return None;
        }
        Some(PageSection {
            section_title: self.title,
            text,
        })
    }
}

/// Splits one page of text into sections at heading lines.
///
/// Body lines are kept untrimmed until the section is closed; sections whose
/// body is blank after trimming are dropped, so a heading immediately followed
/// by another heading produces nothing.
pub fn split_into_sections(page_text: &str) -> Vec<PageSection> {
    let mut drafts = Vec::new();
    let mut current = Draft::new(INTRODUCTION_TITLE);

    for line in page_text.lines() {
        if is_heading(line) {
            let next = Draft::new(line.trim());
            drafts.push(std::mem::replace(&mut current, next));
        } else {
            current.lines.push(line);
        }
    }
    drafts.push(current);

    drafts.into_iter().filter_map(Draft::finish).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(sections: &[PageSection]) -> Vec<&str> {
        sections.iter().map(|s| s.section_title.as_str()).collect()
    }

    #[test]
    fn test_heading_pattern() {
        assert!(is_heading("OVERVIEW"));
        assert!(is_heading("ABCD"));
        assert!(is_heading("  PART 2 - COSTS  "));
        assert!(!is_heading("A   "));
        assert!(!is_heading("ABC"));
        assert!(!is_heading("Overview"));
        assert!(!is_heading("1 INTRODUCTION"));
        assert!(!is_heading("NOTES:"));
        assert!(!is_heading("WHAT'S NEW"));
        assert!(!is_heading(""));
    }

    #[test]
    fn test_headings_split_page() {
        let sections = split_into_sections("OVERVIEW\nfoo bar foo\nDETAILS\nbar baz");
        assert_eq!(
            sections,
            vec![
                PageSection {
                    section_title: "OVERVIEW".to_string(),
                    text: "foo bar foo".to_string(),
                },
                PageSection {
                    section_title: "DETAILS".to_string(),
                    text: "bar baz".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_page_without_headings_is_introduction() {
        let sections = split_into_sections("Some opening words.\n\n  indented line\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_title, INTRODUCTION_TITLE);
        assert_eq!(sections[0].text, "Some opening words.\n\n  indented line");
    }

    #[test]
    fn test_blank_page_has_no_sections() {
        assert!(split_into_sections("").is_empty());
        assert!(split_into_sections("   \n\t\n").is_empty());
    }

    #[test]
    fn test_introduction_comes_first() {
        let sections = split_into_sections("lead in\nMAIN PART\nbody");
        assert_eq!(titles(&sections), vec![INTRODUCTION_TITLE, "MAIN PART"]);
    }

    #[test]
    fn test_consecutive_headings_drop_empty_sections() {
        let sections = split_into_sections("FIRST\nSECOND\n\nTHIRD\ncontent\nLAST");
        assert_eq!(titles(&sections), vec!["THIRD"]);
        assert_eq!(sections[0].text, "content");
    }

    #[test]
    fn test_heading_title_is_trimmed() {
        let sections = split_into_sections("   BUDGET TIPS   \nsave money");
        assert_eq!(titles(&sections), vec!["BUDGET TIPS"]);
    }

    #[test]
    fn test_crlf_lines() {
        let sections = split_into_sections("HOTELS\r\ncheap rooms\r\nnear the beach\r\n");
        assert_eq!(titles(&sections), vec!["HOTELS"]);
        assert_eq!(sections[0].text, "cheap rooms\nnear the beach");
    }
}
