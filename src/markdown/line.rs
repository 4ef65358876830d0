use std::fmt;

/// One block of Markdown output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// ATX heading, `level` in `1..=6`.
    Heading { level: u8, text: String },
    Paragraph(String),
}

impl Line {
    /// The text without any heading marker. This is what deduplication keys on.
    pub fn text(&self) -> &str {
        match self {
            Line::Heading { text, .. } | Line::Paragraph(text) => text,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Heading { level, text } => {
                write!(f, "{} {}", "#".repeat(usize::from(*level)), text)
            }
            Line::Paragraph(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_markers() {
        let h1 = Line::Heading {
            level: 1,
            text: "Chapter One".into(),
        };
        let h6 = Line::Heading {
            level: 6,
            text: "Deep".into(),
        };
        assert_eq!(h1.to_string(), "# Chapter One");
        assert_eq!(h6.to_string(), "###### Deep");
        assert_eq!(h6.text(), "Deep");
    }

    #[test]
    fn test_paragraph_is_verbatim() {
        let p = Line::Paragraph("Hello **world** # not a heading".into());
        assert_eq!(p.to_string(), "Hello **world** # not a heading");
    }
}
