#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub content: String,
    pub format: RichTextFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RichTextFormat {
    PlainText,
    Markdown,
    Html,
}

impl RichTextFormat {
    /// Guesses from the extension of a content file.
    pub fn from_path(path: &str) -> Self {
        let extension = path
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase());
        match extension.as_deref() {
            Some("md" | "markdown") => Self::Markdown,
            Some("html" | "htm") => Self::Html,
            _ => Self::PlainText,
        }
    }
}

impl RichText {
    pub fn from_file(path: &str, content: String) -> Self {
        Self {
            content,
            format: RichTextFormat::from_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(RichTextFormat::from_path("blog/posts/a.md"), RichTextFormat::Markdown);
        assert_eq!(RichTextFormat::from_path("blog/posts/a.HTML"), RichTextFormat::Html);
        assert_eq!(RichTextFormat::from_path("blog/posts/a.txt"), RichTextFormat::PlainText);
        assert_eq!(RichTextFormat::from_path("blog/posts/a"), RichTextFormat::PlainText);
    }
}
