use chrono::NaiveDate;
use serde::Deserialize;

use crate::content::{RichText, RichTextFormat};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PostRecord")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub source: ContentSource,
}

/// Where the body of a post lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Hosted elsewhere; opening the post leaves the site.
    Link(String),
    /// Path of a body resource, relative to the site root.
    File(String),
    /// Legacy posts that embed their body in the index.
    Inline(String),
}

/// Index record as it appears in `posts.json`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRecord {
    id: String,
    title: String,
    date: NaiveDate,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, alias = "url")]
    link: Option<String>,
    #[serde(default, alias = "content_file")]
    content_file: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl TryFrom<PostRecord> for BlogPost {
    type Error = String;

    fn try_from(record: PostRecord) -> Result<Self, Self::Error> {
        let source = if let Some(link) = record.link {
            ContentSource::Link(link)
        } else if let Some(file) = record.content_file {
            ContentSource::File(file)
        } else if let Some(content) = record.content {
            ContentSource::Inline(content)
        } else {
            return Err(format!("post {:?} has no link, content file or content", record.id));
        };

        Ok(Self {
            id: record.id,
            title: record.title,
            date: record.date,
            excerpt: record.excerpt,
            author: record.author,
            tags: record.tags,
            source,
        })
    }
}

impl BlogPost {
    pub fn external_link(&self) -> Option<&str> {
        if let ContentSource::Link(link) = &self.source {
            Some(link)
        } else {
            None
        }
    }

    pub fn content_file(&self) -> Option<&str> {
        if let ContentSource::File(file) = &self.source {
            Some(file)
        } else {
            None
        }
    }

    /// Legacy inline bodies are markdown.
    pub fn inline_body(&self) -> Option<RichText> {
        if let ContentSource::Inline(content) = &self.source {
            Some(RichText {
                content: content.clone(),
                format: RichTextFormat::Markdown,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_index_records() {
        let posts: Vec<BlogPost> = serde_json::from_str(
            r#"[
                {"id": "p1", "title": "First", "date": "2024-01-15", "excerpt": "Hi",
                 "contentFile": "blog/posts/p1.md", "tags": ["rust"]},
                {"id": "p2", "title": "Elsewhere", "date": "2024-02-01", "excerpt": "",
                 "author": "Ada", "link": "https://example.com/p2"},
                {"id": "p3", "title": "Old", "date": "2019-06-30", "content": "*legacy*"}
            ]"#,
        )
        .unwrap();

        assert_eq!(posts[0].content_file(), Some("blog/posts/p1.md"));
        assert_eq!(posts[0].tags, vec!["rust".to_owned()]);
        assert_eq!(posts[1].external_link(), Some("https://example.com/p2"));
        assert_eq!(posts[1].author.as_deref(), Some("Ada"));
        assert_eq!(
            posts[2].inline_body(),
            Some(RichText {
                content: "*legacy*".to_owned(),
                format: RichTextFormat::Markdown,
            })
        );
        assert_eq!(posts[2].excerpt, "");
    }

    #[test]
    fn link_wins_over_content_file() {
        let post: BlogPost = serde_json::from_str(
            r#"{"id": "x", "title": "X", "date": "2024-01-01",
                "link": "https://example.com", "contentFile": "x.md"}"#,
        )
        .unwrap();
        assert_eq!(post.source, ContentSource::Link("https://example.com".to_owned()));
    }

    #[test]
    fn rejects_post_without_body() {
        let result = serde_json::from_str::<BlogPost>(
            r#"{"id": "x", "title": "X", "date": "2024-01-01"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unparseable_date() {
        let result = serde_json::from_str::<BlogPost>(
            r#"{"id": "x", "title": "X", "date": "yesterday", "content": ""}"#,
        );
        assert!(result.is_err());
    }
}
