use crate::content::{RichText, RichTextFormat};
use yew::{html, Html};

/// Post bodies. Markdown and HTML are trusted, they come from the site itself.
pub fn rich_text_html(text: &RichText) -> Html {
    match text.format {
        RichTextFormat::PlainText => plain_text_html(&text.content),
        RichTextFormat::Markdown => Html::from_html_unchecked(markdown_html(&text.content).into()),
        RichTextFormat::Html => Html::from_html_unchecked(text.content.clone().into()),
    }
}

/// Blank lines separate paragraphs.
fn plain_text_html(content: &str) -> Html {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            html! {
                <p>
                    {for paragraph.lines().enumerate().map(|(i, line)| html!{<>
                        if i > 0 {
                            <br/>
                        }
                        {line.to_owned()}
                    </>})}
                </p>
            }
        })
        .collect()
}

pub fn markdown_html(content: &str) -> String {
    let mut options = markdown::Options::gfm();
    options.compile.allow_dangerous_html = true;
    markdown::to_html_with_options(content, &options).unwrap_or_else(|_| markdown::to_html(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_with_tables_and_html() {
        let html = markdown_html("| a |\n|---|\n| 1 |\n\n<kbd>P</kbd> **bold**");
        assert!(html.contains("<table>"));
        assert!(html.contains("<kbd>P</kbd>"));
        assert!(html.contains("<strong>bold</strong>"));
    }
}
