use std::rc::Rc;

use crate::{
    config::SiteConfig,
    content::{AboutInfo, BlogPost, Goal, Project},
    output::{render_html, AppProps, Listing, PaginationControls, PostBody, Presenter},
    preferences::Theme,
    route::{Location, Section},
};

/// Keeps the latest state of every region so the page can be rendered as a
/// whole document.
#[derive(Debug, Clone, Default)]
pub struct HtmlPresenter {
    pub highlighted: Option<Section>,
    pub section: Option<Section>,
    pub listing: Option<Listing>,
    pub pagination: Option<PaginationControls>,
    /// Set while the post detail view is up.
    pub post: Option<Rc<BlogPost>>,
    pub body: Option<PostBody>,
    pub about: Option<AboutInfo>,
    pub projects: Vec<Project>,
    pub goals: Vec<Goal>,
    pub redirect: Option<String>,
    pub print_requested: bool,
    pub icon_refreshes: usize,
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of what is on screen.
    pub fn location(&self) -> Location {
        match &self.post {
            Some(post) => Location::Post(post.id.clone()),
            None => Location::Section(self.section.unwrap_or_default()),
        }
    }

    /// Listing page on screen, 1 when no page has been rendered.
    pub fn page(&self) -> usize {
        match &self.listing {
            Some(Listing::Page { page, .. }) => *page,
            _ => 1,
        }
    }

    pub fn render_document(&self, config: &SiteConfig, theme: Theme) -> String {
        render_html(AppProps {
            config,
            theme,
            state: self,
        })
    }
}

impl Presenter for HtmlPresenter {
    fn highlight_navigation(&mut self, section: Section) {
        self.highlighted = Some(section);
    }

    fn show_section(&mut self, section: Section) {
        self.section = Some(section);
        self.post = None;
        self.body = None;
        self.print_requested = false;
    }

    fn render_listing(&mut self, listing: &Listing) {
        self.listing = Some(listing.clone());
    }

    fn render_pagination(&mut self, controls: Option<&PaginationControls>) {
        self.pagination = controls.cloned();
    }

    fn populate_post(&mut self, post: &Rc<BlogPost>) {
        self.post = Some(Rc::clone(post));
        self.body = None;
    }

    fn render_post_body(&mut self, body: &PostBody) {
        self.body = Some(body.clone());
    }

    fn render_about(&mut self, about: Option<&AboutInfo>, projects: &[Project], goals: &[Goal]) {
        self.about = about.cloned();
        self.projects = projects.to_vec();
        self.goals = goals.to_vec();
    }

    fn refresh_icons(&mut self) {
        self.icon_refreshes += 1;
    }

    fn redirect(&mut self, url: &str) {
        self.redirect = Some(url.to_owned());
    }

    fn print(&mut self) {
        self.print_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content::MemoryLoader, event::Action, history::MemoryHistory, router::Router};
    use futures::executor::block_on;

    fn site() -> MemoryLoader {
        MemoryLoader::new()
            .with(
                "blog/posts.json",
                r#"[
                    {"id": "p1", "title": "Borrowing <Without> Tears", "date": "2024-03-07",
                     "excerpt": "Lifetimes, gently.", "tags": ["rust"], "author": "Ada",
                     "contentFile": "blog/posts/p1.md"},
                    {"id": "p2", "title": "Second", "date": "2024-04-01", "excerpt": "",
                     "contentFile": "blog/posts/missing.md"}
                ]"#,
            )
            .with("blog/posts/p1.md", "Some **bold** claims.")
            .with("data/about.json", r#"{"name": "Ada", "headline": "Engineer"}"#)
            .with("data/projects.json", r#"[{"title": "Analytical Engine"}]"#)
            .with("data/goals.json", r#"[{"title": "Publish notes", "completed": true}]"#)
    }

    fn render(fragment: &str) -> (HtmlPresenter, String) {
        let config = SiteConfig::default();
        let mut router = Router::new(
            &config,
            site(),
            MemoryHistory::new(fragment),
            HtmlPresenter::new(),
        );
        block_on(router.start());
        let presenter = router.into_presenter();
        let document = presenter.render_document(&config, Theme::Light);
        (presenter, document)
    }

    #[test]
    fn renders_listing_with_bindings() {
        let (presenter, document) = render("#blog");
        assert_eq!(presenter.section, Some(Section::Blog));
        assert!(document.contains("&lt;Without&gt;"));
        assert!(document.contains("data-action=\"post:p1\""));
        assert!(document.contains("datetime=\"2024-03-07\""));
        assert!(!document.contains("onclick"));
    }

    #[test]
    fn renders_post_detail() {
        let (presenter, document) = render("#blog/p1");
        assert_eq!(presenter.post.as_ref().map(|p| p.id.as_str()), Some("p1"));
        assert!(document.contains("bold</strong>"));
        assert!(document.contains("rust"));
    }

    #[test]
    fn renders_body_failure_in_place() {
        let (presenter, document) = render("#blog/p2");
        assert_eq!(presenter.body, Some(PostBody::Failed));
        assert!(document.contains("Unable to Load Post"));
        assert!(document.contains("Second"));
    }

    #[test]
    fn renders_about_content() {
        let (presenter, document) = render("");
        assert_eq!(presenter.highlighted, Some(Section::About));
        assert!(document.contains("Analytical Engine"));
        assert!(document.contains("Publish notes"));
        assert!(document.contains("navigator.serviceWorker.register"));
    }

    #[test]
    fn leaving_post_clears_detail() {
        let mut presenter = HtmlPresenter::new();
        presenter.populate_post(&Rc::new(
            serde_json::from_str(
                r#"{"id": "x", "title": "X", "date": "2024-01-01", "content": ""}"#,
            )
            .unwrap(),
        ));
        presenter.show_section(Section::Blog);
        assert!(presenter.post.is_none());
    }

    #[test]
    fn dark_theme_class() {
        let document = HtmlPresenter::new().render_document(&SiteConfig::default(), Theme::Dark);
        assert!(document.contains("dark-theme"));
    }

    #[test]
    fn print_request_reaches_document() {
        let config = SiteConfig::default();
        let mut router = Router::new(
            &config,
            site(),
            MemoryHistory::new("#resume"),
            HtmlPresenter::new(),
        );
        block_on(router.start());
        let before = router.presenter().render_document(&config, Theme::Light);

        block_on(router.dispatch(Action::Print));
        let after = router.presenter().render_document(&config, Theme::Light);

        assert!(router.presenter().print_requested);
        assert_ne!(before, after);
        assert!(!before.contains("() => window.print()"));
        assert!(after.contains("() => window.print()"));
    }

    #[test]
    fn pending_print_is_dropped_when_leaving_resume() {
        let config = SiteConfig::default();
        let mut router = Router::new(
            &config,
            site(),
            MemoryHistory::new("#resume"),
            HtmlPresenter::new(),
        );
        block_on(async {
            router.start().await;
            router.dispatch(Action::Print).await;
            router.dispatch(Action::Navigate(Section::Blog)).await;
        });
        assert!(!router.presenter().print_requested);
    }

    #[test]
    fn documents_bind_their_location() {
        let (presenter, document) = render("#blog/p1");
        assert_eq!(presenter.location(), Location::Post("p1".to_owned()));
        assert!(document.contains(r#"const current = "blog/p1";"#));
        assert!(document.contains("const currentPage = 1;"));
        assert!(document.contains("addEventListener('hashchange'"));
    }

    #[test]
    fn plain_text_bodies_keep_paragraphs() {
        let config = SiteConfig::default();
        let loader = site()
            .with(
                "blog/posts.json",
                r#"[{"id": "t", "title": "Text", "date": "2024-01-01",
                     "contentFile": "blog/posts/t.txt"}]"#,
            )
            .with("blog/posts/t.txt", "Line one\nLine two\n\nSecond <para>");
        let mut router = Router::new(
            &config,
            loader,
            MemoryHistory::new("#blog/t"),
            HtmlPresenter::new(),
        );
        block_on(router.start());
        let document = router.presenter().render_document(&config, Theme::Light);
        assert!(document.contains("Line one"));
        assert!(document.contains("<br"));
        assert!(document.contains("Second &lt;para&gt;"));
    }
}
