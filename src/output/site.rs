use std::collections::{hash_map::Entry, HashMap};

use tracing::{debug, warn};

use crate::{
    config::SiteConfig,
    content::Loader,
    history::History,
    output::{total_pages, write_manifest, HtmlPresenter},
    preferences::Theme,
    route::{Location, Section},
    router::Router,
};

/// Request path of the document showing `location`, with the blog listing at
/// 1-based `page`.
pub fn document_path(location: &Location, page: usize) -> String {
    match location {
        Location::Section(Section::About) => "/index.html".to_owned(),
        Location::Section(Section::Blog) if page > 1 => format!("/blog/page/{page}/index.html"),
        Location::Section(section) => format!("/{section}/index.html"),
        Location::Post(id) => format!("/blog/{id}/index.html"),
    }
}

/// Walks a started router through every location a visitor can reach and
/// keeps the presenter state at each one, keyed by document path.
///
/// Posts hosted elsewhere get a document that redirects.
pub async fn snapshot_site<L: Loader, H: History>(
    router: &mut Router<L, H, HtmlPresenter>,
    config: &SiteConfig,
) -> Vec<(String, HtmlPresenter)> {
    let mut snapshots = Vec::new();

    for section in Section::ALL {
        router.navigate_to(section, false).await;
        if section != Section::Blog {
            snapshots.push(snapshot(router));
            continue;
        }

        let pages = total_pages(router.store().posts().len(), config.page_size()).max(1);
        for page in 1..=pages {
            router.change_page(page);
            snapshots.push(snapshot(router));
        }
        router.change_page(1);
    }

    let ids = router
        .store()
        .posts()
        .iter()
        .map(|post| post.id.clone())
        .collect::<Vec<_>>();
    for id in ids {
        router.navigate_to(Section::Blog, false).await;
        if let Err(e) = router.open_post(&id).await {
            warn!(id = %id, error = %e, "skipping post");
            continue;
        }
        let path = document_path(&Location::Post(id), 1);
        snapshots.push((path, router.presenter().clone()));
        router.presenter_mut().redirect = None;
    }

    debug!(documents = snapshots.len(), "site walked");
    snapshots
}

fn snapshot<L: Loader, H: History>(
    router: &Router<L, H, HtmlPresenter>,
) -> (String, HtmlPresenter) {
    let presenter = router.presenter();
    (
        document_path(&presenter.location(), presenter.page()),
        presenter.clone(),
    )
}

/// Renders every snapshot plus the manifest. The first snapshot of a path wins.
pub fn generate_site(
    config: &SiteConfig,
    theme: Theme,
    snapshots: &[(String, HtmlPresenter)],
) -> HashMap<String, Vec<u8>> {
    let mut generated = HashMap::new();
    for (path, presenter) in snapshots {
        match generated.entry(path.clone()) {
            Entry::Occupied(_) => warn!(path = %path, "duplicate document"),
            Entry::Vacant(entry) => {
                entry.insert(presenter.render_document(config, theme).into_bytes());
            }
        }
    }
    generated.insert("/manifest.json".to_owned(), write_manifest(config));
    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content::MemoryLoader, history::MemoryHistory};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn site() -> MemoryLoader {
        let mut posts = (1..=6)
            .map(|i| {
                json!({
                    "id": format!("p{i}"),
                    "title": format!("Post {i}"),
                    "date": "2024-01-01",
                    "contentFile": format!("blog/posts/p{i}.md"),
                })
            })
            .collect::<Vec<_>>();
        posts.push(json!({
            "id": "ext",
            "title": "Elsewhere",
            "date": "2024-02-01",
            "link": "https://example.com/ext",
        }));

        let mut loader = MemoryLoader::new()
            .with("blog/posts.json", serde_json::Value::Array(posts).to_string())
            .with("data/projects.json", "[]")
            .with("data/goals.json", "[]")
            .with("data/about.json", r#"{"name": "Ada"}"#);
        for i in 1..=6 {
            loader.insert(&format!("blog/posts/p{i}.md"), format!("Body of post {i}"));
        }
        loader
    }

    fn snapshots() -> Vec<(String, HtmlPresenter)> {
        let config = SiteConfig::default();
        let mut router = Router::new(
            &config,
            site(),
            MemoryHistory::default(),
            HtmlPresenter::new(),
        );
        block_on(async {
            router.start().await;
            snapshot_site(&mut router, &config).await
        })
    }

    #[test]
    fn document_paths() {
        assert_eq!(document_path(&Section::About.into(), 1), "/index.html");
        assert_eq!(document_path(&Section::Resume.into(), 1), "/resume/index.html");
        assert_eq!(document_path(&Section::Blog.into(), 1), "/blog/index.html");
        assert_eq!(document_path(&Section::Blog.into(), 2), "/blog/page/2/index.html");
        assert_eq!(
            document_path(&Location::Post("p1".to_owned()), 1),
            "/blog/p1/index.html"
        );
    }

    #[test]
    fn every_location_gets_a_document() {
        let paths = snapshots()
            .into_iter()
            .map(|(path, _)| path)
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            [
                "/index.html",
                "/blog/index.html",
                "/blog/page/2/index.html",
                "/resume/index.html",
                "/blog/p1/index.html",
                "/blog/p2/index.html",
                "/blog/p3/index.html",
                "/blog/p4/index.html",
                "/blog/p5/index.html",
                "/blog/p6/index.html",
                "/blog/ext/index.html",
            ]
        );
    }

    #[test]
    fn snapshots_show_their_location() {
        for (path, presenter) in snapshots() {
            if path == "/blog/ext/index.html" {
                assert_eq!(presenter.redirect.as_deref(), Some("https://example.com/ext"));
                continue;
            }
            assert_eq!(document_path(&presenter.location(), presenter.page()), path);
            assert_eq!(presenter.redirect, None, "{path}");
        }
    }

    #[test]
    fn generated_documents() {
        let config = SiteConfig::default();
        let generated = generate_site(&config, Theme::Light, &snapshots());

        assert_eq!(generated.len(), 12);
        assert!(generated.contains_key("/manifest.json"));

        let document = |path: &str| String::from_utf8(generated[path].clone()).unwrap();
        let second_page = document("/blog/page/2/index.html");
        assert!(second_page.contains("Post 6"));
        assert!(!second_page.contains("Post 1"));
        assert!(document("/blog/p3/index.html").contains("Body of post 3"));
        assert!(document("/blog/ext/index.html").contains("https://example.com/ext"));
        assert!(document("/resume/index.html").contains(r#"const current = "resume";"#));
    }
}
