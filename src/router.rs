use std::{rc::Rc, time::Instant};

use tracing::{debug, info, warn};

use crate::{
    config::SiteConfig,
    content::{
        load_json, AboutInfo, BlogPost, Collection, CollectionKind, ContentStore, Goal,
        LoadError, Loader, Project, RichText,
    },
    event::Action,
    history::History,
    output::{Listing, PaginationControls, PostBody, Presenter},
    route::{BlogView, Location, Section, View},
};

/// Resource paths of the content collections, relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSources {
    pub posts: String,
    pub projects: String,
    pub about: String,
    pub goals: String,
}

impl From<&SiteConfig> for ContentSources {
    fn from(config: &SiteConfig) -> Self {
        Self {
            posts: config.posts_index.clone(),
            projects: config.projects.clone(),
            about: config.about.clone(),
            goals: config.goals.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("failed to load {collection}: {source}")]
    ContentLoad {
        collection: CollectionKind,
        #[source]
        source: LoadError,
    },
    #[error("blog post {0:?} not found")]
    PostNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Opened,
    /// The post is hosted elsewhere and the page navigated away.
    Redirected(String),
}

/// Owns what is shown and keeps it in step with the address bar.
///
/// Programmatic navigation writes history. Reactions to history that already
/// changed (back/forward, cold load) never do.
pub struct Router<L, H, P> {
    loader: L,
    history: H,
    presenter: P,
    store: ContentStore,
    sources: ContentSources,
    view: View,
    /// 1-based. Survives leaving and re-entering the blog.
    current_page: usize,
    page_size: usize,
}

impl<L: Loader, H: History, P: Presenter> Router<L, H, P> {
    pub fn new(config: &SiteConfig, loader: L, history: H, presenter: P) -> Self {
        Self {
            loader,
            history,
            presenter,
            store: ContentStore::new(),
            sources: ContentSources::from(config),
            view: View::default(),
            current_page: 1,
            page_size: config.page_size(),
        }
    }

    pub fn current_route(&self) -> Section {
        self.view.section()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn current_blog_post(&self) -> Option<&Rc<BlogPost>> {
        self.view.post()
    }

    pub fn viewing_post_detail(&self) -> bool {
        self.view.is_post_detail()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Cold load: shows the section named by the address bar, loads every
    /// collection, then opens a deep-linked post once the posts are in.
    pub async fn start(&mut self) {
        let location = Location::parse(&self.history.fragment());
        debug!(%location, "resolving initial route");

        self.enter(View::for_section(location.section()));
        self.load_content().await;

        if let Location::Post(id) = location {
            let _ = self.open(&id, false).await;
        }
    }

    /// Fetches all four collections together. A failure only affects its own
    /// collection.
    pub async fn load_content(&mut self) {
        let start = Instant::now();
        self.store.projects = Collection::Loading;
        self.store.goals = Collection::Loading;
        self.store.about = Collection::Loading;
        self.store.posts = Collection::Loading;

        let (projects, goals, about, posts) = futures::join!(
            load_json::<Vec<Project>>(&self.loader, &self.sources.projects),
            load_json::<Vec<Goal>>(&self.loader, &self.sources.goals),
            load_json::<AboutInfo>(&self.loader, &self.sources.about),
            load_json::<Vec<BlogPost>>(&self.loader, &self.sources.posts),
        );

        self.store.projects = settle(CollectionKind::Projects, projects);
        self.store.goals = settle(CollectionKind::Goals, goals);
        self.store.about = settle(CollectionKind::About, about);
        self.presenter.render_about(
            self.store.about.loaded(),
            self.store.projects(),
            self.store.goals(),
        );
        let _ = self.settle_posts(posts);
        self.presenter.refresh_icons();

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            posts = self.store.posts().len(),
            projects = self.store.projects().len(),
            goals = self.store.goals().len(),
            "content loaded"
        );
    }

    pub async fn navigate_to(&mut self, section: Section, record_history: bool) {
        let Some(view) = self.view.navigate(section) else {
            debug!(%section, "already showing section");
            return;
        };

        if record_history {
            self.history.push(&Location::Section(section));
        }
        self.enter(view);

        if section == Section::Blog {
            if self.store.posts().is_empty() {
                let _ = self.load_posts().await;
            } else {
                self.render_listing();
            }
        }
    }

    /// Back/forward navigation. The address bar is already correct.
    pub async fn handle_route_change(&mut self) {
        match Location::parse(&self.history.fragment()) {
            Location::Post(id) => {
                self.navigate_to(Section::Blog, false).await;
                let _ = self.open(&id, false).await;
            }
            Location::Section(section) => self.navigate_to(section, false).await,
        }
    }

    /// Loads the posts first if none are loaded, then looks `id` up once.
    /// Failure leaves the current view untouched.
    pub async fn open_post(&mut self, id: &str) -> Result<PostOutcome, RouteError> {
        self.open(id, true).await
    }

    /// No bounds check; callers only offer pages that exist.
    pub fn change_page(&mut self, page: usize) {
        debug!(page, "changing page");
        self.current_page = page;
        self.render_listing();
    }

    /// Returns whether the print was handled here. Only the resume prints.
    pub fn print(&mut self) -> bool {
        if self.current_route() == Section::Resume {
            self.presenter.print();
            true
        } else {
            false
        }
    }

    pub async fn dispatch(&mut self, action: Action) {
        debug!(%action, "dispatch");
        match action {
            Action::Navigate(section) => self.navigate_to(section, true).await,
            Action::OpenPost(id) => {
                let _ = self.open_post(&id).await;
            }
            Action::ChangePage(page) => self.change_page(page),
            Action::RouteChanged => self.handle_route_change().await,
            Action::Print => {
                self.print();
            }
        }
    }

    async fn open(&mut self, id: &str, record_history: bool) -> Result<PostOutcome, RouteError> {
        if self.store.posts().is_empty() {
            debug!(id, "no posts loaded yet");
            self.load_posts()
                .await
                .map_err(|source| RouteError::ContentLoad {
                    collection: CollectionKind::Posts,
                    source,
                })?;
        }

        let Some(post) = self.store.find_post(id).cloned() else {
            warn!(id, "blog post not found");
            return Err(RouteError::PostNotFound(id.to_owned()));
        };

        if let Some(link) = post.external_link() {
            info!(id, link, "post is hosted elsewhere");
            self.presenter.redirect(link);
            return Ok(PostOutcome::Redirected(link.to_owned()));
        }

        if record_history {
            self.history.push(&Location::Post(post.id.clone()));
        }
        self.enter(View::Blog(BlogView::Post(Rc::clone(&post))));
        self.presenter.populate_post(&post);
        self.presenter.refresh_icons();

        let body = match post.content_file() {
            Some(path) => {
                self.presenter.render_post_body(&PostBody::Loading);
                match self.loader.fetch(path).await {
                    Ok(content) => PostBody::Loaded(RichText::from_file(path, content)),
                    Err(e) => {
                        warn!(id, error = %e, "failed to load post content");
                        PostBody::Failed
                    }
                }
            }
            None => post
                .inline_body()
                .map(PostBody::Loaded)
                .unwrap_or(PostBody::Failed),
        };
        self.presenter.render_post_body(&body);

        Ok(PostOutcome::Opened)
    }

    fn enter(&mut self, view: View) {
        let section = view.section();
        debug!(from = %self.view.location(), to = %view.location(), "view transition");
        self.view = view;
        self.presenter.highlight_navigation(section);
        self.presenter.show_section(section);
    }

    async fn load_posts(&mut self) -> Result<(), LoadError> {
        self.store.posts = Collection::Loading;
        let posts = load_json::<Vec<BlogPost>>(&self.loader, &self.sources.posts).await;
        self.settle_posts(posts)
    }

    fn settle_posts(&mut self, posts: Result<Vec<BlogPost>, LoadError>) -> Result<(), LoadError> {
        match posts {
            Ok(posts) => {
                debug!(count = posts.len(), "blog posts loaded");
                self.store.set_posts(posts);
                self.render_listing();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load blog posts");
                self.store.posts = Collection::Failed;
                self.render_listing();
                Err(e)
            }
        }
    }

    fn render_listing(&mut self) {
        let (listing, controls) = if self.store.posts.is_failed() {
            (Listing::Unavailable, None)
        } else {
            let posts = self.store.posts();
            (
                Listing::new(posts, self.current_page, self.page_size),
                PaginationControls::new(posts.len(), self.current_page, self.page_size),
            )
        };
        self.presenter.render_listing(&listing);
        self.presenter.render_pagination(controls.as_ref());
    }
}

fn settle<T>(kind: CollectionKind, result: Result<T, LoadError>) -> Collection<T> {
    match result {
        Ok(value) => Collection::Loaded(value),
        Err(e) => {
            warn!(collection = %kind, error = %e, "failed to load content");
            Collection::Failed
        }
    }
}
