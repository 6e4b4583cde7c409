use std::{fmt, rc::Rc};

use crate::content::{AboutInfo, BlogPost, Goal, Project};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Projects,
    Goals,
    About,
    Posts,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Projects => "projects",
            Self::Goals => "goals",
            Self::About => "about",
            Self::Posts => "blog posts",
        })
    }
}

/// Load lifecycle of one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection<T> {
    Unloaded,
    Loading,
    Loaded(T),
    Failed,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::Unloaded
    }
}

impl<T> Collection<T> {
    pub fn loaded(&self) -> Option<&T> {
        if let Self::Loaded(value) = self {
            Some(value)
        } else {
            None
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed)
    }
}

/// Content fetched during this page session.
#[derive(Debug, Default)]
pub struct ContentStore {
    pub projects: Collection<Vec<Project>>,
    pub goals: Collection<Vec<Goal>>,
    pub about: Collection<AboutInfo>,
    pub posts: Collection<Vec<Rc<BlogPost>>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty unless loaded. Load order, not date order.
    pub fn posts(&self) -> &[Rc<BlogPost>] {
        self.posts.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn goals(&self) -> &[Goal] {
        self.goals.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn about(&self) -> Option<&AboutInfo> {
        self.about.loaded()
    }

    /// First match wins if identifiers repeat.
    pub fn find_post(&self, id: &str) -> Option<&Rc<BlogPost>> {
        self.posts().iter().find(|post| post.id == id)
    }

    pub fn set_posts(&mut self, posts: Vec<BlogPost>) {
        self.posts = Collection::Loaded(posts.into_iter().map(Rc::new).collect());
    }
}
