use std::{fmt, rc::Rc, str::FromStr};

use crate::content::BlogPost;

/// Top level views, one per navigation link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    About,
    Blog,
    Resume,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::About, Self::Blog, Self::Resume];

    pub fn name(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Blog => "blog",
            Self::Resume => "resume",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Blog => "Blog",
            Self::Resume => "Resume",
        }
    }

    /// Id of the element holding the section.
    pub fn element_id(self) -> String {
        format!("{}-section", self.name())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section {0:?}")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.name() == s)
            .ok_or_else(|| UnknownSection(s.to_owned()))
    }
}

/// Parsed URL fragment; the only persisted navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Section(Section),
    Post(String),
}

impl Location {
    /// Accepts the fragment with or without its leading `#`. Anything outside
    /// the grammar resolves to the about section.
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if let Some(id) = fragment.strip_prefix("blog/") {
            if !id.is_empty() {
                return Self::Post(id.to_owned());
            }
        }
        Self::Section(fragment.parse().unwrap_or_default())
    }

    pub fn section(&self) -> Section {
        match self {
            Self::Section(section) => *section,
            Self::Post(_) => Section::Blog,
        }
    }

    /// Serialized form, including the `#`.
    pub fn fragment(&self) -> String {
        format!("#{self}")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section(section) => write!(f, "{section}"),
            Self::Post(id) => write!(f, "blog/{id}"),
        }
    }
}

impl From<Section> for Location {
    fn from(section: Section) -> Self {
        Self::Section(section)
    }
}

/// What is on screen. A post can only be shown inside the blog section.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum View {
    #[default]
    About,
    Resume,
    Blog(BlogView),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlogView {
    Listing,
    Post(Rc<BlogPost>),
}

impl View {
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::About => Self::About,
            Section::Resume => Self::Resume,
            Section::Blog => Self::Blog(BlogView::Listing),
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Self::About => Section::About,
            Self::Resume => Section::Resume,
            Self::Blog(_) => Section::Blog,
        }
    }

    pub fn post(&self) -> Option<&Rc<BlogPost>> {
        if let Self::Blog(BlogView::Post(post)) = self {
            Some(post)
        } else {
            None
        }
    }

    pub fn is_post_detail(&self) -> bool {
        self.post().is_some()
    }

    /// Transition for navigating to `target`. `None` means nothing changes.
    /// Navigating to the blog from a post returns to its listing.
    pub fn navigate(&self, target: Section) -> Option<Self> {
        match (self, target) {
            (Self::Blog(BlogView::Post(_)), Section::Blog) => Some(Self::Blog(BlogView::Listing)),
            (current, target) if current.section() == target => None,
            (_, target) => Some(Self::for_section(target)),
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Self::Blog(BlogView::Post(post)) => Location::Post(post.id.clone()),
            other => Location::Section(other.section()),
        }
    }
}
