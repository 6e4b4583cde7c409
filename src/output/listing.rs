use std::rc::Rc;

use crate::content::BlogPost;

/// Contents of the blog listing region.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Page {
        posts: Vec<Rc<BlogPost>>,
        page: usize,
    },
    /// Loaded, but nothing published.
    Empty,
    /// The post index failed to load.
    Unavailable,
}

impl Listing {
    /// Posts `[(page - 1) * page_size, page * page_size)`, clipped. Pages are 1-based.
    pub fn new(posts: &[Rc<BlogPost>], page: usize, page_size: usize) -> Self {
        if posts.is_empty() {
            return Self::Empty;
        }
        let start = page
            .saturating_sub(1)
            .saturating_mul(page_size)
            .min(posts.len());
        let end = start.saturating_add(page_size).min(posts.len());
        Self::Page {
            posts: posts[start..end].to_vec(),
            page,
        }
    }

    pub fn posts(&self) -> &[Rc<BlogPost>] {
        if let Self::Page { posts, .. } = self {
            posts
        } else {
            &[]
        }
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    /// Target of the Previous control, if shown.
    pub previous: Option<usize>,
    pub pages: Vec<PageControl>,
    pub next: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub number: usize,
    pub current: bool,
}

impl PaginationControls {
    /// `None` when everything fits on one page.
    pub fn new(count: usize, current: usize, page_size: usize) -> Option<Self> {
        let total = total_pages(count, page_size);
        if total <= 1 {
            return None;
        }
        Some(Self {
            previous: (current > 1).then(|| current - 1),
            pages: (1..=total)
                .map(|number| PageControl {
                    number,
                    current: number == current,
                })
                .collect(),
            next: (current < total).then(|| current + 1),
        })
    }

    pub fn total(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentSource;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn posts(count: usize) -> Vec<Rc<BlogPost>> {
        (0..count)
            .map(|i| {
                Rc::new(BlogPost {
                    id: format!("p{i}"),
                    title: format!("Post {i}"),
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    excerpt: String::new(),
                    author: None,
                    tags: Vec::new(),
                    source: ContentSource::Inline(String::new()),
                })
            })
            .collect()
    }

    fn ids(listing: &Listing) -> Vec<&str> {
        listing.posts().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn slices_pages() {
        let posts = posts(12);
        assert_eq!(ids(&Listing::new(&posts, 1, 5)), ["p0", "p1", "p2", "p3", "p4"]);
        assert_eq!(ids(&Listing::new(&posts, 2, 5)), ["p5", "p6", "p7", "p8", "p9"]);
        assert_eq!(ids(&Listing::new(&posts, 3, 5)), ["p10", "p11"]);
    }

    #[test]
    fn out_of_range_pages_are_clipped() {
        let posts = posts(12);
        assert!(ids(&Listing::new(&posts, 4, 5)).is_empty());
        assert_eq!(ids(&Listing::new(&posts, 0, 5)), ids(&Listing::new(&posts, 1, 5)));
        assert!(ids(&Listing::new(&posts, usize::MAX, 5)).is_empty());
    }

    #[test]
    fn no_posts_is_empty_state() {
        assert_eq!(Listing::new(&[], 1, 5), Listing::Empty);
    }

    #[test]
    fn first_page_controls() {
        let controls = PaginationControls::new(12, 1, 5).unwrap();
        assert_eq!(controls.total(), 3);
        assert_eq!(controls.previous, None);
        assert_eq!(controls.next, Some(2));
        assert_eq!(
            controls.pages,
            vec![
                PageControl { number: 1, current: true },
                PageControl { number: 2, current: false },
                PageControl { number: 3, current: false },
            ]
        );
    }

    #[test]
    fn last_page_controls() {
        let controls = PaginationControls::new(12, 3, 5).unwrap();
        assert_eq!(controls.previous, Some(2));
        assert_eq!(controls.next, None);
        assert!(controls.pages[2].current);
    }

    #[test]
    fn single_page_has_no_controls() {
        assert_eq!(PaginationControls::new(5, 1, 5), None);
        assert_eq!(PaginationControls::new(0, 1, 5), None);
        assert!(PaginationControls::new(6, 1, 5).is_some());
    }
}
