use std::rc::Rc;

use crate::{
    content::{AboutInfo, BlogPost, Goal, Project, RichText},
    output::{Listing, PaginationControls},
    route::Section,
};

/// Body region of the post detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum PostBody {
    Loading,
    Loaded(RichText),
    Failed,
}

/// Presentation hooks driven by the router. None of them report back.
pub trait Presenter {
    fn highlight_navigation(&mut self, section: Section);
    fn show_section(&mut self, section: Section);
    fn render_listing(&mut self, listing: &Listing);
    fn render_pagination(&mut self, controls: Option<&PaginationControls>);
    /// Title, date, author and tags of the post detail view.
    fn populate_post(&mut self, post: &Rc<BlogPost>);
    fn render_post_body(&mut self, body: &PostBody);
    fn render_about(&mut self, about: Option<&AboutInfo>, projects: &[Project], goals: &[Goal]);
    fn refresh_icons(&mut self);
    /// Leave the site entirely.
    fn redirect(&mut self, url: &str);
    fn print(&mut self);
}
