//! Portfolio site: a hash router over about, blog and resume sections, a
//! paginated blog listing and post detail views fed from static JSON.

pub mod config;
pub mod content;
pub mod event;
pub mod history;
pub mod output;
pub mod preferences;
pub mod route;
pub mod router;

pub use config::SiteConfig;
pub use event::Action;
pub use history::{History, MemoryHistory};
pub use route::{BlogView, Location, Section, View};
pub use router::{PostOutcome, RouteError, Router};
