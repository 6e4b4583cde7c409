mod about;
mod loader;
mod post;
mod rich_text;
mod store;

pub use about::*;
pub use loader::*;
pub use post::*;
pub use rich_text::*;
pub use store::*;
