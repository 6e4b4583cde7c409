mod app;
mod html;
mod listing;
mod presenter;
mod pwa;
mod rich_text;
mod script;
mod serve;
mod site;

pub use app::*;
pub use html::*;
pub use listing::*;
pub use presenter::*;
pub use pwa::*;
pub use rich_text::*;
pub use script::*;
pub use serve::*;
pub use site::*;
