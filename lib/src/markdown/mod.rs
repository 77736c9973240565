//! Markdown bodies: splitting off front matter and rendering to HTML.

pub mod frontmatter;
mod plugin;
mod auto_heading;
mod autolink;
mod smart_fractions;
mod render;

pub use frontmatter::{BadFrontMatter, Document};
pub use plugin::Plugin;
pub use auto_heading::AutoHeading;
pub use autolink::AutoLink;
pub use smart_fractions::SmartFractions;
pub use render::Markdown;
