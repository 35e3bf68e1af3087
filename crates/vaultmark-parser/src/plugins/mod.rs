//! Custom markdown-it plugins for the note dialect

pub mod footnote;
pub mod footnote_ref;
pub mod frontmatter;
pub mod hashtag;
pub mod tasklist;
pub mod wikilink;

pub use footnote::add_footnote_plugin;
pub use footnote_ref::add_footnote_ref_plugin;
pub use frontmatter::add_frontmatter_plugin;
pub use hashtag::add_hashtag_plugin;
pub use tasklist::add_tasklist_plugin;
pub use wikilink::add_wikilink_plugin;
