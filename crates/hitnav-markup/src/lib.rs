//! hitnav-markup
//!
//! Keyword-hit navigation and highlight markup over a chunked search
//! backend: which pages of a document hold hits, stepping between pages
//! and between hits within a page, and rendering a page's text with
//! matches highlighted and wrapped in numbered, addressable anchors.

pub mod anchors;
pub mod escape;
pub mod navigator;

pub use anchors::{insert_anchors, ANCHOR_PREFIX, HIGHLIGHT_POST, HIGHLIGHT_PRE};
pub use escape::escape_query;
pub use navigator::{MatchNavigator, NO_MATCHES};
