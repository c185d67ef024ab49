//! Notes system — one markdown file per note with YAML frontmatter
//!
//! Notes live flat in a single directory. Listings and tag queries scan the
//! frontmatter of every file; single-note reads also render the body to HTML.

pub mod file_ops;
pub mod frontmatter;
pub mod render;
pub mod search;
pub mod store;

pub use store::NoteStore;
