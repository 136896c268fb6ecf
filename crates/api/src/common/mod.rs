pub mod bookmarks;
pub mod pocket_links;
