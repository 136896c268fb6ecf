pub mod bookmark;
pub mod pocket_link;

pub use bookmark::Bookmark;
pub use bookmark::NewBookmark;
pub use pocket_link::NewPocketLink;
pub use pocket_link::PocketLink;
