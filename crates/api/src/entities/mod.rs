pub mod bookmark;
pub mod pocket_link;

pub use bookmark::Bookmark;
pub use pocket_link::PocketLink;
