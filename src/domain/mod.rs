pub mod character;
pub mod episode;
pub mod page;

pub use character::{Character, Location};
pub use episode::Episode;
pub use page::{Page, PageInfo};
