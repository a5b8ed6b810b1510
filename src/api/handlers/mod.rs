pub mod media;
pub mod page;
