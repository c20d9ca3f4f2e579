pub mod codec;
pub mod directory_listing;
pub mod file_system;
