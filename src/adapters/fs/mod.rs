pub mod directory_scanner;
pub mod local_fs;
