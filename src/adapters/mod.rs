pub mod codecs;
pub mod fs;
