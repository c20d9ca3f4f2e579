pub mod algorithms;
pub mod decrypt;
pub mod encrypt;
pub mod operation;
