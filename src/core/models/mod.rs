pub mod algorithm;
pub mod file_descriptor;
pub mod outcome;
pub mod request;
