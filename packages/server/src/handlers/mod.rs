pub mod source;
pub mod upload;
pub mod workspace;
