pub mod shared;
pub mod source;
pub mod upload;
pub mod workspace;
