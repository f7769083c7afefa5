pub mod blob_storage_ref;
pub mod file;
pub mod organization;
pub mod source;
pub mod workspace;
