//! Repository-style access to the persisted entities. Each function performs
//! its queries on the connection or transaction it was built with and returns
//! plain records.

pub mod source;
pub mod workspace;
