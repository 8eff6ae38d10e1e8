//! Communication with the chat backend.
//!
//! The backend holds the OAuth client secret and proxies every provider
//! call. Each endpoint takes a JSON body and answers with a JSON object
//! carrying a `success` flag.

mod backend;
pub mod protocol;

pub use backend::{Backend, HttpBackend};
