pub mod document;
pub mod error;
pub mod store;

pub use document::ConfigDocument;
pub use error::StoreError;
pub use store::{ConfigStore, load_document, persist_document};
