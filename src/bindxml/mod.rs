//! Core BIND statistics reader module

pub mod format;
pub mod reader;
pub mod source;
pub mod types;
mod utils;

pub use reader::{parse, BindXmlReader};
pub use source::{DefaultSource, DocumentSource, Source, DEFAULT_PORT};
pub use types::error::{BindXmlError, FetchError, Result, Section};
pub use types::models;
