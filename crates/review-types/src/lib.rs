pub mod error;
pub mod types;

pub use error::ParseError;
pub use types::{
    Check, CheckDefinition, CheckMapping, CheckStatus, Document, DocumentStatus, Feedback, Section,
};
