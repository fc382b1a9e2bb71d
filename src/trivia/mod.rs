//! Question retrieval, quiz draws and question mutations, independent of any transport.
pub mod error;
pub mod mapper;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod quiz;

pub use error::{Error, ErrorKind, Result};
pub use pagination::Pagination;
pub use query::QueryEngine;
pub use quiz::{QuizRequest, QuizSelector};
