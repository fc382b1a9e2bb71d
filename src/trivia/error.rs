/// Client-visible failure classes. Each one has a fixed code and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Gone,
    Unprocessable,
    Internal,
}

impl ErrorKind {
    pub fn code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::Gone => 410,
            ErrorKind::Unprocessable => 422,
            ErrorKind::Internal => 500,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::MethodNotAllowed => "method not allowed",
            ErrorKind::Gone => "resource gone",
            ErrorKind::Unprocessable => "unprocessable request",
            ErrorKind::Internal => "internal server error",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing or empty field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error("search term is empty")]
    EmptySearchTerm,
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("category {0} does not exist")]
    UnknownCategory(i64),
    #[error("page {0} is out of range")]
    PageOutOfRange(i64),
    #[error("question {0} does not exist")]
    QuestionGone(i64),
    #[error("failed to store question")]
    Unprocessable(#[source] sqlx::Error),
    #[error("store failure")]
    Store(#[from] sqlx::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField(_)
            | Error::InvalidField { .. }
            | Error::EmptySearchTerm
            | Error::Malformed(_) => ErrorKind::BadRequest,
            Error::UnknownCategory(_) | Error::PageOutOfRange(_) => ErrorKind::NotFound,
            Error::QuestionGone(_) => ErrorKind::Gone,
            Error::Unprocessable(_) => ErrorKind::Unprocessable,
            Error::Store(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
