#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormErrorKind {
    /// An id the operation relies on is not in the document.
    MissingNode,
    /// The host document rejected a mutation.
    Host,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormError {
    pub kind: FormErrorKind,
    pub message: String,
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FormError {}

impl FormError {
    pub fn missing_node(id: &str) -> Self {
        Self {
            kind: FormErrorKind::MissingNode,
            message: format!("no element with id \"{id}\""),
        }
    }

    pub fn host(e: impl std::fmt::Display) -> Self {
        Self {
            kind: FormErrorKind::Host,
            message: e.to_string(),
        }
    }
}

pub type FormResult<T> = Result<T, FormError>;
