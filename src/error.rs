use thiserror::Error;

/// Errors raised while resolving an equation set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Cyclic dependency: {path}", path = format_cycle(path))]
    CyclicDependency { path: Vec<String> },

    #[error("No resolution order exists, the graph contains a cycle: {path}", path = format_cycle(path))]
    MissingOrdering { path: Vec<String> },

    #[error("Undefined variable {name} referenced by {equation}")]
    UndefinedVariable { name: String, equation: String },
}

impl ResolveError {
    /// The cycle behind this error, if it was caused by one
    pub fn cycle(&self) -> Option<&[String]> {
        match self {
            ResolveError::CyclicDependency { path } | ResolveError::MissingOrdering { path } => {
                Some(path)
            }
            ResolveError::UndefinedVariable { .. } => None,
        }
    }
}

/// Errors raised while reading an equation set
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}: expected `NAME = expression`, got `{content}`")]
    Syntax { line: usize, content: String },

    #[error("Line {line}: invalid equation name `{name}` (uppercase letters only)")]
    InvalidName { line: usize, name: String },

    #[error("Invalid equation name `{0}` (uppercase letters only)")]
    InvalidKey(String),

    #[error("Equation {0} is defined more than once")]
    DuplicateKey(String),

    #[error("Line {line}: equation {name} is defined more than once")]
    DuplicateEquation { line: usize, name: String },

    #[error("Line {line}: equation {name} has an empty expression")]
    EmptyExpression { line: usize, name: String },
}

pub(crate) fn format_cycle(path: &[String]) -> String {
    path.join("->")
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ResolveError>;
