use std::fmt;

use thiserror::Error;

/// Ordering rule broken by a rejected [`Registry::add`](crate::Registry::add).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingViolation {
    /// A required positional declared after an optional one.
    RequiredAfterOptional { name: String },
    /// An option declared after a positional.
    OptionAfterPositional { name: String },
    /// Any argument declared after a repeated positional.
    AfterRepeated { name: String, repeated: String },
}

impl fmt::Display for OrderingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredAfterOptional { name } => write!(
                f,
                "required positional '{name}' cannot follow an optional positional"
            ),
            Self::OptionAfterPositional { name } => {
                write!(f, "option '{name}' must be declared before all positionals")
            }
            Self::AfterRepeated { name, repeated } => {
                write!(f, "'{name}' cannot follow repeated positional '{repeated}'")
            }
        }
    }
}

/// Grammar declaration mistake. Always a programming error, never an input error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("duplicate argument: '{name}' is already declared")]
    DuplicateArgument { name: String },

    #[error("invalid argument ordering: {0}")]
    InvalidOrdering(OrderingViolation),
}

/// One problem found while parsing a token list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("missing required option: {0}")]
    MissingOption(String),

    #[error("missing required argument: <{0}>")]
    MissingPositional(String),
}

/// Every problem found by one parse, in discovery order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors(Vec<ParseError>);

impl ParseErrors {
    pub(crate) fn new(errors: Vec<ParseError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ParseError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.0
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
