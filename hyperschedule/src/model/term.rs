//! Academic term type.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Key, MaintainerError};

/// An academic term, such as "Fall 2024".
///
/// All fields are required and fixed at construction.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::{Key, Term};
///
/// let term = Term::new("2024FA", "Fall 2024", Key::from_iter([2024i64, 1])).unwrap();
/// assert_eq!(term.code(), "2024FA");
///
/// assert!(Term::new("", "Fall 2024", Key::default()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "TermWire", into = "TermWire")]
pub struct Term {
    sort_key: Key,
    code: String,
    name: String,
}

impl Term {
    /// Create a term. Code and name must not be blank.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        sort_key: Key,
    ) -> Result<Self, MaintainerError> {
        let code = code.into();
        let name = name.into();
        if code.trim().is_empty() {
            return Err(MaintainerError::Empty("term code"));
        }
        if name.trim().is_empty() {
            return Err(MaintainerError::Empty("term name"));
        }
        Ok(Term {
            sort_key,
            code,
            name,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort_key(&self) -> &Key {
        &self.sort_key
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Serialize, Deserialize)]
struct TermWire {
    #[serde(rename = "termCode")]
    code: String,
    #[serde(rename = "termName")]
    name: String,
    #[serde(rename = "termSortKey")]
    sort_key: Key,
}

impl TryFrom<TermWire> for Term {
    type Error = MaintainerError;

    fn try_from(wire: TermWire) -> Result<Self, Self::Error> {
        Term::new(wire.code, wire.name, wire.sort_key)
    }
}

impl From<Term> for TermWire {
    fn from(term: Term) -> Self {
        TermWire {
            code: term.code,
            name: term.name,
            sort_key: term.sort_key,
        }
    }
}
