//! Sub-term fractions.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::MaintainerError;

/// Either the whole of a term or some part of it, in the abstract.
///
/// The term is divided into `len()` equal parts and each flag says
/// whether that part is included. `[true]` is the whole term,
/// `[true, false]` the first half, `[false, false, true]` the last third.
/// At least one part must be included.
///
/// Subterms order by number of parts first, then by the flags.
///
/// # Examples
///
/// ```
/// use hyperschedule::model::Subterm;
///
/// let first_half = Subterm::new(&[true, false]).unwrap();
/// assert_eq!(first_half, Subterm::FIRST_HALF_TERM);
/// assert_ne!(first_half, Subterm::SECOND_HALF_TERM);
///
/// assert!(Subterm::new(&[]).is_err());
/// assert!(Subterm::new(&[false, false]).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<bool>", into = "Vec<bool>")]
pub struct Subterm(Cow<'static, [bool]>);

impl Subterm {
    /// The course runs for the entire term.
    pub const FULL_TERM: Subterm = Subterm(Cow::Borrowed(&[true]));
    /// The course runs for only the first half of the term.
    pub const FIRST_HALF_TERM: Subterm = Subterm(Cow::Borrowed(&[true, false]));
    /// The course runs for only the second half of the term.
    pub const SECOND_HALF_TERM: Subterm = Subterm(Cow::Borrowed(&[false, true]));
    /// The course runs for only the first third of the term.
    pub const FIRST_THIRD_TERM: Subterm = Subterm(Cow::Borrowed(&[true, false, false]));
    /// The course runs for only the middle third of the term.
    pub const MIDDLE_THIRD_TERM: Subterm = Subterm(Cow::Borrowed(&[false, true, false]));
    /// The course runs for only the last third of the term.
    pub const LAST_THIRD_TERM: Subterm = Subterm(Cow::Borrowed(&[false, false, true]));
    /// The course runs for the first two thirds of the term.
    pub const FIRST_AND_MIDDLE_THIRD_TERMS: Subterm =
        Subterm(Cow::Borrowed(&[true, true, false]));
    /// The course runs for the last two thirds of the term.
    pub const MIDDLE_AND_LAST_THIRD_TERMS: Subterm =
        Subterm(Cow::Borrowed(&[false, true, true]));

    const NAMED: [(Subterm, &'static str); 8] = [
        (Subterm::FULL_TERM, "full term"),
        (Subterm::FIRST_HALF_TERM, "first half term"),
        (Subterm::SECOND_HALF_TERM, "second half term"),
        (Subterm::FIRST_THIRD_TERM, "first third term"),
        (Subterm::MIDDLE_THIRD_TERM, "middle third term"),
        (Subterm::LAST_THIRD_TERM, "last third term"),
        (Subterm::FIRST_AND_MIDDLE_THIRD_TERMS, "first and middle third terms"),
        (Subterm::MIDDLE_AND_LAST_THIRD_TERMS, "middle and last third terms"),
    ];

    /// Create a subterm from one flag per part of the term.
    pub fn new(parts: &[bool]) -> Result<Self, MaintainerError> {
        Self::from_flags(parts.iter().copied())
    }

    /// Create a subterm from any sequence of flags.
    pub fn from_flags(parts: impl IntoIterator<Item = bool>) -> Result<Self, MaintainerError> {
        let parts: Vec<bool> = parts.into_iter().collect();
        if parts.is_empty() {
            return Err(MaintainerError::Empty("subterm"));
        }
        if !parts.iter().any(|&p| p) {
            return Err(MaintainerError::invalid(
                "subterm",
                format!("{parts:?}"),
                "must include at least one part of the term",
            ));
        }
        Ok(Subterm(Cow::Owned(parts)))
    }

    /// Create a subterm of `count` parts including the zero-based `indices`.
    ///
    /// This is the shape some registrars publish (a part count plus a
    /// list of included parts).
    pub fn from_indices(count: usize, indices: &[usize]) -> Result<Self, MaintainerError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= count) {
            return Err(MaintainerError::invalid(
                "subterm",
                bad,
                "part index out of range",
            ));
        }
        Self::from_flags((0..count).map(|i| indices.contains(&i)))
    }

    /// Returns the flag for each part of the term.
    pub fn parts(&self) -> &[bool] {
        &self.0
    }

    /// Returns the zero-based indices of the included parts.
    pub fn included(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| p.then_some(i))
            .collect()
    }

    /// Number of equal parts the term is divided into.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full_term(&self) -> bool {
        *self == Subterm::FULL_TERM
    }

    fn name(&self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(subterm, _)| subterm == self)
            .map(|(_, name)| *name)
    }
}

impl Default for Subterm {
    fn default() -> Self {
        Subterm::FULL_TERM
    }
}

impl Ord for Subterm {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.parts().cmp(other.parts()))
    }
}

impl PartialOrd for Subterm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<Vec<bool>> for Subterm {
    type Error = MaintainerError;

    fn try_from(value: Vec<bool>) -> Result<Self, Self::Error> {
        Subterm::from_flags(value)
    }
}

impl From<Subterm> for Vec<bool> {
    fn from(value: Subterm) -> Self {
        value.0.into_owned()
    }
}

impl fmt::Debug for Subterm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subterm({:?})", self.parts())
    }
}

impl fmt::Display for Subterm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        let included: Vec<String> = self.included().iter().map(|i| (i + 1).to_string()).collect();
        let noun = if included.len() == 1 { "part" } else { "parts" };
        write!(f, "{noun} {} of {}", included.join(", "), self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_no_parts() {
        assert_eq!(Subterm::new(&[]), Err(MaintainerError::Empty("subterm")));
    }

    #[test]
    fn reject_nothing_included() {
        assert!(Subterm::new(&[false]).is_err());
        assert!(Subterm::new(&[false, false]).is_err());
    }

    #[test]
    fn halves_differ() {
        let first = Subterm::new(&[true, false]).unwrap();
        let second = Subterm::new(&[false, true]).unwrap();
        assert_ne!(first, second);
        assert_eq!(first, Subterm::FIRST_HALF_TERM);
        assert_eq!(second, Subterm::SECOND_HALF_TERM);
    }

    #[test]
    fn constants_are_valid() {
        for (subterm, _) in Subterm::NAMED {
            assert_eq!(Subterm::new(subterm.parts()).unwrap(), subterm);
        }
    }

    #[test]
    fn from_indices() {
        assert_eq!(Subterm::from_indices(1, &[0]).unwrap(), Subterm::FULL_TERM);
        assert_eq!(
            Subterm::from_indices(3, &[1, 2]).unwrap(),
            Subterm::MIDDLE_AND_LAST_THIRD_TERMS
        );
        assert!(Subterm::from_indices(2, &[2]).is_err());
        assert!(Subterm::from_indices(2, &[]).is_err());
        assert!(Subterm::from_indices(0, &[]).is_err());
    }

    #[test]
    fn included() {
        assert_eq!(Subterm::FIRST_AND_MIDDLE_THIRD_TERMS.included(), vec![0, 1]);
        assert_eq!(Subterm::LAST_THIRD_TERM.included(), vec![2]);
    }

    #[test]
    fn default_is_full_term() {
        assert!(Subterm::default().is_full_term());
        assert!(!Subterm::FIRST_HALF_TERM.is_full_term());
    }

    #[test]
    fn ordering_is_length_first() {
        // A longer tuple sorts after a shorter one even if its flags are smaller.
        assert!(Subterm::FIRST_HALF_TERM < Subterm::LAST_THIRD_TERM);
        assert!(Subterm::FULL_TERM < Subterm::SECOND_HALF_TERM);
        // Same length compares flags, false before true.
        assert!(Subterm::SECOND_HALF_TERM < Subterm::FIRST_HALF_TERM);
    }

    #[test]
    fn display() {
        assert_eq!(Subterm::FULL_TERM.to_string(), "full term");
        assert_eq!(Subterm::SECOND_HALF_TERM.to_string(), "second half term");
        assert_eq!(
            Subterm::new(&[true, false, true, false]).unwrap().to_string(),
            "parts 1, 3 of 4"
        );
        assert_eq!(
            Subterm::new(&[false, false, false, true]).unwrap().to_string(),
            "part 4 of 4"
        );
    }

    #[test]
    fn serde_is_bool_array() {
        let json = serde_json::to_string(&Subterm::FIRST_THIRD_TERM).unwrap();
        assert_eq!(json, "[true,false,false]");
        let back: Subterm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Subterm::FIRST_THIRD_TERM);
        assert!(serde_json::from_str::<Subterm>("[]").is_err());
        assert!(serde_json::from_str::<Subterm>("[false]").is_err());
    }
}
