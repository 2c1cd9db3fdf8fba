//! Caller-declared sets of anticipated error statuses.

use std::fmt::Debug;
use std::hash::Hash;

use crate::status::HttpCode;

/// A closed type whose values each stand for one anticipated status code.
///
/// Implement it with [`expected_status!`](crate::expected_status) so that
/// matching on the type is checked for exhaustiveness by the compiler.
/// [`HttpCode`] implements it too, for sets only known at runtime.
pub trait ExpectedStatus: Copy + Eq + Hash + Debug + 'static {
    /// Every member of the type.
    const ALL: &'static [Self];

    /// The status code this value stands for.
    fn code(self) -> HttpCode;

    /// The member bound to `code`, if any.
    fn from_code(code: HttpCode) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.code() == code)
    }
}

/// Declares an enum of anticipated statuses, each variant bound to one
/// [`HttpCode`] variant.
///
/// ```
/// rest_routes::expected_status! {
///     pub enum LookupError {
///         Missing = NotFound,
///         Crashed = InternalServerError,
///     }
/// }
///
/// use rest_routes::{ExpectedStatus, HttpCode};
/// assert_eq!(LookupError::Missing.code(), HttpCode::NotFound);
/// assert_eq!(LookupError::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! expected_status {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $code:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
        }

        impl $crate::ExpectedStatus for $name {
            const ALL: &'static [Self] = &[$($name::$variant,)+];

            fn code(self) -> $crate::HttpCode {
                match self {
                    $($name::$variant => $crate::HttpCode::$code,)+
                }
            }
        }
    };
}

/// The expected-status type of a call that anticipates no error status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoExpected {}

impl ExpectedStatus for NoExpected {
    const ALL: &'static [Self] = &[];

    fn code(self) -> HttpCode {
        match self {}
    }
}

impl ExpectedStatus for HttpCode {
    const ALL: &'static [Self] = HttpCode::ALL;

    fn code(self) -> HttpCode {
        self
    }
}

/// The ordered list of statuses one call treats as anticipated errors.
///
/// Duplicates are kept as given; they do not change membership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedSet<S> {
    codes: Vec<S>,
}

impl<S: ExpectedStatus> ExpectedSet<S> {
    pub fn new(codes: impl IntoIterator<Item = S>) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    /// Every member of `S`, in declaration order.
    pub fn all() -> Self {
        Self::new(S::ALL.iter().copied())
    }

    pub fn empty() -> Self {
        Self { codes: Vec::new() }
    }

    /// Finds the member declared for `code`.
    pub fn lookup(&self, code: HttpCode) -> Option<S> {
        self.codes.iter().copied().find(|status| status.code() == code)
    }

    pub fn contains(&self, status: S) -> bool {
        self.codes.contains(&status)
    }

    pub fn iter(&self) -> impl Iterator<Item = S> + '_ {
        self.codes.iter().copied()
    }

    /// Members in first-seen order with duplicates removed.
    pub fn distinct(&self) -> Vec<S> {
        let mut seen = Vec::with_capacity(self.codes.len());
        for status in &self.codes {
            if !seen.contains(status) {
                seen.push(*status);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<S: ExpectedStatus> FromIterator<S> for ExpectedSet<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S: ExpectedStatus> Default for ExpectedSet<S> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::expected_status! {
        enum Lookup {
            Missing = NotFound,
            Crashed = InternalServerError,
        }
    }

    #[test]
    fn macro_binds_variants_to_codes() {
        assert_eq!(Lookup::Missing.code(), HttpCode::NotFound);
        assert_eq!(Lookup::Crashed.code(), HttpCode::InternalServerError);
        assert_eq!(Lookup::ALL, &[Lookup::Missing, Lookup::Crashed]);
        assert_eq!(Lookup::from_code(HttpCode::NotFound), Some(Lookup::Missing));
        assert_eq!(Lookup::from_code(HttpCode::Forbidden), None);
    }

    #[test]
    fn lookup_respects_declared_subset() {
        let set = ExpectedSet::new([Lookup::Crashed]);
        assert_eq!(set.lookup(HttpCode::InternalServerError), Some(Lookup::Crashed));
        assert_eq!(set.lookup(HttpCode::NotFound), None);
        assert!(!set.contains(Lookup::Missing));
    }

    #[test]
    fn duplicates_are_tolerated() {
        let set = ExpectedSet::new([HttpCode::NotFound, HttpCode::NotFound, HttpCode::Gone]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.distinct(), vec![HttpCode::NotFound, HttpCode::Gone]);
        assert_eq!(set.lookup(HttpCode::NotFound), Some(HttpCode::NotFound));
    }

    #[test]
    fn no_expected_is_empty() {
        let set = ExpectedSet::<NoExpected>::all();
        assert!(set.is_empty());
        assert_eq!(set.lookup(HttpCode::NotFound), None);
    }
}
