//! Dotted version parsing, comparison, and range matching.
//!
//! Versions are dot-separated components, each of the form
//! `<digits>[<letters>[<digits>]]` (e.g. `2`, `2beta`, `2beta3`):
//! - Components compare by their leading number first
//! - At the same number, a plain component outranks any lettered one
//!   (`2beta3` < `2`), and lettered ones compare by their letters
//!   (`2alpha` < `2beta`), then by their trailing number
//! - Trailing zero components are dropped, so `1.0.0` == `1`

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use pesto_util::errors::PestoError;

/// One dot-separated segment of a [`Version`].
#[derive(Debug, Clone)]
pub struct VersionComponent {
    original: String,
    numeric_prefix: u64,
    letter_suffix: Option<String>,
    trailing_number: u64,
}

impl VersionComponent {
    /// The canonical zero component, `0`.
    pub fn zero() -> Self {
        Self::plain(0)
    }

    fn plain(number: u64) -> Self {
        Self {
            original: number.to_string(),
            numeric_prefix: number,
            letter_suffix: None,
            trailing_number: 0,
        }
    }

    pub fn parse(text: &str) -> Result<Self, PestoError> {
        let invalid = || PestoError::VersionParse {
            message: format!("invalid version component `{text}`"),
        };
        let number = |digits: &str| digits.parse::<u64>().map_err(|_| too_large(text));

        let digits_end = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        if digits_end == 0 {
            return Err(invalid());
        }
        let numeric_prefix = number(&text[..digits_end])?;

        let rest = &text[digits_end..];
        let letters_end = rest
            .find(|c: char| !c.is_ascii_lowercase())
            .unwrap_or(rest.len());
        let (letter_suffix, trailing_number) = if letters_end == 0 {
            if !rest.is_empty() {
                return Err(invalid());
            }
            (None, 0)
        } else {
            let trailing = &rest[letters_end..];
            if !trailing.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            let number = if trailing.is_empty() {
                0
            } else {
                number(trailing)?
            };
            (Some(rest[..letters_end].to_string()), number)
        };

        Ok(Self {
            original: text.to_string(),
            numeric_prefix,
            letter_suffix,
            trailing_number,
        })
    }

    pub fn numeric_prefix(&self) -> u64 {
        self.numeric_prefix
    }

    pub fn letter_suffix(&self) -> Option<&str> {
        self.letter_suffix.as_deref()
    }

    pub fn trailing_number(&self) -> u64 {
        self.trailing_number
    }

    /// The smallest plain component greater than this one.
    ///
    /// A lettered component steps up to its plain release (`2beta3` -> `2`);
    /// a plain component increments its number (`2` -> `3`).
    /// Fails when the number is already `u64::MAX`.
    pub fn next(&self) -> Result<Self, PestoError> {
        if self.letter_suffix.is_some() {
            return Ok(Self::plain(self.numeric_prefix));
        }
        self.numeric_prefix
            .checked_add(1)
            .map(Self::plain)
            .ok_or_else(|| too_large(&self.original))
    }

    fn is_zero(&self) -> bool {
        self.numeric_prefix == 0 && self.letter_suffix.is_none()
    }
}

fn too_large(text: &str) -> PestoError {
    PestoError::VersionParse {
        message: format!("version component too large: `{text}`"),
    }
}

impl PartialEq for VersionComponent {
    fn eq(&self, other: &Self) -> bool {
        self.numeric_prefix == other.numeric_prefix
            && self.letter_suffix == other.letter_suffix
            && self.trailing_number == other.trailing_number
    }
}

impl Eq for VersionComponent {}

impl Hash for VersionComponent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numeric_prefix.hash(state);
        self.letter_suffix.hash(state);
        self.trailing_number.hash(state);
    }
}

impl Ord for VersionComponent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric_prefix
            .cmp(&other.numeric_prefix)
            .then_with(|| match (&self.letter_suffix, &other.letter_suffix) {
                (a, b) if a == b => self.trailing_number.cmp(&other.trailing_number),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for VersionComponent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// A parsed, canonicalized dotted version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    components: Vec<VersionComponent>,
}

impl Version {
    pub fn parse(text: &str) -> Result<Self, PestoError> {
        let components = text
            .split('.')
            .map(VersionComponent::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_components(components))
    }

    fn from_components(mut components: Vec<VersionComponent>) -> Self {
        while components.last().is_some_and(VersionComponent::is_zero) {
            components.pop();
        }
        Self { components }
    }

    pub fn components(&self) -> &[VersionComponent] {
        &self.components
    }

    fn component(&self, idx: usize) -> VersionComponent {
        self.components
            .get(idx)
            .cloned()
            .unwrap_or_else(VersionComponent::zero)
    }

    /// The start of the next minor series: `1.2.3` -> `1.3`, `1` -> `1.1`.
    pub fn next_minor(&self) -> Result<Self, PestoError> {
        Ok(Self::from_components(vec![
            self.component(0),
            self.component(1).next()?,
        ]))
    }

    /// The start of the next major series: `1.2.3` -> `2`.
    pub fn next_major(&self) -> Result<Self, PestoError> {
        Ok(Self::from_components(vec![self.component(0).next()?]))
    }
}

impl FromStr for Version {
    type Err = PestoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let zero = VersionComponent::zero();
        let max_len = self.components.len().max(other.components.len());
        for i in 0..max_len {
            let a = self.components.get(i).unwrap_or(&zero);
            let b = other.components.get(i).unwrap_or(&zero);
            let ord = a.cmp(b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("0");
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// An interval of versions with an inclusive lower bound.
///
/// `lower <= upper` is not checked; an inverted range simply contains
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    lower: Version,
    upper: Version,
    upper_inclusive: bool,
}

impl VersionRange {
    pub fn new(lower: Version, upper: Version, upper_inclusive: bool) -> Self {
        Self {
            lower,
            upper,
            upper_inclusive,
        }
    }

    /// Exactly `version`: `[v, v]`.
    pub fn exact(version: Version) -> Self {
        Self::new(version.clone(), version, true)
    }

    /// `version` up to, but excluding, the next major: `[v, v.next_major)`.
    pub fn from_version(version: Version) -> Result<Self, PestoError> {
        Self::up_to_next_major(version)
    }

    pub fn up_to_next_major(version: Version) -> Result<Self, PestoError> {
        let upper = version.next_major()?;
        Ok(Self::new(version, upper, false))
    }

    pub fn up_to_next_minor(version: Version) -> Result<Self, PestoError> {
        let upper = version.next_minor()?;
        Ok(Self::new(version, upper, false))
    }

    pub fn lower(&self) -> &Version {
        &self.lower
    }

    pub fn upper(&self) -> &Version {
        &self.upper
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    /// Check if a version satisfies this range.
    pub fn contains(&self, version: &Version) -> bool {
        if *version < self.lower {
            return false;
        }
        if self.upper_inclusive {
            *version <= self.upper
        } else {
            *version < self.upper
        }
    }

    /// The narrowest range allowed by `first` and every range in `rest`.
    ///
    /// The upper bound keeps the inclusivity of the range that supplied it;
    /// on a tie the earlier range wins. The result may be empty.
    pub fn intersect<'a>(
        first: &VersionRange,
        rest: impl IntoIterator<Item = &'a VersionRange>,
    ) -> VersionRange {
        let mut result = first.clone();
        for range in rest {
            if range.lower > result.lower {
                result.lower = range.lower.clone();
            }
            if range.upper < result.upper {
                result.upper = range.upper.clone();
                result.upper_inclusive = range.upper_inclusive;
            }
        }
        result
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.upper_inclusive { ']' } else { ')' };
        write!(f, "[{}, {}{close}", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn component_parse_plain() {
        let c = VersionComponent::parse("12").unwrap();
        assert_eq!(c.numeric_prefix(), 12);
        assert_eq!(c.letter_suffix(), None);
        assert_eq!(c.trailing_number(), 0);
    }

    #[test]
    fn component_parse_lettered() {
        let c = VersionComponent::parse("2beta3").unwrap();
        assert_eq!(c.numeric_prefix(), 2);
        assert_eq!(c.letter_suffix(), Some("beta"));
        assert_eq!(c.trailing_number(), 3);

        let c = VersionComponent::parse("2rc").unwrap();
        assert_eq!(c.letter_suffix(), Some("rc"));
        assert_eq!(c.trailing_number(), 0);
    }

    #[test]
    fn component_parse_rejects_bad_shapes() {
        for bad in ["", "beta", "2Beta", "2-beta", "2beta3x", "2.", "v1", " 1"] {
            assert!(VersionComponent::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn component_ordering() {
        let c = |s| VersionComponent::parse(s).unwrap();
        assert!(c("1") < c("2"));
        assert!(c("2beta3") < c("2"));
        assert!(c("2alpha") < c("2beta"));
        assert!(c("2beta2") < c("2beta10"));
        assert!(c("1") < c("2alpha"));
        assert_eq!(c("2beta"), c("2beta0"));
    }

    #[test]
    fn component_next() {
        let c = |s| VersionComponent::parse(s).unwrap();
        assert_eq!(c("2beta3").next().unwrap(), c("2"));
        assert_eq!(c("2").next().unwrap(), c("3"));
        assert_eq!(VersionComponent::zero().next().unwrap(), c("1"));
    }

    #[test]
    fn largest_component_has_no_successor() {
        let max = u64::MAX.to_string();
        let c = VersionComponent::parse(&max).unwrap();
        assert_eq!(c.numeric_prefix(), u64::MAX);
        let err = c.next().unwrap_err();
        assert!(err.to_string().contains("too large"), "{err}");

        // A lettered component steps down to its plain release instead.
        let lettered = VersionComponent::parse(&format!("{max}rc1")).unwrap();
        assert_eq!(lettered.next().unwrap(), c);

        let version = v(&max);
        assert!(version.next_major().is_err());
        assert!(VersionRange::from_version(version.clone()).is_err());
        assert!(VersionRange::up_to_next_minor(v(&format!("1.{max}"))).is_err());
        assert!(VersionRange::up_to_next_minor(version).is_ok());
        assert!(VersionRange::exact(v(&max)).contains(&v(&max)));
    }

    #[test]
    fn oversized_component_is_rejected() {
        let err = VersionComponent::parse("18446744073709551616").unwrap_err();
        assert!(err.to_string().contains("too large"), "{err}");
        assert!(VersionComponent::parse("1rc18446744073709551616").is_err());
    }

    #[test]
    fn canonicalization() {
        assert_eq!(v("1.0.0"), v("1"));
        assert_eq!(v("1.2.0.0"), v("1.2"));
        assert_eq!(v("1.0.0").to_string(), "1");
        assert_eq!(v("1.2.0").to_string(), "1.2");
        assert_eq!(v("0.0").to_string(), "0");
        assert_eq!(v("1.0.0").components().len(), 1);
    }

    #[test]
    fn display_keeps_component_text() {
        assert_eq!(v("2.0beta3").to_string(), "2.0beta3");
        assert_eq!(v("1.10.4").to_string(), "1.10.4");
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("1..2").is_err());
        assert!(Version::parse("1.x").is_err());
        assert!(Version::parse("v1.2").is_err());
        assert!("1.2.3".parse::<Version>().is_ok());
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert!(v("1.9") < v("1.10"));
        assert!(v("1.2") < v("1.2.1"));
        assert!(v("2") > v("1.99.99"));
    }

    #[test]
    fn prerelease_ordering() {
        assert!(v("2beta3") < v("2"));
        assert!(v("2alpha") < v("2beta"));
        assert!(v("2.0beta3") < v("2.0"));
        assert!(v("1.9") < v("2.0beta3"));
    }

    #[test]
    fn total_order_consistent_with_eq() {
        let all: Vec<Version> = ["0", "1", "1.0.1", "1.2", "1.10", "2alpha", "2beta3", "2"]
            .iter()
            .map(|s| v(s))
            .collect();
        for a in &all {
            for b in &all {
                let lt = a < b;
                let eq = a == b;
                let gt = a > b;
                assert_eq!([lt, eq, gt].iter().filter(|x| **x).count(), 1, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn next_minor_and_major() {
        assert_eq!(v("1.2.3").next_minor().unwrap(), v("1.3"));
        assert_eq!(v("1").next_minor().unwrap(), v("1.1"));
        assert_eq!(v("1.2beta").next_minor().unwrap(), v("1.2"));
        assert_eq!(v("1.2.3").next_major().unwrap(), v("2"));
        assert_eq!(v("2beta3").next_major().unwrap(), v("2"));
        assert_eq!(v("0").next_major().unwrap(), v("1"));
        assert_eq!(v("0").next_minor().unwrap(), v("0.1"));
    }

    #[test]
    fn next_is_strictly_greater() {
        for s in ["0", "0.1", "1", "1.2.3", "2beta3", "1.0alpha", "3.9.9"] {
            let version = v(s);
            assert!(version.next_major().unwrap() > version, "next_major of {s}");
            assert!(version.next_minor().unwrap() > version, "next_minor of {s}");
        }
    }

    #[test]
    fn range_exclusive_upper() {
        let range = VersionRange::new(v("1.0"), v("2.0"), false);
        assert!(range.contains(&v("1.0")));
        assert!(range.contains(&v("1.9.9")));
        assert!(!range.contains(&v("2.0")));
        assert!(!range.contains(&v("0.9")));
    }

    #[test]
    fn range_exact() {
        let range = VersionRange::exact(v("1.5"));
        assert!(range.contains(&v("1.5.0")));
        assert!(!range.contains(&v("1.4")));
        assert!(!range.contains(&v("1.5.1")));
    }

    #[test]
    fn range_constructors() {
        let from = VersionRange::from_version(v("1.2")).unwrap();
        assert_eq!(from, VersionRange::new(v("1.2"), v("2"), false));
        assert_eq!(VersionRange::up_to_next_major(v("1.2")).unwrap(), from);

        let minor = VersionRange::up_to_next_minor(v("1.2.3")).unwrap();
        assert_eq!(minor, VersionRange::new(v("1.2.3"), v("1.3"), false));
        assert!(minor.contains(&v("1.2.9")));
        assert!(!minor.contains(&v("1.3")));
    }

    #[test]
    fn intersect_narrows() {
        let a = VersionRange::new(v("1.0"), v("3.0"), false);
        let b = VersionRange::new(v("2.0"), v("4.0"), false);
        let i = VersionRange::intersect(&a, [&b]);
        assert_eq!(i, VersionRange::new(v("2.0"), v("3.0"), false));
    }

    #[test]
    fn intersect_takes_inclusivity_from_min_upper() {
        let a = VersionRange::new(v("1.0"), v("3.0"), false);
        let b = VersionRange::exact(v("2.0"));
        let i = VersionRange::intersect(&a, [&b]);
        assert_eq!(i, VersionRange::exact(v("2.0")));
    }

    #[test]
    fn intersect_tie_keeps_first_flag() {
        let a = VersionRange::new(v("1.0"), v("2.0"), true);
        let b = VersionRange::new(v("1.0"), v("2.0"), false);
        assert!(VersionRange::intersect(&a, [&b]).upper_inclusive());
        assert!(!VersionRange::intersect(&b, [&a]).upper_inclusive());
    }

    #[test]
    fn intersect_single_and_empty() {
        let a = VersionRange::from_version(v("1.4")).unwrap();
        assert_eq!(VersionRange::intersect(&a, std::iter::empty()), a);

        let low = VersionRange::new(v("1.0"), v("2.0"), false);
        let high = VersionRange::new(v("3.0"), v("4.0"), false);
        let i = VersionRange::intersect(&low, [&high]);
        for s in ["1.0", "1.5", "2.0", "3.0", "3.5"] {
            assert!(!i.contains(&v(s)));
        }
    }

    #[test]
    fn range_display() {
        assert_eq!(
            VersionRange::from_version(v("1.5")).unwrap().to_string(),
            "[1.5, 2)"
        );
        assert_eq!(VersionRange::exact(v("1.2")).to_string(), "[1.2, 1.2]");
    }
}
