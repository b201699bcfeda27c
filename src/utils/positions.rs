//! Relative positions within a linear context
//!
//! Given an origin element and the ordered elements of its context (e.g. the
//! word slots of a clause), look up the element N positions before or after it.
//!
//! Only meaningful for units that do not embed one another. For the phrase
//! `[1, 2, 3, [4, 5], 6]` flattened to its outer elements, 3 and 6 count as
//! adjacent; that is fine for slots, which never overlap.

use crate::error::{Error, Result};

/// Offset lookups around an origin element
#[derive(Debug, Clone)]
pub struct Positions<'a, T> {
    context: &'a [T],
    origin: usize,
    default: Option<&'a T>,
}

impl<'a, T: PartialEq> Positions<'a, T> {
    /// Locate `element` in `context` (first occurrence)
    ///
    /// # Errors
    /// `Error::ElementNotInContext` when `element` does not occur in `context`.
    pub fn new(element: &T, context: &'a [T]) -> Result<Self> {
        let origin = context
            .iter()
            .position(|e| e == element)
            .ok_or(Error::ElementNotInContext)?;

        Ok(Self {
            context,
            origin,
            default: None,
        })
    }
}

impl<'a, T> Positions<'a, T> {
    /// Value returned by [`get`](Self::get) when an offset leaves the context
    pub fn with_default(mut self, default: &'a T) -> Self {
        self.default = Some(default);
        self
    }

    /// Index of the origin element within the context
    pub fn origin_index(&self) -> usize {
        self.origin
    }

    /// Element `offset` positions from the origin, `None` outside the context
    ///
    /// Negative offsets never wrap around to the end of the context.
    pub fn element_at(&self, offset: isize) -> Option<&'a T> {
        let index = self.origin.checked_add_signed(offset)?;
        self.context.get(index)
    }

    /// Element at `offset`, or the configured default
    pub fn get(&self, offset: isize) -> Option<&'a T> {
        self.element_at(offset).or(self.default)
    }

    /// Element at `offset`, or `default` (falling back to the configured default)
    pub fn get_or(&self, offset: isize, default: Option<&'a T>) -> Option<&'a T> {
        self.element_at(offset).or(default).or(self.default)
    }

    /// Apply `f` to the element at `offset`, if there is one
    ///
    /// Out of bounds this is `None`; the global default is not passed through
    /// `f`. Use [`get_with_or`](Self::get_with_or) to supply a fallback result.
    pub fn get_with<R, F>(&self, offset: isize, f: F) -> Option<R>
    where
        F: FnOnce(&'a T) -> R,
    {
        self.element_at(offset).map(f)
    }

    /// Apply `f` to the element at `offset`, or return `default` out of bounds
    pub fn get_with_or<R, F>(&self, offset: isize, default: R, f: F) -> R
    where
        F: FnOnce(&'a T) -> R,
    {
        self.element_at(offset).map(f).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLAUSE: [u32; 5] = [101, 102, 103, 104, 105];

    #[test]
    fn test_offsets_within_context() {
        let pos = Positions::new(&103, &CLAUSE).unwrap();
        assert_eq!(pos.origin_index(), 2);
        assert_eq!(pos.element_at(0), Some(&103));
        assert_eq!(pos.element_at(-2), Some(&101));
        assert_eq!(pos.element_at(2), Some(&105));
    }

    #[test]
    fn test_out_of_bounds_never_wraps() {
        let pos = Positions::new(&101, &CLAUSE).unwrap();
        assert_eq!(pos.element_at(-1), None);
        assert_eq!(pos.element_at(5), None);
        assert_eq!(pos.get(-1), None);
    }

    #[test]
    fn test_defaults() {
        let fallback = 0u32;
        let local = 9u32;
        let pos = Positions::new(&105, &CLAUSE).unwrap().with_default(&fallback);

        assert_eq!(pos.get(1), Some(&0));
        assert_eq!(pos.get(-1), Some(&104));
        assert_eq!(pos.get_or(1, Some(&local)), Some(&9));
        assert_eq!(pos.get_or(1, None), Some(&0));
        assert_eq!(pos.get_or(-4, Some(&local)), Some(&101));
    }

    #[test]
    fn test_get_with() {
        let words = ["ʾana", "qimli", "l-bɛθa"];
        let pos = Positions::new(&"qimli", &words).unwrap();
        assert_eq!(pos.get_with(1, |w| w.len()), Some("l-bɛθa".len()));
        assert_eq!(pos.get_with(2, |w| w.len()), None);
    }

    #[test]
    fn test_get_with_or() {
        let words = ["ʾana", "qimli", "l-bɛθa"];
        let pos = Positions::new(&"qimli", &words).unwrap();
        assert_eq!(pos.get_with_or(-1, 0, |w| w.len()), "ʾana".len());
        assert_eq!(pos.get_with_or(5, 0, |w| w.len()), 0);
        assert_eq!(pos.get_with_or(-2, "-", |w| *w), "-");
    }

    #[test]
    fn test_missing_origin() {
        let result = Positions::new(&999, &CLAUSE);
        assert!(matches!(result, Err(Error::ElementNotInContext)));
    }
}
