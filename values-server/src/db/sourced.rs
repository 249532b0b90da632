//! Tag for where a repository result came from

/// A repository result tagged with the store that produced it.
///
/// `Fallback` covers both plain fallback mode (no database or table not
/// ready) and results synthesized after a live query failed. The HTTP
/// contract treats both variants the same; callers and tests can tell them
/// apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sourced<T> {
    Live(T),
    Fallback(T),
}

impl<T> Sourced<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Live(v) | Self::Fallback(v) => v,
        }
    }

    pub fn get(&self) -> &T {
        match self {
            Self::Live(v) | Self::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Transform the payload, keeping the tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        match self {
            Self::Live(v) => Sourced::Live(f(v)),
            Self::Fallback(v) => Sourced::Fallback(f(v)),
        }
    }
}
