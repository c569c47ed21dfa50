//! Small value holders used by the typed join helpers.

use core::fmt;

/// A record holding a single comparable field.
///
/// Used as the element type of single-column tables, where the join key is
/// the whole record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyed<T> {
    pub e: T,
}

impl<T> Keyed<T> {
    pub fn new(e: T) -> Self {
        Self { e }
    }

    /// Wraps every value of a sequence.
    pub fn wrap_all<I>(values: I) -> alloc::vec::Vec<Self>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().map(Self::new).collect()
    }
}

/// One output row of a three-way join: three independently typed values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tuple3<T1, T2, T3> {
    pub x: T1,
    pub y: T2,
    pub z: T3,
}

impl<T1, T2, T3> Tuple3<T1, T2, T3> {
    pub fn new(x: T1, y: T2, z: T3) -> Self {
        Self { x, y, z }
    }
}

impl<T1, T2, T3> From<(T1, T2, T3)> for Tuple3<T1, T2, T3> {
    fn from((x, y, z): (T1, T2, T3)) -> Self {
        Self { x, y, z }
    }
}

impl<T1: fmt::Display, T2: fmt::Display, T3: fmt::Display> fmt::Display for Tuple3<T1, T2, T3> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}
