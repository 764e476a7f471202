//! Strongly-typed index newtypes.
//!
//! Quadrature-point and degree-of-freedom indices are both plain `usize`
//! in a face loop; the newtypes keep them from being swapped.

use std::fmt;

macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// First index (0).
            pub const ZERO: Self = Self(0);

            /// Iterate over [0, n).
            pub fn iter(n: usize) -> impl ExactSizeIterator<Item = $name> {
                (0..n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;
            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }
    };
}

define_index!(
    /// Integration (quadrature) point index on a face.
    ///
    /// # Example
    ///
    /// ```
    /// use dg_transport::types::QpIndex;
    ///
    /// let qp = QpIndex::new(2);
    /// assert_eq!(qp.get(), 2);
    /// ```
    QpIndex,
    "qp"
);

define_index!(
    /// Local degree-of-freedom (shape function) index on one element.
    ///
    /// # Example
    ///
    /// ```
    /// use dg_transport::types::DofIndex;
    ///
    /// let dof = DofIndex::new(3);
    /// assert_eq!(dof.get(), 3);
    /// ```
    DofIndex,
    "dof"
);
