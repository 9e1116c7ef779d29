//! Strongly typed, zero-cost identifier wrappers.
//!
//! Nodes and pieces reference each other exclusively through these handles.
//! Storing handles instead of references (or reference-counted pointers)
//! keeps the node ↔ piece cycle acyclic from the borrow checker's point of
//! view and makes every entity trivially serializable.  All IDs are
//! `Copy + Ord + Hash` so they can be used as map keys and sorted collection
//! elements without ceremony.  The inner integer is `pub` to allow direct
//! indexing into arena `Vec`s via `id.0 as usize`, but callers should prefer
//! the `.index()` helpers for clarity.
//!
//! Handles are only meaningful relative to the store that issued them; a
//! handle whose slot has been freed is *stale* and lookups with it return
//! `None`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID": the all-ones bit pattern.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a junction node in the rail network store.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a placed track piece in the rail network store.
    pub struct PieceId(u32);
}

typed_id! {
    /// Index of a track class in the application's [`TrackCatalog`].
    /// Using `u16` keeps per-piece storage compact (max 65,535 track types).
    ///
    /// [`TrackCatalog`]: crate::TrackCatalog
    pub struct TrackTypeId(u16);
}
