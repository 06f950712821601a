//! Typed entity identifiers.
//!
//! Every world entity is created once at construction and never destroyed, so
//! an id doubles as the entity's index into its owning `Vec`.  Prefer the
//! `.index()` helper over `id.0 as usize` at call sites.

use std::fmt;

/// Declares an entity id newtype over an unsigned integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Position of the entity in its owning `Vec`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
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

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a stationary sensing device.
    pub struct DeviceId(u32);
}

typed_id! {
    /// Index of a mobile relay node (UAV).
    pub struct UavId(u32);
}

typed_id! {
    /// Index of a mobile threat.
    pub struct ThreatId(u32);
}
