//! Scope tags for configuration values.
//!
//! Every stored value carries a [`Scope`] recording which tier it came from
//! (system, global, or the file itself) and whether it arrived through an
//! include directive. The include bit is orthogonal to the precedence bits.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Serialize, Serializer};

/// Bitset describing where a configuration value comes from.
///
/// # Examples
///
/// ```
/// use gitconf::Scope;
///
/// let scope = Scope::SYSTEM | Scope::INCLUDE;
/// assert!(scope.contains(Scope::INCLUDE));
/// assert_eq!(scope.to_string(), "system-inc");
/// assert_eq!(Scope::MASK.bits(), 0xFFFE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scope(u16);

impl Scope {
    /// The value arrived through an `include.path` directive.
    pub const INCLUDE: Self = Self(1);
    /// The value comes from the system-wide file.
    pub const SYSTEM: Self = Self(1 << 1);
    /// The value comes from the per-user file.
    pub const GLOBAL: Self = Self(1 << 2);
    /// The value belongs to the document itself (repository or explicit file).
    pub const SELF_: Self = Self(1 << 3);
    /// Every bit.
    pub const ALL: Self = Self(0xFFFF);
    /// Every bit except [`Scope::INCLUDE`].
    pub const MASK: Self = Self(!1);

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share at least one bit.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether the include modifier is set.
    #[must_use]
    pub const fn is_include(self) -> bool {
        self.intersects(Self::INCLUDE)
    }

    /// The scope with the include modifier cleared.
    #[must_use]
    pub const fn without_include(self) -> Self {
        Self(self.0 & Self::MASK.0)
    }

    /// Re-tag a value for merging: keep the include bit, replace the
    /// precedence bits with `scope`.
    #[must_use]
    pub const fn rebase(self, scope: Self) -> Self {
        Self((self.0 & !Self::MASK.0) | scope.0)
    }
}

impl BitOr for Scope {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Scope {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Scope {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Scope {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.contains(Self::SYSTEM) {
            "system"
        } else if self.contains(Self::GLOBAL) {
            "global"
        } else if self.contains(Self::SELF_) {
            "self"
        } else {
            "unknown"
        };
        let inc = if self.is_include() { "-inc" } else { "" };
        write!(f, "{name}{inc}")
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
