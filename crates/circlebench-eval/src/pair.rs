use serde::{Deserialize, Serialize};
use std::fmt;

/// An unordered pair of circle labels.
///
/// The two labels are lowercased and stored in lexicographic order, so
/// `Pair::new("Blue", "Red")` and `Pair::new("red", "blue")` are equal and
/// hash identically. This makes set membership and set differences over
/// pairs unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair(String, String);

impl Pair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let a = a.into().to_ascii_lowercase();
        let b = b.into().to_ascii_lowercase();
        if a <= b {
            Pair(a, b)
        } else {
            Pair(b, a)
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }

    /// True when both labels are the same circle.
    pub fn is_self_pair(&self) -> bool {
        self.0 == self.1
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
