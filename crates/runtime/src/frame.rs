use serde::{Deserialize, Serialize};

/// Monotonic counter identifying one settled set of control inputs.
///
/// Every accepted control event produces the next revision; views carry the
/// revision that produced them so consumers can drop stale ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(pub u64);

impl Revision {
    pub const INITIAL: Revision = Revision(0);

    pub fn next(self) -> Self {
        Revision(self.0 + 1)
    }
}
