//! Identifier types shared by the window and tab registries.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

host_id!(
    /// Host-assigned window identifier
    WindowId
);

host_id!(
    /// Host-assigned tab identifier
    TabId
);

host_id!(
    /// Frame identifier within a tab; `FrameId::MAIN` is the top-level document
    FrameId
);

impl FrameId {
    pub const MAIN: FrameId = FrameId(0);
}

impl Default for FrameId {
    fn default() -> Self {
        Self::MAIN
    }
}
