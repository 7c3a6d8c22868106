// crates/devdesc-rs-pqa/src/ids.rs

//! Store-assigned record identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// A saved profile. Analyses, archives and queue items are keyed by it.
    ProfileId
);
record_id!(ArchiveId);
record_id!(MetricsId);
record_id!(DiffId);
record_id!(ThresholdId);
record_id!(QueueItemId);
record_id!(IssueId);
