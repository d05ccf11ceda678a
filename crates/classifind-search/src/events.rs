//! Lifecycle notifications published by [`crate::SearchEngine`].

use crate::types::SearchKind;

/// One step in the life of a search operation.
///
/// `generation` identifies the operation; a UI applies a `Completed` event
/// only when its generation is the latest `Started` one it has seen.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Started {
        generation: u64,
        kind: SearchKind,
    },
    Completed {
        generation: u64,
        kind: SearchKind,
        label: String,
        count: usize,
    },
    /// The operation ran to completion without finding anything.
    Empty {
        generation: u64,
        kind: SearchKind,
        label: String,
    },
    Failed {
        generation: u64,
        kind: SearchKind,
        message: String,
    },
    /// A newer operation started first; this one's outcome was dropped.
    Discarded {
        generation: u64,
        kind: SearchKind,
    },
}

impl SearchEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation, .. }
            | Self::Completed { generation, .. }
            | Self::Empty { generation, .. }
            | Self::Failed { generation, .. }
            | Self::Discarded { generation, .. } => *generation,
        }
    }

    #[must_use]
    pub fn kind(&self) -> SearchKind {
        match self {
            Self::Started { kind, .. }
            | Self::Completed { kind, .. }
            | Self::Empty { kind, .. }
            | Self::Failed { kind, .. }
            | Self::Discarded { kind, .. } => *kind,
        }
    }
}
