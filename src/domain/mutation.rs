//! Actions an administrator can apply to a listed record.

use std::fmt;

use super::ids::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    Delete,
    Approve,
    Reject,
    StatusChange { to: String },
}

impl MutationKind {
    /// Destructive actions require explicit confirmation before dispatch.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Delete)
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::StatusChange { .. } => "update",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Delete => "deleted",
            Self::Approve => "approved",
            Self::Reject => "rejected",
            Self::StatusChange { .. } => "updated",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusChange { to } => write!(f, "status change to `{to}`"),
            other => f.write_str(other.verb()),
        }
    }
}

/// A mutation awaiting confirmation or server acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    target_id: RecordId,
    kind: MutationKind,
    optimistic_value: Option<String>,
}

impl PendingMutation {
    pub fn delete(target_id: RecordId) -> Self {
        Self {
            target_id,
            kind: MutationKind::Delete,
            optimistic_value: None,
        }
    }

    pub fn approve(target_id: RecordId) -> Self {
        Self {
            target_id,
            kind: MutationKind::Approve,
            optimistic_value: Some("approved".to_string()),
        }
    }

    pub fn reject(target_id: RecordId) -> Self {
        Self {
            target_id,
            kind: MutationKind::Reject,
            optimistic_value: Some("rejected".to_string()),
        }
    }

    pub fn status_change(target_id: RecordId, to: impl Into<String>) -> Self {
        let to = to.into();
        Self {
            target_id,
            optimistic_value: Some(to.clone()),
            kind: MutationKind::StatusChange { to },
        }
    }

    pub fn target_id(&self) -> &RecordId {
        &self.target_id
    }

    pub fn kind(&self) -> &MutationKind {
        &self.kind
    }

    /// Value shown for the target row while the server has not answered yet.
    pub fn optimistic_value(&self) -> Option<&str> {
        self.optimistic_value.as_deref()
    }
}
