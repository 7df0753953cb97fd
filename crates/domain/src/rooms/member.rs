//! Member-directory record.

use common::ParticipantId;
use serde::{Deserialize, Serialize};

/// A member as known to the member directory.
///
/// Only the fields the pairing views need; the full member profile lives
/// in the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    id: ParticipantId,
    nickname: String,
    email: String,
}

impl Member {
    /// Creates a member record.
    pub fn new(
        id: impl Into<ParticipantId>,
        nickname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            nickname: nickname.into(),
            email: email.into(),
        }
    }

    /// The member's id.
    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    /// The member's nickname.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// The member's email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_exposes_its_fields() {
        let member = Member::new("memberId1", "hansdampf", "hans@example.org");
        assert_eq!(member.id(), &ParticipantId::new("memberId1"));
        assert_eq!(member.nickname(), "hansdampf");
        assert_eq!(member.email(), "hans@example.org");
    }
}
