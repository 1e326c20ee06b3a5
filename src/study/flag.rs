//! Backend requests issued by optimistic flag toggles.
//!
//! The session flips the flag locally first and hands back a
//! [`FlagMutation`]; the caller persists it through the gateway and feeds the
//! resulting [`FlagOutcome`] back into the session.

use crate::vocabulary::{FlagValue, GatewayError, VocabularyGateway};

/// One flag change requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagMutation {
    /// Entry whose flag changed.
    pub id: i64,
    /// Flag value before the optimistic toggle.
    pub previous: FlagValue,
    /// Flag value sent to the backend.
    pub requested: FlagValue,
}

/// Result of persisting a [`FlagMutation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOutcome {
    /// The mutation that was sent.
    pub mutation: FlagMutation,
    /// What the backend answered.
    pub result: Result<(), GatewayError>,
}

impl FlagOutcome {
    /// Returns true when the backend accepted the change.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Sends `mutation` to the backend.
///
/// Failures are captured in the outcome rather than returned, so the caller
/// can always route the answer back to the session for rollback.
pub async fn persist_flag(
    gateway: &dyn VocabularyGateway,
    mutation: FlagMutation,
) -> FlagOutcome {
    let result = gateway.set_flag(mutation.id, mutation.requested).await;
    FlagOutcome { mutation, result }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::vocabulary::MockVocabularyGateway;

    const MUTATION: FlagMutation = FlagMutation {
        id: 3,
        previous: FlagValue::Unflagged,
        requested: FlagValue::Flagged,
    };

    #[rstest]
    #[tokio::test]
    async fn sends_requested_value() {
        let mut gateway = MockVocabularyGateway::new();
        gateway
            .expect_set_flag()
            .with(eq(3), eq(FlagValue::Flagged))
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = persist_flag(&gateway, MUTATION).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.mutation, MUTATION);
    }

    #[rstest]
    #[tokio::test]
    async fn captures_backend_failure() {
        let mut gateway = MockVocabularyGateway::new();
        gateway.expect_set_flag().times(1).returning(|_, _| {
            Err(GatewayError::Unavailable {
                message: "offline".to_owned(),
            })
        });

        let outcome = persist_flag(&gateway, MUTATION).await;

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.result,
            Err(GatewayError::Unavailable {
                message: "offline".to_owned(),
            })
        );
    }
}
