use crate::changes::ChangeAction;

/// Kind of out-of-sync pair produced by the history check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Only the base file changed.
    ModifiedBase,
    /// Base file and translation both changed.
    ModifiedBoth,
}

/// Outcome for a base file and its translation given their change actions.
///
/// Deleted base files never produce an outcome, and neither do pairs where the
/// translation was deleted.
#[must_use]
#[allow(clippy::match_same_arms, clippy::unnested_or_patterns)]
pub const fn decide(base: Option<ChangeAction>, translation: Option<ChangeAction>) -> Option<Outcome> {
    use ChangeAction::{Deleted, Inserted, Modified};

    match (base, translation) {
        (Some(Inserted), Some(Inserted))
        | (Some(Modified), Some(Modified))
        | (Some(Inserted), Some(Modified))
        | (Some(Modified), Some(Inserted)) => Some(Outcome::ModifiedBoth),
        (Some(Deleted), Some(Deleted))
        | (Some(Inserted), Some(Deleted))
        | (Some(Modified), Some(Deleted))
        | (Some(Deleted), Some(Inserted))
        | (Some(Deleted), Some(Modified)) => None,
        (Some(Inserted), None) | (Some(Modified), None) => Some(Outcome::ModifiedBase),
        (Some(Deleted), None) => None,
        (None, _) => None,
    }
}
