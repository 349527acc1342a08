//! Safety Lock FSM State Definitions
//!
//! A pending unlock request is a status value, not a second record, so
//! "request exists" and "status says requested" can never diverge.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Safety Lock states
///
/// Numeric IDs are stable for compact storage.
/// Terminal state: RELEASED (40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum LockStatus {
    /// Funds locked; owner may request early unlock or release at maturity
    Active = 10,

    /// Owner asked for early unlock; waiting on the guardian's decision
    UnlockRequested = 20,

    /// Guardian approved early unlock; owner may release at any time
    Available = 30,

    /// Terminal: funds returned to the owner's available balance
    Released = 40,
}

impl LockStatus {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, LockStatus::Released)
    }

    /// Closed transition table. Every status write goes through this check;
    /// the guards (caller identity, maturity) live in the engine.
    pub fn can_transition(&self, to: LockStatus) -> bool {
        use LockStatus::*;
        matches!(
            (self, to),
            (Active, UnlockRequested)      // owner requests early unlock
                | (UnlockRequested, Available) // guardian approves
                | (UnlockRequested, Active)    // guardian rejects
                | (Active, Released)           // matured release
                | (Available, Released)        // approved early release
        )
    }

    /// Get the numeric state ID for compact storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from a numeric state ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            10 => Some(LockStatus::Active),
            20 => Some(LockStatus::UnlockRequested),
            30 => Some(LockStatus::Available),
            40 => Some(LockStatus::Released),
            _ => None,
        }
    }

    /// Get human-readable state name (matches the wire format)
    pub fn as_str(&self) -> &'static str {
        match self {
            LockStatus::Active => "active",
            LockStatus::UnlockRequested => "unlock_requested",
            LockStatus::Available => "available",
            LockStatus::Released => "released",
        }
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for LockStatus {
    type Error = ();

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        LockStatus::from_id(value).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LockStatus; 4] = [
        LockStatus::Active,
        LockStatus::UnlockRequested,
        LockStatus::Available,
        LockStatus::Released,
    ];

    #[test]
    fn test_terminal_states() {
        assert!(LockStatus::Released.is_terminal());
        assert!(!LockStatus::Active.is_terminal());
        assert!(!LockStatus::UnlockRequested.is_terminal());
        assert!(!LockStatus::Available.is_terminal());
    }

    #[test]
    fn test_transition_table_is_closed() {
        let allowed = [
            (LockStatus::Active, LockStatus::UnlockRequested),
            (LockStatus::UnlockRequested, LockStatus::Available),
            (LockStatus::UnlockRequested, LockStatus::Active),
            (LockStatus::Active, LockStatus::Released),
            (LockStatus::Available, LockStatus::Released),
        ];

        for from in ALL {
            for to in ALL {
                let expect = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition(to),
                    expect,
                    "transition {} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_nothing_leaves_released() {
        for to in ALL {
            assert!(!LockStatus::Released.can_transition(to));
        }
    }

    #[test]
    fn test_state_id_roundtrip() {
        for state in ALL {
            assert_eq!(LockStatus::from_id(state.id()), Some(state));
        }
        assert!(LockStatus::from_id(0).is_none());
        assert!(LockStatus::from_id(999).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(LockStatus::Active.to_string(), "active");
        assert_eq!(LockStatus::UnlockRequested.to_string(), "unlock_requested");
        assert_eq!(LockStatus::Released.to_string(), "released");
    }
}
