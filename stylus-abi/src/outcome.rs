use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Raw outcome byte returned by the engine.
///
/// Kept as a transparent `u8` rather than an enum so codes the engine adds
/// later still pass through untouched.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct OutcomeCode(pub u8);

impl OutcomeCode {
    pub const SUCCESS: Self = Self(UserOutcomeKind::Success as u8);
    pub const REVERT: Self = Self(UserOutcomeKind::Revert as u8);
    pub const FAILURE: Self = Self(UserOutcomeKind::Failure as u8);
    pub const OUT_OF_INK: Self = Self(UserOutcomeKind::OutOfInk as u8);
    pub const OUT_OF_STACK: Self = Self(UserOutcomeKind::OutOfStack as u8);

    pub fn kind(self) -> Option<UserOutcomeKind> {
        UserOutcomeKind::try_from(self.0).ok()
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

impl From<UserOutcomeKind> for OutcomeCode {
    fn from(kind: UserOutcomeKind) -> Self {
        Self(kind as u8)
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => fmt::Display::fmt(&kind, f),
            None => write!(f, "unknown({})", self.0),
        }
    }
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserOutcomeKind {
    Success = 0,
    Revert = 1,
    Failure = 2,
    OutOfInk = 3,
    OutOfStack = 4,
}

impl UserOutcomeKind {
    pub const ALL: [UserOutcomeKind; 5] = [
        UserOutcomeKind::Success,
        UserOutcomeKind::Revert,
        UserOutcomeKind::Failure,
        UserOutcomeKind::OutOfInk,
        UserOutcomeKind::OutOfStack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UserOutcomeKind::Success => "success",
            UserOutcomeKind::Revert => "revert",
            UserOutcomeKind::Failure => "failure",
            UserOutcomeKind::OutOfInk => "out_of_ink",
            UserOutcomeKind::OutOfStack => "out_of_stack",
        }
    }
}

impl fmt::Display for UserOutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown outcome code {0}")]
pub struct UnknownOutcome(pub u8);

impl TryFrom<u8> for UserOutcomeKind {
    type Error = UnknownOutcome;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| *kind as u8 == code)
            .ok_or(UnknownOutcome(code))
    }
}
