//! Step-up (re-authentication) state.
//!
//! # State Machine
//!
//! ```text
//!                 open_challenge()
//!   Unchallenged ──────────────────► Challenged ─────────┐
//!        ▲                            │    ▲             │ begin_verification(secret)
//!        │         cancel()           │    │ rejected /  ▼
//!        └────────────────────────────┘    │ timed out   Challenged (in flight)
//!                                          └─────────────┤
//!                                                        │ accepted
//!                                                        ▼
//!                                                     Verified  (terminal for the session)
//! ```
//!
//! `Verified` is the only source of the session's legal-access flag. It is
//! never derived from role: even Admin must step up once per session.
//!
//! Verification itself is asynchronous and lives in the runtime. This type
//! only records whether one is in flight, so that a second submission can be
//! rejected and a late answer can be matched against the challenge it
//! belongs to.

use crate::AuthError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one opened challenge.
///
/// A verification result is applied only if the challenge it was started
/// for is still the open one. Results for a cancelled, replaced or logged-out
/// challenge are discarded.
pub type ChallengeId = Uuid;

/// Per-session step-up state.
///
/// # Example
///
/// ```
/// use portal_auth::{AuthError, StepUpState};
///
/// let mut state = StepUpState::default();
/// assert!(state.open_challenge());
///
/// let id = state.begin_verification("hunter2").unwrap();
/// // Second submission while the first is pending
/// assert_eq!(state.begin_verification("again"), Err(AuthError::VerificationInFlight));
///
/// state.finish_verification(id, true).unwrap();
/// assert!(state.is_verified());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepUpState {
    /// No challenge open. Initial state of every session.
    #[default]
    Unchallenged,
    /// Challenge dialog open, awaiting a secret.
    Challenged {
        /// Identity of this challenge.
        id: ChallengeId,
        /// A verification call is pending.
        in_flight: bool,
    },
    /// Re-authenticated. Persists until logout.
    Verified,
}

/// Coarse phase, for snapshots and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepUpPhase {
    /// No challenge open.
    Unchallenged,
    /// Challenge open, waiting for input.
    Challenged,
    /// Challenge open, verification pending.
    Verifying,
    /// Re-authenticated.
    Verified,
}

impl StepUpState {
    /// Returns the coarse phase.
    #[must_use]
    pub fn phase(&self) -> StepUpPhase {
        match self {
            Self::Unchallenged => StepUpPhase::Unchallenged,
            Self::Challenged {
                in_flight: false, ..
            } => StepUpPhase::Challenged,
            Self::Challenged { in_flight: true, .. } => StepUpPhase::Verifying,
            Self::Verified => StepUpPhase::Verified,
        }
    }

    /// Returns `true` once the session has stepped up.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Returns `true` while a challenge is open (pending or not).
    #[must_use]
    pub fn is_challenged(&self) -> bool {
        matches!(self, Self::Challenged { .. })
    }

    /// Returns `true` while a verification call is pending.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Challenged { in_flight: true, .. })
    }

    /// Opens a challenge if none is open.
    ///
    /// Returns `true` if a challenge is open afterwards. An already open
    /// challenge is kept as is. Returns `false` when already verified, in
    /// which case no challenge is needed.
    pub fn open_challenge(&mut self) -> bool {
        match self {
            Self::Unchallenged => {
                *self = Self::Challenged {
                    id: Uuid::new_v4(),
                    in_flight: false,
                };
                true
            }
            Self::Challenged { .. } => true,
            Self::Verified => false,
        }
    }

    /// Marks a verification as started and returns the challenge it belongs to.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NoChallenge`] if no challenge is open
    /// - [`AuthError::VerificationInFlight`] if one is already pending
    /// - [`AuthError::InvalidSecret`] if the secret is blank; no verification
    ///   is started and the challenge stays open
    pub fn begin_verification(&mut self, secret: &str) -> Result<ChallengeId, AuthError> {
        match self {
            Self::Challenged {
                in_flight: true, ..
            } => Err(AuthError::VerificationInFlight),
            Self::Challenged { .. } if secret.trim().is_empty() => Err(AuthError::InvalidSecret),
            Self::Challenged { id, in_flight } => {
                *in_flight = true;
                Ok(*id)
            }
            Self::Unchallenged | Self::Verified => Err(AuthError::NoChallenge),
        }
    }

    /// Applies the result of a verification started by
    /// [`begin_verification`](Self::begin_verification).
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidSecret`] if rejected; the challenge stays open
    ///   and accepts a new submission
    /// - [`AuthError::NoChallenge`] if `challenge` is no longer the open,
    ///   pending challenge; the state is left untouched
    pub fn finish_verification(
        &mut self,
        challenge: ChallengeId,
        accepted: bool,
    ) -> Result<(), AuthError> {
        match self {
            Self::Challenged { id, in_flight } if *id == challenge && *in_flight => {
                if accepted {
                    *self = Self::Verified;
                    Ok(())
                } else {
                    *in_flight = false;
                    Err(AuthError::InvalidSecret)
                }
            }
            _ => Err(AuthError::NoChallenge),
        }
    }

    /// Clears the in-flight marker without a verdict (timeout, provider error).
    ///
    /// Returns `true` if the marker belonged to `challenge` and was cleared.
    pub fn abort_verification(&mut self, challenge: ChallengeId) -> bool {
        match self {
            Self::Challenged { id, in_flight } if *id == challenge && *in_flight => {
                *in_flight = false;
                true
            }
            _ => false,
        }
    }

    /// Closes an open challenge.
    ///
    /// # Errors
    ///
    /// - [`AuthError::VerificationInFlight`] while a verification is pending
    /// - [`AuthError::NoChallenge`] if no challenge is open
    pub fn cancel(&mut self) -> Result<(), AuthError> {
        match self {
            Self::Challenged {
                in_flight: true, ..
            } => Err(AuthError::VerificationInFlight),
            Self::Challenged { .. } => {
                *self = Self::Unchallenged;
                Ok(())
            }
            Self::Unchallenged | Self::Verified => Err(AuthError::NoChallenge),
        }
    }
}
