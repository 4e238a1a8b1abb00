//! Score submission bridge
//!
//! The simulation never touches the network or a key: encryption and the
//! append-only score ledger are external collaborators reached through the
//! trait seams below. Calls may block on network or proving latency, so the
//! bridge runs strictly outside the game loop; by the time `submit` starts,
//! the run outcome is already immutable.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::RunOutcome;

/// Opaque player identity understood by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encrypted score handle; the core never inspects the bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedScore(pub Vec<u8>);

/// Proof accompanying a sealed score, produced by the cipher collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreProof(pub Vec<u8>);

/// Failures surfaced by the bridge or its collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No player identity connected; the call was never attempted
    NotConnected,
    /// The cipher collaborator failed to seal or open a score
    Encryption(String),
    /// The ledger refused the submission
    Rejected(String),
    /// The collaborator could not be reached
    Transport(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "no player identity connected"),
            Self::Encryption(msg) => write!(f, "encryption failed: {msg}"),
            Self::Rejected(msg) => write!(f, "submission rejected: {msg}"),
            Self::Transport(msg) => write!(f, "collaborator unreachable: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Encryption/decryption collaborator
pub trait ScoreCipher {
    fn encrypt(&self, score: u64) -> Result<(SealedScore, ScoreProof), LedgerError>;
    fn decrypt(&self, sealed: &SealedScore) -> Result<u64, LedgerError>;
}

/// Append-only score store keyed by player identity
///
/// `history` must return handles in submission order.
pub trait ScoreLedger {
    fn submit_sealed(
        &mut self,
        player: &PlayerId,
        sealed: SealedScore,
        proof: ScoreProof,
    ) -> Result<(), LedgerError>;

    fn history(&self, player: &PlayerId) -> Result<Vec<SealedScore>, LedgerError>;
}

/// In-memory ledger satisfying the append-only contract; backs tests and the
/// offline demo
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: HashMap<PlayerId, Vec<SealedScore>>,
}

impl ScoreLedger for MemoryLedger {
    fn submit_sealed(
        &mut self,
        player: &PlayerId,
        sealed: SealedScore,
        _proof: ScoreProof,
    ) -> Result<(), LedgerError> {
        self.entries.entry(player.clone()).or_default().push(sealed);
        Ok(())
    }

    fn history(&self, player: &PlayerId) -> Result<Vec<SealedScore>, LedgerError> {
        Ok(self.entries.get(player).cloned().unwrap_or_default())
    }
}

/// Hands finalized scores to the collaborators and reads history back
///
/// Holds no retry policy: a failed submission is reported and the caller may
/// retry manually. A missing identity is a checked precondition, not a caught
/// failure.
pub struct SubmissionBridge<C, L> {
    cipher: C,
    ledger: L,
    player: Option<PlayerId>,
}

impl<C: ScoreCipher, L: ScoreLedger> SubmissionBridge<C, L> {
    pub fn new(cipher: C, ledger: L) -> Self {
        Self {
            cipher,
            ledger,
            player: None,
        }
    }

    /// Attach the player identity submissions are recorded under
    pub fn connect(&mut self, player: PlayerId) {
        log::info!("ledger bridge connected as {player}");
        self.player = Some(player);
    }

    pub fn disconnect(&mut self) {
        self.player = None;
    }

    pub fn is_connected(&self) -> bool {
        self.player.is_some()
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Seal and record one finished run's score; no internal retry
    pub fn submit(&mut self, outcome: &RunOutcome) -> Result<(), LedgerError> {
        let player = self.player.as_ref().ok_or(LedgerError::NotConnected)?;
        let (sealed, proof) = self.cipher.encrypt(outcome.score)?;
        self.ledger.submit_sealed(player, sealed, proof)?;
        log::info!("score {} submitted for {player}", outcome.score);
        Ok(())
    }

    /// Sealed entries for the connected identity, in submission order
    pub fn fetch_history(&self) -> Result<Vec<SealedScore>, LedgerError> {
        let player = self.player.as_ref().ok_or(LedgerError::NotConnected)?;
        self.ledger.history(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reversible byte-twiddling stand-in for the real cipher
    struct XorCipher(u8);

    impl ScoreCipher for XorCipher {
        fn encrypt(&self, score: u64) -> Result<(SealedScore, ScoreProof), LedgerError> {
            let bytes = score.to_le_bytes().iter().map(|b| b ^ self.0).collect();
            Ok((SealedScore(bytes), ScoreProof(vec![self.0])))
        }

        fn decrypt(&self, sealed: &SealedScore) -> Result<u64, LedgerError> {
            let bytes: Vec<u8> = sealed.0.iter().map(|b| b ^ self.0).collect();
            let arr: [u8; 8] = bytes
                .try_into()
                .map_err(|_| LedgerError::Encryption("malformed handle".into()))?;
            Ok(u64::from_le_bytes(arr))
        }
    }

    struct FailingCipher;

    impl ScoreCipher for FailingCipher {
        fn encrypt(&self, _score: u64) -> Result<(SealedScore, ScoreProof), LedgerError> {
            Err(LedgerError::Encryption("prover offline".into()))
        }

        fn decrypt(&self, _sealed: &SealedScore) -> Result<u64, LedgerError> {
            Err(LedgerError::Encryption("prover offline".into()))
        }
    }

    /// Ledger that refuses everything, counting attempts
    #[derive(Default)]
    struct RejectingLedger {
        attempts: u32,
    }

    impl ScoreLedger for RejectingLedger {
        fn submit_sealed(
            &mut self,
            _player: &PlayerId,
            _sealed: SealedScore,
            _proof: ScoreProof,
        ) -> Result<(), LedgerError> {
            self.attempts += 1;
            Err(LedgerError::Rejected("proof invalid".into()))
        }

        fn history(&self, _player: &PlayerId) -> Result<Vec<SealedScore>, LedgerError> {
            Err(LedgerError::Transport("node down".into()))
        }
    }

    fn outcome(score: u64) -> RunOutcome {
        RunOutcome { score, ticks: 100 }
    }

    #[test]
    fn test_history_preserves_submission_order() {
        let mut bridge = SubmissionBridge::new(XorCipher(0x5a), MemoryLedger::default());
        bridge.connect(PlayerId("alice".into()));

        for score in [30, 10, 70] {
            bridge.submit(&outcome(score)).unwrap();
        }

        let history = bridge.fetch_history().unwrap();
        let scores: Vec<u64> = history
            .iter()
            .map(|h| bridge.cipher().decrypt(h).unwrap())
            .collect();
        assert_eq!(scores, vec![30, 10, 70]);
    }

    #[test]
    fn test_disconnected_bridge_never_calls_out() {
        let mut bridge = SubmissionBridge::new(XorCipher(1), RejectingLedger::default());
        assert!(!bridge.is_connected());

        assert_eq!(bridge.submit(&outcome(5)), Err(LedgerError::NotConnected));
        assert_eq!(bridge.fetch_history(), Err(LedgerError::NotConnected));
        assert_eq!(bridge.ledger.attempts, 0);
    }

    #[test]
    fn test_encryption_failure_reaches_no_ledger() {
        let mut bridge = SubmissionBridge::new(FailingCipher, RejectingLedger::default());
        bridge.connect(PlayerId("bob".into()));

        let err = bridge.submit(&outcome(5)).unwrap_err();
        assert!(matches!(err, LedgerError::Encryption(_)));
        assert_eq!(bridge.ledger.attempts, 0);
    }

    #[test]
    fn test_rejection_is_reported_without_retry() {
        let mut bridge = SubmissionBridge::new(XorCipher(7), RejectingLedger::default());
        bridge.connect(PlayerId("bob".into()));

        let err = bridge.submit(&outcome(5)).unwrap_err();
        assert!(matches!(err, LedgerError::Rejected(_)));
        assert_eq!(bridge.ledger.attempts, 1);
    }

    #[test]
    fn test_histories_are_per_player() {
        let cipher = XorCipher(0x11);
        let mut ledger = MemoryLedger::default();
        let alice = PlayerId("alice".into());
        let bob = PlayerId("bob".into());

        let (sealed, proof) = cipher.encrypt(42).unwrap();
        ledger.submit_sealed(&alice, sealed, proof).unwrap();

        assert_eq!(ledger.history(&bob).unwrap(), vec![]);
        assert_eq!(ledger.history(&alice).unwrap().len(), 1);
    }
}
