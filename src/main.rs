//! Sky Hop headless demo
//!
//! Plays a few unattended runs with a simple autopilot, submits each final
//! score through the ledger bridge, then rebuilds the session leaderboard
//! from the (decrypted) ledger history. Rendering is a separate frontend;
//! this binary exercises the whole core without one.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use sky_hop::consts::*;
use sky_hop::ledger::{
    LedgerError, MemoryLedger, PlayerId, ScoreCipher, ScoreProof, SealedScore, SubmissionBridge,
};
use sky_hop::runner::{GameLoop, InputSource, Pulse};
use sky_hop::sim::{RunOutcome, Snapshot, TickInput};
use sky_hop::{HighScores, Tuning};

/// Steers toward the nearest landable platform
///
/// Holds a key while the character is off the target platform's center;
/// lets go inside a small deadzone so it doesn't jitter.
#[derive(Default)]
struct AutoPilot {
    held: TickInput,
}

impl InputSource for AutoPilot {
    fn sample(&mut self) -> TickInput {
        self.held
    }

    fn observe(&mut self, snapshot: &Snapshot) {
        // Aim for the closest platform at or below the character while
        // falling, the closest one above while rising
        let player_y = snapshot.player.y;
        let target = if snapshot.rising {
            snapshot
                .platforms
                .iter()
                .filter(|p| p.y <= player_y)
                .min_by(|a, b| (player_y - a.y).total_cmp(&(player_y - b.y)))
        } else {
            snapshot
                .platforms
                .iter()
                .filter(|p| p.y >= player_y - 1.0)
                .min_by(|a, b| (a.y - player_y).total_cmp(&(b.y - player_y)))
        };

        self.held = TickInput::default();
        if let Some(platform) = target {
            let target_x = platform.x + PLATFORM_WIDTH / 2.0 - PLAYER_SIZE / 2.0;
            let diff = target_x - snapshot.player.x;
            if diff > 4.0 {
                self.held.right = true;
            } else if diff < -4.0 {
                self.held.left = true;
            }
        }
    }
}

/// Reversible stand-in for the external encryption collaborator
struct DemoCipher {
    key: u8,
}

impl ScoreCipher for DemoCipher {
    fn encrypt(&self, score: u64) -> Result<(SealedScore, ScoreProof), LedgerError> {
        let sealed: Vec<u8> = score.to_le_bytes().iter().map(|b| b ^ self.key).collect();
        let checksum = sealed.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        Ok((SealedScore(sealed), ScoreProof(vec![checksum])))
    }

    fn decrypt(&self, sealed: &SealedScore) -> Result<u64, LedgerError> {
        let bytes: Vec<u8> = sealed.0.iter().map(|b| b ^ self.key).collect();
        let arr: [u8; 8] = bytes
            .try_into()
            .map_err(|_| LedgerError::Encryption("malformed handle".into()))?;
        Ok(u64::from_le_bytes(arr))
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Drive one run to completion, bailing out at the deadline
fn play_run(game: &mut GameLoop, seed: u64, max_duration: Duration) -> Option<RunOutcome> {
    let token = game.start(seed);
    let mut pilot = AutoPilot::default();
    let deadline = Instant::now() + max_duration;
    let period = Duration::from_millis(TICK_MS);
    let mut last = Instant::now();

    loop {
        std::thread::sleep(period);
        let now = Instant::now();
        match game.advance(token, now - last, &mut pilot) {
            Pulse::Ended(outcome) => return Some(outcome),
            Pulse::Stale => return None,
            Pulse::Running => {}
        }
        last = now;
        if now >= deadline {
            log::info!("demo deadline reached, stopping the run");
            game.stop();
            return None;
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Sky Hop demo starting");

    let mut game = GameLoop::new(Tuning::default());
    let mut bridge = SubmissionBridge::new(DemoCipher { key: 0x5a }, MemoryLedger::default());
    bridge.connect(PlayerId("local-player".into()));

    for run in 0..3u64 {
        let seed = now_ms() ^ run;
        let Some(outcome) = play_run(&mut game, seed, Duration::from_secs(60)) else {
            continue;
        };
        println!(
            "run {}: score {} after {} ticks",
            run + 1,
            outcome.score,
            outcome.ticks
        );
        if let Err(err) = bridge.submit(&outcome) {
            log::warn!("submission failed: {err}");
        }
    }

    // Rebuild the leaderboard from what the ledger actually recorded
    let mut board = HighScores::new();
    match bridge.fetch_history() {
        Ok(handles) => {
            for handle in &handles {
                match bridge.cipher().decrypt(handle) {
                    Ok(score) => {
                        board.add_score(score, now_ms());
                    }
                    Err(err) => log::warn!("could not decrypt a history entry: {err}"),
                }
            }
        }
        Err(err) => log::warn!("history fetch failed: {err}"),
    }

    if board.is_empty() {
        println!("no scores recorded");
    } else {
        println!("session leaderboard:");
        for (rank, entry) in board.entries.iter().enumerate() {
            println!("  {}. {}", rank + 1, entry.score);
        }
    }
}
