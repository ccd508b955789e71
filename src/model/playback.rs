//! Playback-related types and state management

use std::time::Instant;

/// Metadata about the track the engine says is audible right now.
#[derive(Clone, Debug)]
pub struct NowPlaying {
    pub name: String,
    pub artist: String,
    pub uri: String,
    pub duration_ms: u32,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            name: "No track playing".to_string(),
            artist: String::new(),
            uri: String::new(),
            duration_ms: 0,
        }
    }
}

/// Internal timing state for smooth progress bar updates.
///
/// Engine notifications arrive at their own pace; between them the position
/// is extrapolated from the wall clock while playing.
#[derive(Clone)]
pub struct PlaybackTiming {
    pub position_ms: u32,
    pub last_update: Instant,
    pub is_playing: bool,
    pub duration_ms: u32,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_ms: 0,
            last_update: Instant::now(),
            is_playing: false,
            duration_ms: 0,
        }
    }
}

impl PlaybackTiming {
    pub fn current_position_ms(&self) -> u32 {
        if self.is_playing && self.duration_ms > 0 {
            let elapsed = self.last_update.elapsed().as_millis() as u32;
            self.position_ms.saturating_add(elapsed).min(self.duration_ms)
        } else {
            self.position_ms.min(self.duration_ms)
        }
    }

    /// Absorb an engine-reported position.
    ///
    /// A report slightly behind the extrapolated position while playback
    /// continues is just channel latency; rebasing on it would make the
    /// progress bar stutter backwards, so it is dropped. Pause/resume
    /// transitions and real jumps (seeks, track changes) always rebase.
    pub fn update_position(&mut self, reported_ms: u32, is_playing: bool) {
        let predicted = self.current_position_ms();
        let drift = reported_ms as i64 - predicted as i64;

        let stale = self.is_playing && is_playing && (-2000..-100).contains(&drift);
        if !stale {
            self.position_ms = reported_ms;
            self.last_update = Instant::now();
        }
        self.is_playing = is_playing;
    }
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub track: NowPlaying,
    pub progress_ms: u32,
    pub duration_ms: u32,
    pub is_playing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn position_is_frozen_while_paused() {
        let timing = PlaybackTiming {
            position_ms: 5_000,
            last_update: Instant::now() - Duration::from_secs(3),
            is_playing: false,
            duration_ms: 60_000,
        };
        assert_eq!(timing.current_position_ms(), 5_000);
    }

    #[test]
    fn position_advances_while_playing_and_clamps_at_duration() {
        let timing = PlaybackTiming {
            position_ms: 5_000,
            last_update: Instant::now() - Duration::from_secs(2),
            is_playing: true,
            duration_ms: 60_000,
        };
        assert!(timing.current_position_ms() >= 7_000);

        let near_end = PlaybackTiming {
            position_ms: 59_900,
            last_update: Instant::now() - Duration::from_secs(5),
            is_playing: true,
            duration_ms: 60_000,
        };
        assert_eq!(near_end.current_position_ms(), 60_000);
    }

    #[test]
    fn small_backward_report_is_ignored_while_playing() {
        let mut timing = PlaybackTiming {
            position_ms: 10_000,
            last_update: Instant::now(),
            is_playing: true,
            duration_ms: 60_000,
        };
        timing.update_position(9_500, true);
        // The stale report was dropped; the base position is unchanged.
        assert_eq!(timing.position_ms, 10_000);
    }

    #[test]
    fn pause_report_pins_the_reported_position() {
        let mut timing = PlaybackTiming {
            position_ms: 10_000,
            last_update: Instant::now(),
            is_playing: true,
            duration_ms: 60_000,
        };
        timing.update_position(12_345, false);
        assert!(!timing.is_playing);
        assert_eq!(timing.position_ms, 12_345);
        assert_eq!(timing.current_position_ms(), 12_345);
    }
}
