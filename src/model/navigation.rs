//! Carousel position tracking and engine reconciliation
//!
//! The position logic is kept free of the playback engine and the UI: every
//! operation is a pure function from the current position and the fetched
//! sets to an optional step. Callers apply the step to the model and issue
//! whatever engine command it implies.

use super::types::Set;

/// Direction the carousel slides when the selection moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Pointer into the two-level set/track structure.
///
/// Whenever sets are loaded and non-empty, `set_index` addresses a real set
/// and `track_index` a real track inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NavPosition {
    pub set_index: usize,
    pub track_index: usize,
}

/// A position change plus the carousel motion it implies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavStep {
    pub position: NavPosition,
    pub scroll: Option<ScrollDirection>,
}

impl NavPosition {
    pub fn new(set_index: usize, track_index: usize) -> Self {
        Self { set_index, track_index }
    }

    fn current_set<'a>(&self, sets: &'a [Set]) -> Option<&'a Set> {
        sets.get(self.set_index).filter(|s| !s.tracks.is_empty())
    }

    /// Advance one track, spilling into the next set past the last track.
    /// At the last track of the last set this is a no-op.
    pub fn next_track(&self, sets: &[Set]) -> Option<NavStep> {
        let set = self.current_set(sets)?;
        if self.track_index + 1 < set.tracks.len() {
            return Some(NavStep {
                position: NavPosition::new(self.set_index, self.track_index + 1),
                scroll: None,
            });
        }
        let next = self.set_index + 1;
        if next >= sets.len() || sets[next].tracks.is_empty() {
            return None;
        }
        Some(NavStep {
            position: NavPosition::new(next, 0),
            scroll: Some(ScrollDirection::Forward),
        })
    }

    /// Step one track back, moving to the previous set's last track from
    /// track 0. At the first track of the first set this is a no-op.
    pub fn prev_track(&self, sets: &[Set]) -> Option<NavStep> {
        self.current_set(sets)?;
        if self.track_index > 0 {
            return Some(NavStep {
                position: NavPosition::new(self.set_index, self.track_index - 1),
                scroll: None,
            });
        }
        if self.set_index == 0 {
            return None;
        }
        let prev = self.set_index - 1;
        let track_count = sets[prev].tracks.len();
        if track_count == 0 {
            return None;
        }
        Some(NavStep {
            position: NavPosition::new(prev, track_count - 1),
            scroll: Some(ScrollDirection::Backward),
        })
    }

    /// Select the next set from its first track.
    pub fn next_set(&self, sets: &[Set]) -> Option<NavStep> {
        if sets.is_empty() {
            return None;
        }
        let next = (self.set_index + 1).min(sets.len() - 1);
        if next == self.set_index || sets[next].tracks.is_empty() {
            return None;
        }
        Some(NavStep {
            position: NavPosition::new(next, 0),
            scroll: Some(ScrollDirection::Forward),
        })
    }

    /// Select the previous set from its first track.
    pub fn prev_set(&self, sets: &[Set]) -> Option<NavStep> {
        if self.set_index == 0 || sets.is_empty() {
            return None;
        }
        let prev = self.set_index - 1;
        if sets[prev].tracks.is_empty() {
            return None;
        }
        Some(NavStep {
            position: NavPosition::new(prev, 0),
            scroll: Some(ScrollDirection::Backward),
        })
    }

    /// Correct the selection after the engine reports what is audible.
    ///
    /// The engine is the source of truth for the playing track, the
    /// coordinator for navigation intent: a report from inside the selected
    /// set is left alone, while an unknown track means the engine ran past
    /// the set boundary on its own and the selection follows one set
    /// forward. Reports are never followed backward.
    pub fn reconcile(&self, playing_uri: &str, sets: &[Set]) -> Option<NavStep> {
        let set = self.current_set(sets)?;
        if set.tracks.iter().any(|t| t.uri == playing_uri) {
            return None;
        }
        self.next_set(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{Set, Track};

    fn track(uri: &str) -> Track {
        Track {
            id: format!("id-{uri}"),
            uri: uri.to_string(),
            name: uri.to_uppercase(),
            artist: "Artist".to_string(),
            liked: false,
            likes: 0,
            img_url: String::new(),
        }
    }

    fn set(id: &str, uris: &[&str]) -> Set {
        Set {
            id: id.to_string(),
            link: format!("spotify:playlist:{id}"),
            tracks: uris.iter().map(|u| track(u)).collect(),
            username: id.to_string(),
            profile_pic_url: String::new(),
        }
    }

    fn two_sets() -> Vec<Set> {
        vec![set("s0", &["a", "b"]), set("s1", &["c", "d", "e"])]
    }

    fn assert_in_bounds(pos: NavPosition, sets: &[Set]) {
        assert!(pos.set_index < sets.len());
        assert!(pos.track_index < sets[pos.set_index].tracks.len());
    }

    #[test]
    fn position_stays_in_bounds_over_any_sequence() {
        let sets = two_sets();
        let mut pos = NavPosition::default();
        let ops: [fn(&NavPosition, &[Set]) -> Option<NavStep>; 4] = [
            NavPosition::next_track,
            NavPosition::prev_track,
            NavPosition::next_set,
            NavPosition::prev_set,
        ];
        // Walk a long mixed sequence and check the invariant at every step.
        for i in 0..200 {
            if let Some(step) = ops[i * 7 % 4](&pos, &sets) {
                pos = step.position;
            }
            assert_in_bounds(pos, &sets);
        }
    }

    #[test]
    fn prev_track_at_origin_is_a_noop() {
        let sets = two_sets();
        let pos = NavPosition::new(0, 0);
        assert_eq!(pos.prev_track(&sets), None);
    }

    #[test]
    fn next_track_at_the_very_end_is_a_noop() {
        let sets = two_sets();
        let pos = NavPosition::new(1, 2);
        assert_eq!(pos.next_track(&sets), None);
    }

    #[test]
    fn next_track_crosses_set_boundary_with_forward_scroll() {
        let sets = two_sets();
        let step = NavPosition::new(0, 1).next_track(&sets).unwrap();
        assert_eq!(step.position, NavPosition::new(1, 0));
        assert_eq!(step.scroll, Some(ScrollDirection::Forward));
    }

    #[test]
    fn prev_track_enters_previous_set_at_its_last_track() {
        let sets = two_sets();
        let step = NavPosition::new(1, 0).prev_track(&sets).unwrap();
        assert_eq!(step.position, NavPosition::new(0, 1));
        assert_eq!(step.scroll, Some(ScrollDirection::Backward));
    }

    #[test]
    fn interior_next_then_prev_round_trips() {
        let sets = vec![set("s0", &["a", "b", "c"])];
        let start = NavPosition::new(0, 1);
        let forward = start.next_track(&sets).unwrap();
        assert_eq!(forward.scroll, None);
        let back = forward.position.prev_track(&sets).unwrap();
        assert_eq!(back.position, start);
    }

    #[test]
    fn full_walk_through_both_sets() {
        let sets = two_sets();
        let mut pos = NavPosition::new(0, 1);

        let step = pos.next_track(&sets).unwrap();
        assert_eq!(step.position, NavPosition::new(1, 0));
        assert_eq!(step.scroll, Some(ScrollDirection::Forward));
        pos = step.position;

        pos = pos.next_track(&sets).unwrap().position;
        pos = pos.next_track(&sets).unwrap().position;
        assert_eq!(pos, NavPosition::new(1, 2));

        assert_eq!(pos.next_track(&sets), None);
    }

    #[test]
    fn set_skips_clamp_at_both_ends() {
        let sets = two_sets();
        assert_eq!(NavPosition::new(1, 2).next_set(&sets), None);
        assert_eq!(NavPosition::new(0, 1).prev_set(&sets), None);

        let step = NavPosition::new(0, 1).next_set(&sets).unwrap();
        assert_eq!(step.position, NavPosition::new(1, 0));
    }

    #[test]
    fn reconcile_ignores_in_set_reports() {
        let sets = vec![set("s0", &["a", "b", "c"]), set("s1", &["d"])];
        let pos = NavPosition::new(0, 0);
        assert_eq!(pos.reconcile("b", &sets), None);
    }

    #[test]
    fn reconcile_follows_out_of_set_reports_one_set_forward() {
        let sets = vec![set("s0", &["a", "b", "c"]), set("s1", &["d"])];
        let pos = NavPosition::new(0, 2);
        let step = pos.reconcile("d", &sets).unwrap();
        assert_eq!(step.position, NavPosition::new(1, 0));
        assert_eq!(step.scroll, Some(ScrollDirection::Forward));
    }

    #[test]
    fn reconcile_at_the_last_set_stays_put() {
        let sets = two_sets();
        let pos = NavPosition::new(1, 1);
        assert_eq!(pos.reconcile("not-here", &sets), None);
    }

    #[test]
    fn everything_is_a_noop_without_sets() {
        let sets: Vec<Set> = Vec::new();
        let pos = NavPosition::default();
        assert_eq!(pos.next_track(&sets), None);
        assert_eq!(pos.prev_track(&sets), None);
        assert_eq!(pos.next_set(&sets), None);
        assert_eq!(pos.prev_set(&sets), None);
        assert_eq!(pos.reconcile("a", &sets), None);
    }
}
