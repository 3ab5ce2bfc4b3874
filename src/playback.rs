//! Replays a trace one step at a time.
//!
//! `Playback` owns no timer. Whoever drives it calls [`Playback::step_forward`] every
//! [`Playback::interval`] while [`Playback::is_playing`] is true, and pausing is simply not
//! calling it. Each applied step updates the [`Markers`] a renderer draws from.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::node::NodeId;
use crate::step::Step;
use crate::{Error, Result};

/// Playback speed, from 1 (one step per second) to 5 (five steps per second).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    /// The slowest speed.
    pub const MIN: Speed = Speed(1);
    /// The fastest speed.
    pub const MAX: Speed = Speed(5);

    /// Checks that `level` is in `1..=5`.
    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(Error::InvalidSpeed(level))
        }
    }

    /// The speed level.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Time between two steps: `1000ms / level`.
    pub fn interval(self) -> Duration {
        Duration::from_millis(1000) / u32::from(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Speed {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

/// What a renderer should emphasize after the steps applied so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Markers {
    /// The node currently being looked at.
    pub highlighted: Option<NodeId>,
    /// The most recently found node.
    pub found: Option<NodeId>,
    /// Every visited node, in visit order. May repeat.
    pub visited: Vec<NodeId>,
    /// Human readable description of the last step.
    pub message: String,
}

impl Markers {
    fn apply(&mut self, step: &Step) {
        match step {
            Step::Visit { node_id, .. } => {
                self.highlighted = Some(*node_id);
                self.visited.push(*node_id);
            }
            Step::Found { node_id, .. } => {
                self.highlighted = None;
                self.found = Some(*node_id);
            }
            Step::Insert { node_id, .. } => {
                self.highlighted = Some(*node_id);
            }
            Step::NotFound { .. } | Step::Delete { .. } => {}
            Step::Reset => {
                *self = Self::default();
            }
        }
        self.message = step.to_string();
    }
}

/// Playback state for one trace.
#[derive(Clone, Debug, Default)]
pub struct Playback {
    steps: Vec<Step>,
    index: usize,
    playing: bool,
    speed: Speed,
    markers: Markers,
}

impl Playback {
    /// An idle playback with nothing loaded.
    pub fn new(speed: Speed) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// Replaces the trace, clears the markers and starts playing from the first step.
    pub fn load(&mut self, steps: Vec<Step>) {
        log::trace!("loaded {} steps", steps.len());
        self.steps = steps;
        self.index = 0;
        self.playing = true;
        self.markers = Markers {
            message: "Starting...".to_string(),
            ..Markers::default()
        };
    }

    /// Replaces the status message until the next step is applied.
    pub fn announce(&mut self, message: impl Into<String>) {
        self.markers.message = message.into();
    }

    /// Applies the next step and returns it. Past the end this stops playing and returns `None`.
    pub fn step_forward(&mut self) -> Option<&Step> {
        let Some(step) = self.steps.get(self.index) else {
            self.playing = false;
            self.markers.message = "Finished".to_string();
            return None;
        };
        self.markers.apply(step);
        self.index += 1;
        Some(step)
    }

    /// Resumes automatic stepping.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Suspends automatic stepping. Manual [`step_forward`](Self::step_forward) still works.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Flips between playing and paused.
    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Drops the trace and the markers, keeping the speed.
    pub fn stop(&mut self) {
        *self = Self::new(self.speed);
    }

    /// Changes the speed, rejecting levels outside `1..=5`.
    pub fn set_speed(&mut self, level: u8) -> Result<()> {
        self.speed = Speed::new(level)?;
        Ok(())
    }

    /// The current speed.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// How long to wait between steps at the current speed.
    pub fn interval(&self) -> Duration {
        self.speed.interval()
    }

    /// Whether automatic stepping is on.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether every step of the trace has been applied.
    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Whether a trace is mid-playback. New operations must wait until this is false.
    pub fn is_busy(&self) -> bool {
        self.playing && !self.is_finished()
    }

    /// Steps not applied yet.
    pub fn remaining(&self) -> usize {
        self.steps.len() - self.index
    }

    /// Index of the next step to apply.
    pub fn position(&self) -> usize {
        self.index
    }

    /// The whole loaded trace.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Markers after the steps applied so far.
    pub fn markers(&self) -> &Markers {
        &self.markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bst, SearchTree};

    #[test]
    fn speed_bounds() {
        assert!(Speed::new(0).is_err());
        assert!(Speed::new(6).is_err());
        assert_eq!(Speed::new(1).unwrap().interval(), Duration::from_millis(1000));
        assert_eq!(Speed::new(4).unwrap().interval(), Duration::from_millis(250));
        assert_eq!(Speed::default().get(), 3);
    }

    #[test]
    fn speed_deserializes_with_validation() {
        let speed: Speed = serde_json::from_str("5").unwrap();
        assert_eq!(speed, Speed::MAX);
        assert!(serde_json::from_str::<Speed>("9").is_err());
    }

    #[test]
    fn markers_follow_a_search() {
        let mut bst = Bst::new();
        for value in [10, 5, 15] {
            bst.insert(value);
        }
        let root = bst.tree().root().unwrap();
        let five = bst.tree().node(root).unwrap().left().unwrap();

        let mut playback = Playback::default();
        playback.load(bst.search(5));
        assert!(playback.is_busy());
        assert_eq!(playback.markers().message, "Starting...");
        assert_eq!(playback.remaining(), 3);

        playback.step_forward();
        assert_eq!(playback.markers().highlighted, Some(root));
        assert_eq!(playback.markers().message, "Visiting node 10");

        playback.step_forward();
        assert_eq!(playback.markers().highlighted, Some(five));

        playback.step_forward();
        assert_eq!(playback.markers().highlighted, None);
        assert_eq!(playback.markers().found, Some(five));
        assert_eq!(playback.markers().visited, vec![root, five]);
        assert_eq!(playback.markers().message, "Found node 5!");

        assert!(playback.is_finished());
        assert!(playback.is_playing());
        assert!(!playback.is_busy());

        assert!(playback.step_forward().is_none());
        assert!(!playback.is_playing());
        assert_eq!(playback.markers().message, "Finished");
    }

    #[test]
    fn insert_highlights_the_new_node_and_reset_clears() {
        let mut bst = Bst::new();
        let mut playback = Playback::default();

        let steps = bst.insert(1);
        let id = steps[0].node_id();
        playback.load(steps);
        playback.step_forward();
        assert_eq!(playback.markers().highlighted, id);
        assert_eq!(playback.markers().message, "Inserted 1");

        playback.load(vec![Step::Reset]);
        playback.step_forward();
        assert_eq!(playback.markers().highlighted, None);
        assert_eq!(playback.markers().message, "Tree cleared");
    }

    #[test]
    fn pause_and_stop() {
        let mut playback = Playback::new(Speed::MAX);
        playback.load(vec![Step::Reset, Step::Reset]);

        playback.pause();
        assert!(!playback.is_busy());
        playback.toggle();
        assert!(playback.is_busy());

        playback.stop();
        assert!(playback.steps().is_empty());
        assert!(!playback.is_playing());
        assert_eq!(playback.speed(), Speed::MAX);
        assert_eq!(playback.position(), 0);
    }

    #[test]
    fn announce_lasts_until_the_next_step() {
        let mut playback = Playback::default();
        playback.load(vec![Step::Reset]);
        playback.announce("Finding Minimum...");
        assert_eq!(playback.markers().message, "Finding Minimum...");

        playback.step_forward();
        assert_eq!(playback.markers().message, "Tree cleared");

        playback.stop();
        playback.announce("Switched to AVL");
        assert_eq!(playback.markers().message, "Switched to AVL");
        assert!(!playback.is_busy());
    }

    #[test]
    fn set_speed_rejects_out_of_range() {
        let mut playback = Playback::default();
        assert!(matches!(playback.set_speed(7), Err(Error::InvalidSpeed(7))));
        playback.set_speed(2).unwrap();
        assert_eq!(playback.interval(), Duration::from_millis(500));
    }
}
