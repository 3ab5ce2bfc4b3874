//! Everything one visualizer instance needs: both trees, the history that keeps them in step,
//! the layout settings and the playback of the last trace.
//!
//! ```
//! use treeviz::{Session, Variant};
//!
//! let mut session = Session::default();
//! session.insert(10).unwrap();
//! // The insert trace is still playing; finish it before the next operation.
//! while session.playback_mut().step_forward().is_some() {}
//!
//! session.set_variant(Variant::Avl);
//! assert_eq!(session.tree().values(), vec![10]);
//! ```

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::avl::Avl;
use crate::bst::Bst;
use crate::command::Command;
use crate::config::{Config, RandomConfig};
use crate::history::{History, Variant};
use crate::layout::{layout, Canvas, LayoutConfig};
use crate::node::Value;
use crate::playback::Playback;
use crate::step::Step;
use crate::tree::{Order, SearchTree, Tree};
use crate::{Error, Result};

/// A BST and an AVL tree holding the same keys, one of them on screen.
#[derive(Clone, Debug)]
pub struct Session {
    bst: Bst,
    avl: Avl,
    variant: Variant,
    history: History,
    playback: Playback,
    canvas: Canvas,
    layout: LayoutConfig,
    random: RandomConfig,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::build(Config::default())
    }
}

impl Session {
    /// Validates `config` and starts an empty session with it.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: Config) -> Self {
        Self {
            bst: Bst::new(),
            avl: Avl::new(),
            variant: config.variant,
            history: History::new(),
            playback: Playback::new(config.playback.speed),
            canvas: config.canvas,
            layout: config.layout,
            random: config.random,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Makes [`Command::Random`] reproducible.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn active(&self) -> &dyn SearchTree {
        match self.variant {
            Variant::Bst => &self.bst,
            Variant::Avl => &self.avl,
        }
    }

    fn active_mut(&mut self) -> &mut dyn SearchTree {
        match self.variant {
            Variant::Bst => &mut self.bst,
            Variant::Avl => &mut self.avl,
        }
    }

    /// The tree currently on screen, with positions from the last layout.
    pub fn tree(&self) -> &Tree {
        self.active().tree()
    }

    /// Which variant is on screen.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Keys currently held, in first-insert order.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Playback of the last trace.
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Playback of the last trace, for stepping and speed changes.
    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    /// The canvas layout is computed for.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn ensure_idle(&self, operation: &str) -> Result<()> {
        if self.playback.is_busy() {
            log::warn!(
                "rejected {operation}: {} steps still playing",
                self.playback.remaining()
            );
            return Err(Error::Busy);
        }
        Ok(())
    }

    fn relayout(&mut self) {
        let tree = match self.variant {
            Variant::Bst => self.bst.tree_mut(),
            Variant::Avl => self.avl.tree_mut(),
        };
        layout(tree, self.canvas, &self.layout);
    }

    fn play(&mut self, steps: Vec<Step>) -> &[Step] {
        self.playback.load(steps);
        self.playback.steps()
    }

    /// Inserts `value` into the active tree and starts playing the trace.
    pub fn insert(&mut self, value: Value) -> Result<&[Step]> {
        self.ensure_idle("insert")?;
        let steps = self.active_mut().insert(value);
        self.history.record_insert(value);
        self.relayout();
        log::debug!("{} insert {value}: {} steps", self.variant, steps.len());
        Ok(self.play(steps))
    }

    /// Deletes `value` from the active tree and starts playing the trace.
    pub fn delete(&mut self, value: Value) -> Result<&[Step]> {
        self.ensure_idle("delete")?;
        let steps = self.active_mut().delete(value);
        self.history.record_delete(value);
        self.relayout();
        log::debug!("{} delete {value}: {} steps", self.variant, steps.len());
        Ok(self.play(steps))
    }

    /// Searches the active tree for `value`.
    pub fn search(&mut self, value: Value) -> Result<&[Step]> {
        self.ensure_idle("search")?;
        let steps = self.active().search(value);
        Ok(self.play(steps))
    }

    /// Walks to the smallest key.
    pub fn find_min(&mut self) -> Result<&[Step]> {
        self.ensure_idle("find_min")?;
        let steps = self.active().find_min();
        self.playback.load(steps);
        self.playback.announce("Finding Minimum...");
        Ok(self.playback.steps())
    }

    /// Walks to the largest key.
    pub fn find_max(&mut self) -> Result<&[Step]> {
        self.ensure_idle("find_max")?;
        let steps = self.active().find_max();
        self.playback.load(steps);
        self.playback.announce("Finding Maximum...");
        Ok(self.playback.steps())
    }

    /// Visits every node in `order`.
    pub fn traverse(&mut self, order: Order) -> Result<&[Step]> {
        self.ensure_idle("traverse")?;
        let steps = self.active().traverse(order);
        self.playback.load(steps);
        self.playback.announce(format!("Starting {order} traversal..."));
        Ok(self.playback.steps())
    }

    /// Stops playback, empties the active tree and forgets the history. Allowed at any time.
    ///
    /// The returned `[reset]` trace is applied right away, so the session is idle afterwards and
    /// the markers read "Tree cleared".
    pub fn reset(&mut self) -> &[Step] {
        self.playback.stop();
        self.active_mut().clear();
        self.history.clear();
        self.relayout();
        log::info!("{} tree cleared", self.variant);
        self.playback.load(vec![Step::Reset]);
        self.playback.step_forward();
        self.playback.steps()
    }

    /// Shows `variant`, rebuilding it from the history. Allowed at any time; switching to the
    /// variant already shown does nothing.
    pub fn set_variant(&mut self, variant: Variant) {
        if variant == self.variant {
            return;
        }
        self.playback.stop();
        self.variant = variant;
        let history = &self.history;
        match variant {
            Variant::Bst => history.replay_into(&mut self.bst),
            Variant::Avl => history.replay_into(&mut self.avl),
        }
        self.relayout();
        self.playback.announce(format!("Switched to {variant}"));
        log::info!("switched to {variant} with {} keys", self.history.len());
    }

    /// Replaces the active tree with a random one. The number of keys is drawn from `count`, the
    /// keys themselves are distinct and come from the configured value range. Nothing is played
    /// back.
    pub fn generate_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: RangeInclusive<usize>,
    ) -> Result<Vec<Value>> {
        self.ensure_idle("random")?;
        let keys = draw_keys(rng, count, self.random.value_range())?;
        self.fill(&keys);
        Ok(keys)
    }

    fn fill(&mut self, keys: &[Value]) {
        self.playback.stop();
        self.active_mut().clear();
        self.history.clear();
        for key in keys {
            self.active_mut().insert(*key);
            self.history.record_insert(*key);
        }
        self.relayout();
        self.playback
            .announce(format!("Generated Random Tree with {} nodes", keys.len()));
        log::info!("{} tree generated from {keys:?}", self.variant);
    }

    /// Lays the active tree out again for a new canvas size.
    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        self.relayout();
    }

    /// Runs one parsed command. `random` and variant switches play nothing and return no steps.
    pub fn execute(&mut self, command: Command) -> Result<&[Step]> {
        match command {
            Command::Insert(value) => self.insert(value),
            Command::Delete(value) => self.delete(value),
            Command::Search(value) => self.search(value),
            Command::Min => self.find_min(),
            Command::Max => self.find_max(),
            Command::Traverse(order) => self.traverse(order),
            Command::Reset => Ok(self.reset()),
            Command::Random => {
                self.ensure_idle("random")?;
                let keys = draw_keys(
                    &mut self.rng,
                    self.random.count_range(),
                    self.random.value_range(),
                )?;
                self.fill(&keys);
                Ok(&[])
            }
            Command::Switch(variant) => {
                self.set_variant(variant);
                Ok(&[])
            }
        }
    }
}

/// Picks a count from `count`, then that many distinct keys from `values`.
fn draw_keys<R: Rng + ?Sized>(
    rng: &mut R,
    count: RangeInclusive<usize>,
    values: RangeInclusive<Value>,
) -> Result<Vec<Value>> {
    let (min, max) = (*values.start(), *values.end());
    if count.is_empty() || values.is_empty() {
        return Err(Error::InvalidConfig(format!(
            "cannot draw {count:?} keys from {values:?}"
        )));
    }
    let count = rng.random_range(count);
    let available = i128::from(max) - i128::from(min) + 1;
    if count as i128 > available {
        return Err(Error::KeySpace { count, min, max });
    }

    let mut keys = History::new();
    while keys.len() < count {
        keys.record_insert(rng.random_range(values.clone()));
    }
    Ok(keys.keys().to_vec())
}
