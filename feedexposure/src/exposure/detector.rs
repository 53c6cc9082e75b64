//! Per-item stage state machine.
//!
//! The detector remembers the last stage it reported for every id it has
//! ever seen and turns each sampling pass into the list of transitions
//! since the previous pass.
//!
//! # State Machine
//!
//! ```text
//!             ratio > 0                  stage changes
//!   (unseen) ───────────► ENTER/HALF/FULL ◄────────────► ENTER/HALF/FULL
//!                               │   ▲
//!      ratio == 0 while attached│   │ ratio > 0
//!      or no longer attached    ▼   │
//!                               EXIT
//! ```
//!
//! Entries are never removed: an id that leaves keeps its EXIT entry, so a
//! later re-entry is reported as a transition away from EXIT.

use std::collections::HashMap;

use super::classifier::classify;
use super::model::{ExposureItem, ExposureStage};
use crate::geometry::VisibilitySample;

/// A stage change detected during one sampling pass.
#[derive(Debug)]
pub enum Transition<'a, I> {
    /// An attached item moved to a new stage.
    Attached {
        item: &'a I,
        id: &'a str,
        stage: ExposureStage,
    },
    /// A previously visible item is no longer attached at all.
    Disappeared { id: String },
}

impl<I> Transition<'_, I> {
    /// Id of the item that transitioned.
    pub fn id(&self) -> &str {
        match self {
            Transition::Attached { id, .. } => *id,
            Transition::Disappeared { id } => id.as_str(),
        }
    }

    /// Stage the item transitioned to.
    pub fn stage(&self) -> ExposureStage {
        match self {
            Transition::Attached { stage, .. } => *stage,
            Transition::Disappeared { .. } => ExposureStage::Exit,
        }
    }
}

/// Remembers the last reported stage per id and diffs passes against it.
///
/// Not synchronised: a detector belongs to exactly one caller, which the
/// `&mut self` receivers enforce.
#[derive(Debug, Default)]
pub struct TransitionDetector {
    stages: HashMap<String, ExposureStage>,
}

impl TransitionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff a sampling pass against the stored stages.
    ///
    /// Attached items are reported first, in sample order, followed by
    /// disappearances sorted by id. Each id appears at most once, and an id
    /// already at EXIT is never reported as exiting again.
    pub fn detect<'a, I: ExposureItem>(
        &mut self,
        sample: &VisibilitySample<'a, I>,
    ) -> Vec<Transition<'a, I>> {
        let mut transitions = Vec::new();

        for entry in sample.entries() {
            let stage = classify(entry.ratio);

            match self.stages.get(entry.id) {
                Some(previous) if *previous == stage => continue,
                // Never been visible, so there is nothing to exit from.
                None if stage == ExposureStage::Exit => continue,
                _ => {}
            }

            self.stages.insert(entry.id.to_string(), stage);
            transitions.push(Transition::Attached {
                item: entry.item,
                id: entry.id,
                stage,
            });
        }

        let mut gone: Vec<String> = self
            .stages
            .iter()
            .filter(|(id, stage)| stage.is_visible() && !sample.contains(id.as_str()))
            .map(|(id, _)| id.clone())
            .collect();
        gone.sort_unstable();

        for id in gone {
            self.stages.insert(id.clone(), ExposureStage::Exit);
            transitions.push(Transition::Disappeared { id });
        }

        transitions
    }

    /// Last reported stage for `id`, `None` if it has never transitioned.
    pub fn stage_of(&self, id: &str) -> Option<ExposureStage> {
        self.stages.get(id).copied()
    }

    /// Number of ids with stored state (including those at EXIT).
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Ids currently at a visible stage.
    pub fn visible_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .stages
            .iter()
            .filter(|(_, stage)| stage.is_visible())
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Forget every stored stage.
    ///
    /// The next pass reports all visible items as fresh entries and emits
    /// no EXIT for items that were visible before the reset.
    pub fn clear(&mut self) {
        self.stages.clear();
    }
}
