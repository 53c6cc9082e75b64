//! Visible-fraction sampling for attached list items.
//!
//! A sampling pass is recomputed from scratch on every call. The number of
//! attached items is small (what fits on screen plus the recycler's
//! overscan), so there is no incremental geometry cache.

use std::collections::HashSet;

use tracing::debug;

use super::rect::Rect;

/// Geometric capability the sampler needs from an attached item.
///
/// Implemented by whatever representation the render surface uses for its
/// attached views; the sampler never sees concrete UI types.
pub trait Measurable {
    /// Stable identifier of the item, `None` when it cannot be resolved
    /// (e.g. a footer or a view whose adapter position is stale).
    fn exposure_id(&self) -> Option<&str>;

    /// On-screen bounds in viewport coordinates.
    fn bounds(&self) -> Rect;

    /// The item's own full height, not just the visible portion.
    fn height(&self) -> f32;
}

/// Compute the visible fraction of an item inside `viewport`.
///
/// `max(0, overlap) / height`, clamped to `[0, 1]`. Degenerate heights
/// (zero, negative, non-finite) yield `0.0` instead of an error.
pub fn visibility_ratio(viewport: &Rect, bounds: &Rect, height: f32) -> f32 {
    if !(height.is_finite() && height > 0.0) {
        return 0.0;
    }

    let overlap = bounds.vertical_overlap(viewport).max(0.0);
    let ratio = overlap / height;

    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// One item measured during a sampling pass.
#[derive(Debug)]
pub struct SampledItem<'a, I> {
    /// The attached item this measurement belongs to.
    pub item: &'a I,
    /// Resolved id (borrowed from the item).
    pub id: &'a str,
    /// Visible fraction in `[0, 1]`.
    pub ratio: f32,
}

/// Result of one sampling pass, in attached-item order.
#[derive(Debug)]
pub struct VisibilitySample<'a, I> {
    entries: Vec<SampledItem<'a, I>>,
    ids: HashSet<&'a str>,
    skipped_without_id: usize,
    skipped_duplicates: usize,
}

impl<'a, I> VisibilitySample<'a, I> {
    /// Measured items, in the order the render surface supplied them.
    pub fn entries(&self) -> &[SampledItem<'a, I>] {
        &self.entries
    }

    /// Whether `id` was attached during this pass.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Ratio recorded for `id`, if it was attached.
    pub fn ratio_of(&self, id: &str) -> Option<f32> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.ratio)
    }

    /// Number of measured items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was measured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items dropped because they had no resolvable id.
    pub fn skipped_without_id(&self) -> usize {
        self.skipped_without_id
    }

    /// Items dropped because their id already appeared earlier in the pass.
    pub fn skipped_duplicates(&self) -> usize {
        self.skipped_duplicates
    }
}

/// Measure every attached item against `viewport`.
///
/// Items without an id are skipped. If an id repeats within the pass only
/// the first occurrence is measured, which keeps downstream transition
/// detection at one event per id per pass.
pub fn sample_visibility<'a, I: Measurable>(
    viewport: &Rect,
    attached: &'a [I],
) -> VisibilitySample<'a, I> {
    let mut entries = Vec::with_capacity(attached.len());
    let mut ids = HashSet::with_capacity(attached.len());
    let mut skipped_without_id = 0;
    let mut skipped_duplicates = 0;

    for item in attached {
        let Some(id) = item.exposure_id() else {
            skipped_without_id += 1;
            continue;
        };

        if !ids.insert(id) {
            debug!(id, "Duplicate id in attached set, keeping first occurrence");
            skipped_duplicates += 1;
            continue;
        }

        let ratio = visibility_ratio(viewport, &item.bounds(), item.height());
        entries.push(SampledItem { item, id, ratio });
    }

    VisibilitySample {
        entries,
        ids,
        skipped_without_id,
        skipped_duplicates,
    }
}
