//! Core data types for exposure tracking.
//!
//! Items come in from the render surface, events go out to the logger.
//! Neither is mutated by the engine once constructed.

use serde::{Deserialize, Serialize};

use crate::geometry::{Measurable, Rect};

/// Position reported when an item is no longer resolvable (disappearance EXIT).
pub const UNKNOWN_POSITION: i32 = -1;

/// Category code reported when the item's kind is not known.
pub const UNKNOWN_CATEGORY: i32 = -1;

/// Discrete engagement stage of an item's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExposureStage {
    /// Some part of the item is visible (0% < ratio < 50%).
    Enter,
    /// At least half of the item is visible (50% ≤ ratio < 100%).
    Half,
    /// The whole item is visible.
    Full,
    /// Nothing of the item is visible, or it is no longer attached.
    Exit,
}

impl ExposureStage {
    /// All stages, in engagement order.
    pub const ALL: [ExposureStage; 4] = [
        ExposureStage::Enter,
        ExposureStage::Half,
        ExposureStage::Full,
        ExposureStage::Exit,
    ];

    /// Upper-case name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ExposureStage::Enter => "ENTER",
            ExposureStage::Half => "HALF",
            ExposureStage::Full => "FULL",
            ExposureStage::Exit => "EXIT",
        }
    }

    /// Whether the stage means the item is at least partly on screen.
    pub fn is_visible(&self) -> bool {
        !matches!(self, ExposureStage::Exit)
    }
}

impl std::fmt::Display for ExposureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Known card kinds supplied by the item provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardCategory {
    Text,
    Image,
    Video,
}

impl CardCategory {
    /// Map a raw category code to a known kind.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(CardCategory::Text),
            1 => Some(CardCategory::Image),
            2 => Some(CardCategory::Video),
            _ => None,
        }
    }

    /// Raw code as used by the item provider.
    pub fn code(&self) -> i32 {
        match self {
            CardCategory::Text => 0,
            CardCategory::Image => 1,
            CardCategory::Video => 2,
        }
    }

    /// Short token used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            CardCategory::Text => "TEXT",
            CardCategory::Image => "IMAGE",
            CardCategory::Video => "VIDEO",
        }
    }

    /// Label for a raw code, `UNKNOWN` for anything unrecognised
    /// (including [`UNKNOWN_CATEGORY`]).
    pub fn label_for_code(code: i32) -> &'static str {
        Self::from_code(code).map_or("UNKNOWN", |c| c.label())
    }
}

/// Everything the engine needs to know about an attached item.
///
/// Extends the geometric [`Measurable`] capability with the metadata that
/// ends up in emitted events.
pub trait ExposureItem: Measurable {
    /// Index in the item provider's ordering.
    fn position(&self) -> i32;

    /// Display title, if any.
    fn title(&self) -> Option<&str>;

    /// Raw category code.
    fn category(&self) -> i32;
}

/// Stock attached-item representation.
///
/// Render surfaces with their own view types can implement
/// [`ExposureItem`] directly instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedItem {
    /// Unique id within the visible set; `None` for unresolvable views.
    #[serde(default)]
    pub id: Option<String>,
    /// Index in the provider's ordering.
    pub position: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "unknown_category")]
    pub category: i32,
    /// Bounds in viewport coordinates.
    pub bounds: Rect,
    /// Full height of the item.
    pub height: f32,
}

fn unknown_category() -> i32 {
    UNKNOWN_CATEGORY
}

impl TrackedItem {
    /// Create an item whose height matches its bounds.
    pub fn new(id: impl Into<String>, position: i32, bounds: Rect) -> Self {
        Self {
            id: Some(id.into()),
            position,
            title: None,
            category: UNKNOWN_CATEGORY,
            height: bounds.height(),
            bounds,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the category code.
    pub fn with_category(mut self, category: CardCategory) -> Self {
        self.category = category.code();
        self
    }

    /// Override the full height (e.g. when bounds are already clipped).
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

impl Measurable for TrackedItem {
    fn exposure_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn height(&self) -> f32 {
        self.height
    }
}

impl ExposureItem for TrackedItem {
    fn position(&self) -> i32 {
        self.position
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn category(&self) -> i32 {
        self.category
    }
}

/// A single stage transition of one item.
///
/// Built once by the tracker and never mutated; subscribers only ever see
/// it by shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureEvent {
    card_id: String,
    position: i32,
    stage: ExposureStage,
    timestamp_millis: i64,
    title: Option<String>,
    category: i32,
}

impl ExposureEvent {
    /// Create an event for an attached item.
    pub fn new(
        card_id: impl Into<String>,
        position: i32,
        stage: ExposureStage,
        timestamp_millis: i64,
        title: Option<String>,
        category: i32,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            position,
            stage,
            timestamp_millis,
            title,
            category,
        }
    }

    /// Create the EXIT event for an item that is no longer attached.
    ///
    /// Position and category carry their unknown sentinels and there is no
    /// title.
    pub fn disappeared(card_id: impl Into<String>, timestamp_millis: i64) -> Self {
        Self::new(
            card_id,
            UNKNOWN_POSITION,
            ExposureStage::Exit,
            timestamp_millis,
            None,
            UNKNOWN_CATEGORY,
        )
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn stage(&self) -> ExposureStage {
        self.stage
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn category(&self) -> i32 {
        self.category
    }

    /// True for EXIT events produced because the item left the attached set.
    pub fn is_disappearance(&self) -> bool {
        self.stage == ExposureStage::Exit && self.position == UNKNOWN_POSITION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod stage {
        use super::*;

        #[test]
        fn test_names() {
            let names: Vec<&str> = ExposureStage::ALL.iter().map(|s| s.name()).collect();
            assert_eq!(names, vec!["ENTER", "HALF", "FULL", "EXIT"]);
        }

        #[test]
        fn test_display_matches_name() {
            assert_eq!(format!("{}", ExposureStage::Half), "HALF");
        }

        #[test]
        fn test_is_visible() {
            assert!(ExposureStage::Enter.is_visible());
            assert!(ExposureStage::Full.is_visible());
            assert!(!ExposureStage::Exit.is_visible());
        }

        #[test]
        fn test_serde_uses_upper_case() {
            let json = serde_json::to_string(&ExposureStage::Full).unwrap();
            assert_eq!(json, "\"FULL\"");
        }
    }

    mod category {
        use super::*;

        #[test]
        fn test_known_codes() {
            assert_eq!(CardCategory::label_for_code(0), "TEXT");
            assert_eq!(CardCategory::label_for_code(1), "IMAGE");
            assert_eq!(CardCategory::label_for_code(2), "VIDEO");
        }

        #[test]
        fn test_unknown_codes() {
            assert_eq!(CardCategory::label_for_code(UNKNOWN_CATEGORY), "UNKNOWN");
            assert_eq!(CardCategory::label_for_code(3), "UNKNOWN");
            assert_eq!(CardCategory::label_for_code(i32::MAX), "UNKNOWN");
        }

        #[test]
        fn test_code_roundtrip() {
            for category in [CardCategory::Text, CardCategory::Image, CardCategory::Video] {
                assert_eq!(CardCategory::from_code(category.code()), Some(category));
            }
        }
    }

    mod tracked_item {
        use super::*;

        #[test]
        fn test_new_takes_height_from_bounds() {
            let item = TrackedItem::new("card-1", 4, Rect::new(0.0, 10.0, 100.0, 60.0));
            assert_eq!(item.height, 50.0);
            assert_eq!(item.category, UNKNOWN_CATEGORY);
            assert_eq!(item.exposure_id(), Some("card-1"));
        }

        #[test]
        fn test_builders() {
            let item = TrackedItem::new("card-1", 0, Rect::from_size(100.0, 100.0))
                .with_title("Morning news")
                .with_category(CardCategory::Video)
                .with_height(200.0);

            assert_eq!(ExposureItem::title(&item), Some("Morning news"));
            assert_eq!(ExposureItem::category(&item), 2);
            assert_eq!(Measurable::height(&item), 200.0);
        }

        #[test]
        fn test_deserialize_with_defaults() {
            let json = r#"{
                "position": 3,
                "bounds": {"left": 0, "top": 0, "right": 100, "bottom": 80},
                "height": 80
            }"#;
            let item: TrackedItem = serde_json::from_str(json).unwrap();
            assert_eq!(item.id, None);
            assert_eq!(item.title, None);
            assert_eq!(item.category, UNKNOWN_CATEGORY);
            assert_eq!(item.position, 3);
        }
    }

    mod event {
        use super::*;

        #[test]
        fn test_disappeared_uses_sentinels() {
            let event = ExposureEvent::disappeared("card-9", 1_000);
            assert_eq!(event.card_id(), "card-9");
            assert_eq!(event.position(), UNKNOWN_POSITION);
            assert_eq!(event.category(), UNKNOWN_CATEGORY);
            assert_eq!(event.title(), None);
            assert_eq!(event.stage(), ExposureStage::Exit);
            assert!(event.is_disappearance());
        }

        #[test]
        fn test_attached_exit_is_not_disappearance() {
            let event = ExposureEvent::new("card-1", 7, ExposureStage::Exit, 0, None, 1);
            assert!(!event.is_disappearance());
        }
    }
}
