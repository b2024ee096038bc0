// SPDX-License-Identifier: MPL-2.0
//! Interactive crop editing.
//!
//! - [`handles`]: hit zones around the crop rectangle
//! - [`crop`]: drag state machine owning the live rectangle
//! - [`viewport`]: fit, zoom bounds and scroll mapping
//! - [`resolver`]: viewport rectangle to integer pixel rectangle
//! - [`settle`]: cancellable post-drag settle sequence
//! - [`session`]: everything above wired into one editing session

pub mod crop;
pub mod handles;
pub mod resolver;
pub mod session;
pub mod settle;
pub mod viewport;

pub use crop::{CropRectEditor, DragBounds, DragOutcome, GestureEvent, GesturePhase};
pub use handles::{classify_handle, should_claim_touch, HandlePosition};
pub use resolver::PixelCropResolver;
pub use session::{CropEditInfo, CropOptions, CropSession, SourceImage};
pub use settle::{run_settle, SettleDelays, SettleStage, SettleTask, SettleTick, SettleTicket};
pub use viewport::{AspectRatioChange, ToolbarPosition, Viewport};

use crate::config::{
    CONTENT_MARGIN, MIN_CROP_LENGTH, SETTLE_FINALIZE_DELAY_MS, SETTLE_REVEAL_DELAY_MS,
    TOOLBAR_THICKNESS,
};
use crate::domain::editing::AspectRatio;
use std::time::Duration;

/// Runtime tunables for a crop session, usually derived from
/// [`Config::editor_settings`](crate::config::Config::editor_settings).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub min_crop_length: f64,
    pub aspect_ratio: AspectRatio,
    pub toolbar_position: ToolbarPosition,
    pub toolbar_thickness: f64,
    pub content_margin: f64,
    pub reveal_delay: Duration,
    pub finalize_delay: Duration,
}

impl EditorSettings {
    #[must_use]
    pub fn settle_delays(&self) -> SettleDelays {
        SettleDelays {
            reveal: self.reveal_delay,
            finalize: self.finalize_delay,
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_crop_length: MIN_CROP_LENGTH,
            aspect_ratio: AspectRatio::default(),
            toolbar_position: ToolbarPosition::default(),
            toolbar_thickness: TOOLBAR_THICKNESS,
            content_margin: CONTENT_MARGIN,
            reveal_delay: Duration::from_millis(SETTLE_REVEAL_DELAY_MS),
            finalize_delay: Duration::from_millis(SETTLE_FINALIZE_DELAY_MS),
        }
    }
}
