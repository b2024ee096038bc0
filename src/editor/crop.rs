// SPDX-License-Identifier: MPL-2.0
//! Crop rectangle drag engine.
//!
//! [`CropRectEditor`] owns the live crop rectangle in viewport coordinates and
//! turns handle drags into new rectangles. It is a two-state machine:
//!
//! ```text
//! Idle --Began on a handle--> Dragging(handle) --Ended/Cancelled/Failed--> Idle
//!                                  |  ^
//!                                  +--+ Changed (translation delta)
//! ```
//!
//! Freeform drags clamp each moved edge in a fixed order: content start/end,
//! then the padding boundary, then the minimum length (holding the far edge).
//! Locked-ratio drags propose a whole rectangle and reject the step outright
//! when any edge would leave the allowed area.

use super::handles::{classify_handle, should_claim_touch, HandlePosition};
use crate::config::{ASPECT_RATIO_EPSILON, MIN_CROP_LENGTH};
use crate::domain::geometry::{Point, Rect, Size, GEOMETRY_EPSILON};

/// Phase of a single-finger drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

/// One event from the gesture stream.
///
/// `translation` is the movement since the previous event of the same drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub location: Point,
    pub translation: Point,
}

impl GestureEvent {
    #[must_use]
    pub fn began(location: Point) -> Self {
        Self {
            phase: GesturePhase::Began,
            location,
            translation: Point::ZERO,
        }
    }

    #[must_use]
    pub fn changed(location: Point, translation: Point) -> Self {
        Self {
            phase: GesturePhase::Changed,
            location,
            translation,
        }
    }

    #[must_use]
    pub fn ended(location: Point) -> Self {
        Self {
            phase: GesturePhase::Ended,
            location,
            translation: Point::ZERO,
        }
    }
}

/// Area a drag may reach, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    /// Current scroll position of the zoomed image.
    pub content_offset: Point,
    /// Image size multiplied by the current zoom scale.
    pub scaled_image_size: Size,
    /// Viewport area left after safe area, toolbar and margins.
    pub padding_rect: Rect,
}

impl DragBounds {
    /// Where the zoomed image currently sits in the viewport.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::from_origin_size(-self.content_offset, self.scaled_image_size)
    }

    /// Intersection of the padding region and the visible image.
    #[must_use]
    pub fn allowed_rect(&self) -> Rect {
        self.padding_rect
            .intersection(&self.content_rect())
            .unwrap_or(Rect::ZERO)
    }

    fn horizontal(&self) -> AxisLimits {
        AxisLimits {
            content_start: -self.content_offset.x,
            content_end: self.scaled_image_size.width - self.content_offset.x,
            padding_start: self.padding_rect.min_x(),
            padding_end: self.padding_rect.max_x(),
        }
    }

    fn vertical(&self) -> AxisLimits {
        AxisLimits {
            content_start: -self.content_offset.y,
            content_end: self.scaled_image_size.height - self.content_offset.y,
            padding_start: self.padding_rect.min_y(),
            padding_end: self.padding_rect.max_y(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisLimits {
    content_start: f64,
    content_end: f64,
    padding_start: f64,
    padding_end: f64,
}

/// Result of feeding one gesture event to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Event had no effect (no handle armed, or the rectangle did not move).
    Ignored,
    /// A drag started on this handle.
    Armed(HandlePosition),
    /// The rectangle changed.
    Moved,
    /// A locked-ratio step would have left the allowed area and was dropped.
    Rejected,
    /// The active drag finished.
    Released(HandlePosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(HandlePosition),
}

/// Owner of the live crop rectangle.
#[derive(Debug, Clone)]
pub struct CropRectEditor {
    rect: Rect,
    state: DragState,
    min_length: f64,
    aspect_ratio: Option<f64>,
}

impl Default for CropRectEditor {
    fn default() -> Self {
        Self::new(Rect::ZERO, MIN_CROP_LENGTH)
    }
}

impl CropRectEditor {
    #[must_use]
    pub fn new(rect: Rect, min_length: f64) -> Self {
        Self {
            rect,
            state: DragState::Idle,
            min_length,
            aspect_ratio: None,
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Replaces the rectangle, e.g. after a settle or aspect-ratio change.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    #[must_use]
    pub fn min_length(&self) -> f64 {
        self.min_length
    }

    /// Locks (`Some(width / height)`) or unlocks (`None`) the ratio.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) {
        self.aspect_ratio = ratio.filter(|r| r.is_finite() && *r > 0.0);
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
    }

    #[must_use]
    pub fn active_handle(&self) -> Option<HandlePosition> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging(handle) => Some(handle),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active_handle().is_some()
    }

    /// Whether the touch should be handled by the crop box at all.
    #[must_use]
    pub fn should_claim(&self, point: Point) -> bool {
        should_claim_touch(point, &self.rect)
    }

    /// Whether the current rectangle honors the locked ratio, if any.
    #[must_use]
    pub fn matches_aspect_ratio(&self) -> bool {
        match (self.aspect_ratio, self.rect.size.aspect_ratio()) {
            (Some(expected), Some(actual)) => (actual - expected).abs() < ASPECT_RATIO_EPSILON,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    pub fn handle_gesture(&mut self, event: &GestureEvent, bounds: &DragBounds) -> DragOutcome {
        match event.phase {
            GesturePhase::Began => match classify_handle(event.location, &self.rect) {
                Some(handle) => {
                    tracing::debug!(?handle, location = ?event.location, "crop handle armed");
                    self.state = DragState::Dragging(handle);
                    DragOutcome::Armed(handle)
                }
                None => {
                    self.state = DragState::Idle;
                    DragOutcome::Ignored
                }
            },
            GesturePhase::Changed => {
                let DragState::Dragging(handle) = self.state else {
                    return DragOutcome::Ignored;
                };
                self.drag(handle, event.translation, bounds)
            }
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                match std::mem::take(&mut self.state) {
                    DragState::Dragging(handle) => DragOutcome::Released(handle),
                    DragState::Idle => DragOutcome::Ignored,
                }
            }
        }
    }

    /// Applies one translation step for `handle`.
    pub fn drag(
        &mut self,
        handle: HandlePosition,
        translation: Point,
        bounds: &DragBounds,
    ) -> DragOutcome {
        let proposed = match self.aspect_ratio {
            None => Some(self.freeform_step(handle, translation, bounds)),
            Some(ratio) => {
                let candidate = if handle.is_corner() {
                    self.locked_corner_step(handle, translation, ratio)
                } else {
                    self.locked_edge_step(handle, translation, ratio)
                };
                self.edges_are_valid(&candidate, bounds).then_some(candidate)
            }
        };

        match proposed {
            Some(rect) if rect == self.rect => DragOutcome::Ignored,
            Some(rect) => {
                self.rect = rect;
                DragOutcome::Moved
            }
            None => {
                tracing::debug!(?handle, ?translation, "locked-ratio drag step rejected");
                DragOutcome::Rejected
            }
        }
    }

    fn freeform_step(
        &self,
        handle: HandlePosition,
        translation: Point,
        bounds: &DragBounds,
    ) -> Rect {
        let (mut min_x, mut max_x) = (self.rect.min_x(), self.rect.max_x());
        let (mut min_y, mut max_y) = (self.rect.min_y(), self.rect.max_y());
        let (horizontal, vertical) = (bounds.horizontal(), bounds.vertical());

        if handle.moves_left() {
            min_x = drag_leading_edge(min_x, max_x, translation.x, horizontal, self.min_length);
        } else if handle.moves_right() {
            max_x = drag_trailing_edge(min_x, max_x, translation.x, horizontal, self.min_length);
        }

        if handle.moves_top() {
            min_y = drag_leading_edge(min_y, max_y, translation.y, vertical, self.min_length);
        } else if handle.moves_bottom() {
            max_y = drag_trailing_edge(min_y, max_y, translation.y, vertical, self.min_length);
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// The axis with the larger movement leads; the opposite corner stays put.
    fn locked_corner_step(&self, handle: HandlePosition, translation: Point, ratio: f64) -> Rect {
        let rect = self.rect;
        let sign_x = if handle.moves_left() { -1.0 } else { 1.0 };
        let sign_y = if handle.moves_top() { -1.0 } else { 1.0 };

        let (width, height) = if translation.x.abs() >= translation.y.abs() {
            let width = rect.width() + sign_x * translation.x;
            (width, width / ratio)
        } else {
            let height = rect.height() + sign_y * translation.y;
            (height * ratio, height)
        };

        let x = if handle.moves_left() {
            rect.max_x() - width
        } else {
            rect.min_x()
        };
        let y = if handle.moves_top() {
            rect.max_y() - height
        } else {
            rect.min_y()
        };
        Rect::new(x, y, width, height)
    }

    /// The dragged edge sets one dimension; the other follows the ratio and is
    /// centered on the midpoint of the opposite edge.
    fn locked_edge_step(&self, handle: HandlePosition, translation: Point, ratio: f64) -> Rect {
        let rect = self.rect;
        match handle {
            HandlePosition::Left | HandlePosition::Right => {
                let width = if handle == HandlePosition::Left {
                    rect.width() - translation.x
                } else {
                    rect.width() + translation.x
                };
                let height = width / ratio;
                let x = if handle == HandlePosition::Left {
                    rect.max_x() - width
                } else {
                    rect.min_x()
                };
                Rect::new(x, rect.mid_y() - height / 2.0, width, height)
            }
            _ => {
                let height = if handle == HandlePosition::Top {
                    rect.height() - translation.y
                } else {
                    rect.height() + translation.y
                };
                let width = height * ratio;
                let y = if handle == HandlePosition::Top {
                    rect.max_y() - height
                } else {
                    rect.min_y()
                };
                Rect::new(rect.mid_x() - width / 2.0, y, width, height)
            }
        }
    }

    fn edges_are_valid(&self, rect: &Rect, bounds: &DragBounds) -> bool {
        let allowed = bounds.allowed_rect();
        let left = rect.min_x() >= allowed.min_x() - GEOMETRY_EPSILON;
        let right = rect.max_x() <= allowed.max_x() + GEOMETRY_EPSILON;
        let top = rect.min_y() >= allowed.min_y() - GEOMETRY_EPSILON;
        let bottom = rect.max_y() <= allowed.max_y() + GEOMETRY_EPSILON;
        let large_enough = rect.width() >= self.min_length && rect.height() >= self.min_length;
        left && right && top && bottom && large_enough
    }
}

impl AxisLimits {
    /// First coordinate inside both the image and the padding.
    fn lower(&self) -> f64 {
        self.content_start.max(self.padding_start)
    }

    /// Last coordinate inside both the image and the padding.
    fn upper(&self) -> f64 {
        self.content_end.min(self.padding_end)
    }
}

/// Moves the left or top edge. Returns the new start coordinate.
///
/// The minimum length only grows the rectangle as far as the image and
/// padding allow; when the image is shorter than the minimum, containment wins.
fn drag_leading_edge(
    start: f64,
    end: f64,
    delta: f64,
    limits: AxisLimits,
    min_length: f64,
) -> f64 {
    let mut start = start + delta;
    if start < limits.content_start {
        start = limits.content_start;
    }
    if start < limits.padding_start {
        start = limits.padding_start;
    }
    if end - start < min_length {
        start = (end - min_length).max(limits.lower());
    }
    start
}

/// Moves the right or bottom edge. Returns the new end coordinate.
fn drag_trailing_edge(
    start: f64,
    end: f64,
    delta: f64,
    limits: AxisLimits,
    min_length: f64,
) -> f64 {
    let mut end = end + delta;
    if end > limits.content_end {
        end = limits.content_end;
    }
    if end > limits.padding_end {
        end = limits.padding_end;
    }
    if end - start < min_length {
        end = (start + min_length).min(limits.upper());
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, assert_rect_eq};

    fn bounds(image: Size) -> DragBounds {
        DragBounds {
            content_offset: Point::ZERO,
            scaled_image_size: image,
            padding_rect: Rect::new(0.0, 0.0, 1000.0, 1000.0),
        }
    }

    fn drag_handle(
        editor: &mut CropRectEditor,
        handle: HandlePosition,
        delta: Point,
        bounds: &DragBounds,
    ) -> DragOutcome {
        let start = handle.zone(&editor.rect()).center();
        assert_eq!(
            editor.handle_gesture(&GestureEvent::began(start), bounds),
            DragOutcome::Armed(handle)
        );
        let outcome = editor.handle_gesture(&GestureEvent::changed(start + delta, delta), bounds);
        editor.handle_gesture(&GestureEvent::ended(start + delta), bounds);
        outcome
    }

    #[test]
    fn bottom_right_drag_clamps_to_scaled_image() {
        let bounds = bounds(Size::new(300.0, 300.0));
        let mut editor = CropRectEditor::new(Rect::new(0.0, 0.0, 100.0, 100.0), MIN_CROP_LENGTH);

        let delta = Point::new(1000.0, 1000.0);
        let outcome = drag_handle(&mut editor, HandlePosition::BottomRight, delta, &bounds);

        assert_eq!(outcome, DragOutcome::Moved);
        assert_rect_eq(editor.rect(), Rect::new(0.0, 0.0, 300.0, 300.0));
    }

    #[test]
    fn trailing_edge_respects_content_offset() {
        let mut bounds = bounds(Size::new(600.0, 600.0));
        bounds.content_offset = Point::new(200.0, 0.0);
        let mut editor = CropRectEditor::new(Rect::new(0.0, 0.0, 100.0, 100.0), MIN_CROP_LENGTH);

        drag_handle(&mut editor, HandlePosition::Right, Point::new(900.0, 0.0), &bounds);

        // Image spans viewport x in [-200, 400].
        assert_abs_diff_eq!(editor.rect().max_x(), 400.0);
    }

    #[test]
    fn leading_edge_clamps_to_content_then_padding() {
        let mut bounds = bounds(Size::new(800.0, 800.0));
        bounds.content_offset = Point::new(-50.0, 0.0);
        bounds.padding_rect = Rect::new(80.0, 0.0, 900.0, 900.0);
        let mut editor =
            CropRectEditor::new(Rect::new(200.0, 100.0, 200.0, 200.0), MIN_CROP_LENGTH);

        drag_handle(&mut editor, HandlePosition::Left, Point::new(-500.0, 0.0), &bounds);

        // Content starts at 50, padding at 80; the far edge stays at 400.
        assert_rect_eq(editor.rect(), Rect::new(80.0, 100.0, 320.0, 200.0));
    }

    #[test]
    fn shrinking_stops_at_minimum_holding_far_edge() {
        let bounds = bounds(Size::new(800.0, 800.0));
        let mut editor =
            CropRectEditor::new(Rect::new(100.0, 100.0, 300.0, 300.0), MIN_CROP_LENGTH);

        drag_handle(&mut editor, HandlePosition::TopLeft, Point::new(500.0, 500.0), &bounds);

        let rect = editor.rect();
        assert_abs_diff_eq!(rect.width(), MIN_CROP_LENGTH);
        assert_abs_diff_eq!(rect.height(), MIN_CROP_LENGTH);
        assert_abs_diff_eq!(rect.max_x(), 400.0);
        assert_abs_diff_eq!(rect.max_y(), 400.0);
    }

    #[test]
    fn changed_without_armed_handle_is_ignored() {
        let bounds = bounds(Size::new(800.0, 800.0));
        let mut editor =
            CropRectEditor::new(Rect::new(100.0, 100.0, 300.0, 300.0), MIN_CROP_LENGTH);

        let began = editor.handle_gesture(&GestureEvent::began(Point::new(250.0, 250.0)), &bounds);
        let moved = editor.handle_gesture(
            &GestureEvent::changed(Point::new(260.0, 260.0), Point::new(10.0, 10.0)),
            &bounds,
        );

        assert_eq!(began, DragOutcome::Ignored);
        assert_eq!(moved, DragOutcome::Ignored);
        assert_rect_eq(editor.rect(), Rect::new(100.0, 100.0, 300.0, 300.0));
    }

    #[test]
    fn release_clears_handle_without_snapping() {
        let bounds = bounds(Size::new(800.0, 800.0));
        let mut editor =
            CropRectEditor::new(Rect::new(100.0, 100.0, 300.0, 300.0), MIN_CROP_LENGTH);
        let start = Point::new(400.0, 250.0);

        editor.handle_gesture(&GestureEvent::began(start), &bounds);
        editor.handle_gesture(&GestureEvent::changed(start, Point::new(13.5, 0.0)), &bounds);
        let released = editor.handle_gesture(
            &GestureEvent {
                phase: GesturePhase::Cancelled,
                location: start,
                translation: Point::ZERO,
            },
            &bounds,
        );

        assert_eq!(released, DragOutcome::Released(HandlePosition::Right));
        assert!(!editor.is_dragging());
        assert_abs_diff_eq!(editor.rect().width(), 313.5);
    }

    #[test]
    fn locked_corner_follows_dominant_axis() {
        let bounds = bounds(Size::new(800.0, 800.0));
        let mut editor =
            CropRectEditor::new(Rect::new(100.0, 100.0, 200.0, 100.0), MIN_CROP_LENGTH);
        editor.set_aspect_ratio(Some(2.0));

        drag_handle(&mut editor, HandlePosition::BottomRight, Point::new(40.0, 5.0), &bounds);

        assert_rect_eq(editor.rect(), Rect::new(100.0, 100.0, 240.0, 120.0));
        assert!(editor.matches_aspect_ratio());
    }

    #[test]
    fn locked_top_left_corner_anchors_bottom_right() {
        let bounds = bounds(Size::new(800.0, 800.0));
        let mut editor =
            CropRectEditor::new(Rect::new(200.0, 200.0, 200.0, 200.0), MIN_CROP_LENGTH);
        editor.set_aspect_ratio(Some(1.0));

        drag_handle(&mut editor, HandlePosition::TopLeft, Point::new(-10.0, -30.0), &bounds);

        assert_rect_eq(editor.rect(), Rect::new(170.0, 170.0, 230.0, 230.0));
    }

    #[test]
    fn locked_edge_recenters_cross_axis() {
        let bounds = bounds(Size::new(800.0, 800.0));
        let mut editor =
            CropRectEditor::new(Rect::new(100.0, 100.0, 200.0, 200.0), MIN_CROP_LENGTH);
        editor.set_aspect_ratio(Some(1.0));

        drag_handle(&mut editor, HandlePosition::Right, Point::new(20.0, 0.0), &bounds);

        assert_rect_eq(editor.rect(), Rect::new(100.0, 90.0, 220.0, 220.0));
    }

    #[test]
    fn locked_step_outside_bounds_is_rejected_whole() {
        let bounds = bounds(Size::new(400.0, 400.0));
        let original = Rect::new(100.0, 100.0, 200.0, 200.0);
        let mut editor = CropRectEditor::new(original, MIN_CROP_LENGTH);
        editor.set_aspect_ratio(Some(1.0));

        let delta = Point::new(150.0, 0.0);
        let outcome = drag_handle(&mut editor, HandlePosition::BottomRight, delta, &bounds);

        assert_eq!(outcome, DragOutcome::Rejected);
        assert_eq!(editor.rect(), original);
    }

    #[test]
    fn locked_step_below_minimum_is_rejected() {
        let bounds = bounds(Size::new(800.0, 800.0));
        let original = Rect::new(100.0, 100.0, 100.0, 100.0);
        let mut editor = CropRectEditor::new(original, MIN_CROP_LENGTH);
        editor.set_aspect_ratio(Some(1.0));

        let delta = Point::new(60.0, 0.0);
        let outcome = drag_handle(&mut editor, HandlePosition::Left, delta, &bounds);

        assert_eq!(outcome, DragOutcome::Rejected);
        assert_eq!(editor.rect(), original);
    }

    #[test]
    fn random_drag_sequence_never_goes_below_minimum() {
        let bounds = bounds(Size::new(700.0, 500.0));
        let mut editor = CropRectEditor::new(Rect::new(50.0, 50.0, 400.0, 300.0), MIN_CROP_LENGTH);
        let deltas = [
            Point::new(-380.0, 12.0),
            Point::new(250.0, -400.0),
            Point::new(900.0, 900.0),
            Point::new(-2000.0, 35.0),
            Point::new(3.0, -1500.0),
        ];

        for handle in HandlePosition::ALL {
            for delta in deltas {
                editor.drag(handle, delta, &bounds);
                let rect = editor.rect();
                assert!(rect.width() >= MIN_CROP_LENGTH, "{handle:?} {delta:?} {rect:?}");
                assert!(rect.height() >= MIN_CROP_LENGTH, "{handle:?} {delta:?} {rect:?}");
            }
        }
    }

    #[test]
    fn locked_sequence_preserves_ratio() {
        let bounds = bounds(Size::new(900.0, 900.0));
        let ratio = 16.0 / 9.0;
        let mut editor =
            CropRectEditor::new(Rect::new(100.0, 100.0, 320.0, 180.0), MIN_CROP_LENGTH);
        editor.set_aspect_ratio(Some(ratio));

        for handle in HandlePosition::ALL {
            for delta in [Point::new(25.0, 7.0), Point::new(-12.0, -30.0), Point::new(400.0, 3.0)] {
                editor.drag(handle, delta, &bounds);
                assert!(editor.matches_aspect_ratio(), "{handle:?} {delta:?}");
            }
        }
    }

    #[test]
    fn image_shorter_than_minimum_keeps_crop_inside_image() {
        // A wide panorama fitted to the viewport is only 30 points tall.
        let bounds = DragBounds {
            content_offset: Point::new(0.0, -185.0),
            scaled_image_size: Size::new(400.0, 30.0),
            padding_rect: Rect::new(0.0, 0.0, 400.0, 400.0),
        };
        let original = Rect::new(0.0, 185.0, 400.0, 30.0);
        let mut editor = CropRectEditor::new(original, MIN_CROP_LENGTH);

        for (handle, delta) in [
            (HandlePosition::Bottom, Point::new(0.0, -1.0)),
            (HandlePosition::Top, Point::new(0.0, 1.0)),
            (HandlePosition::BottomLeft, Point::new(5.0, -3.0)),
        ] {
            editor.drag(handle, delta, &bounds);
            assert!(
                bounds.content_rect().contains_rect(&editor.rect()),
                "{handle:?} moved the crop to {:?}",
                editor.rect()
            );
        }
        assert_abs_diff_eq!(editor.rect().min_y(), 185.0);
        assert_abs_diff_eq!(editor.rect().height(), 30.0);
    }

    #[test]
    fn minimum_grows_only_as_far_as_the_image() {
        let bounds = bounds(Size::new(100.0, 800.0));
        let mut editor = CropRectEditor::new(Rect::new(50.0, 0.0, 50.0, 100.0), 10.0);

        // Shrinking the leading edge past the far edge stops at the minimum.
        editor.drag(HandlePosition::Left, Point::new(45.0, 0.0), &bounds);
        assert_rect_eq(editor.rect(), Rect::new(90.0, 0.0, 10.0, 100.0));

        // With a minimum wider than the image, the crop spans the image.
        let mut editor = CropRectEditor::new(Rect::new(0.0, 0.0, 100.0, 100.0), 150.0);
        editor.drag(HandlePosition::Right, Point::new(-20.0, 0.0), &bounds);
        assert_rect_eq(editor.rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }
}
