// SPDX-License-Identifier: MPL-2.0
//! One crop editing session.
//!
//! [`CropSession`] wires the drag engine, the viewport mapping, the pixel
//! resolver and the settle bookkeeping together. Every operation recomputes
//! the geometry it affects before returning, so reads never see stale state.
//!
//! Coordinate spaces:
//! - viewport points: where the crop rectangle is drawn
//! - content points: viewport point + content offset, zoomed image at origin
//! - oriented pixels: the upright, user-transformed bitmap
//! - stored pixels: the bitmap as decoded

use super::crop::{CropRectEditor, DragOutcome, GestureEvent};
use super::resolver::PixelCropResolver;
use super::settle::{SettleStage, SettleTask, SettleTick, SettleTicket};
use super::viewport::{AspectRatioChange, Viewport};
use super::EditorSettings;
use crate::config::DEFAULT_SCREEN_SCALE;
use crate::domain::editing::{AspectRatio, ImageFilterTransform, ImageOrientation};
use crate::domain::geometry::{AffineTransform, EdgeInsets, Point, Rect, Size};
use crate::error::Result;
use crate::media::image_transform;
use image_rs::DynamicImage;

/// The image being cropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceImage {
    /// Stored pixel dimensions.
    pub pixel_size: Size,
    pub orientation: ImageOrientation,
}

impl SourceImage {
    #[must_use]
    pub fn new(width: u32, height: u32, orientation: ImageOrientation) -> Self {
        Self {
            pixel_size: Size::new(f64::from(width), f64::from(height)),
            orientation,
        }
    }
}

/// Options supplied once when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropOptions {
    /// Initial crop in oriented pixels (after orientation and `initial_transform`).
    pub initial_crop: Option<Rect>,
    pub initial_transform: ImageFilterTransform,
    pub aspect_ratio: AspectRatio,
    /// Extra insets the host reserves around the viewport.
    pub extra_insets: EdgeInsets,
}

/// Result of a committed session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropEditInfo {
    /// Crop in oriented pixels.
    pub rect: Rect,
    pub transform: ImageFilterTransform,
    pub aspect_ratio: AspectRatio,
    pub zoom_scale: f64,
}

#[derive(Debug)]
pub struct CropSession {
    resolver: PixelCropResolver,
    editor: CropRectEditor,
    viewport: Viewport,
    settle: SettleTask,
    settings: EditorSettings,
    aspect_ratio: AspectRatio,
    initial_aspect_ratio: AspectRatio,
    screen_scale: f64,
    dimming_revealed: bool,
}

impl CropSession {
    #[must_use]
    pub fn new(
        source: SourceImage,
        options: CropOptions,
        settings: EditorSettings,
        viewport_bounds: Size,
        screen_scale: f64,
    ) -> Self {
        let screen_scale = if screen_scale.is_finite() && screen_scale > 0.0 {
            screen_scale
        } else {
            DEFAULT_SCREEN_SCALE
        };
        let viewport = Viewport::new(viewport_bounds)
            .with_toolbar(settings.toolbar_position, settings.toolbar_thickness)
            .with_margin(settings.content_margin)
            .with_extra_insets(options.extra_insets);

        let mut session = Self {
            resolver: PixelCropResolver::new(
                source.pixel_size,
                source.orientation,
                options.initial_transform,
            ),
            editor: CropRectEditor::new(Rect::ZERO, settings.min_crop_length),
            viewport,
            settle: SettleTask::new(),
            settings,
            aspect_ratio: options.aspect_ratio,
            initial_aspect_ratio: options.aspect_ratio,
            screen_scale,
            dimming_revealed: false,
        };

        let (pixel_rect, aspect_ratio) = session.initial_pixel_crop(&options);
        session.aspect_ratio = aspect_ratio;
        session.editor.set_aspect_ratio(session.ratio_value(aspect_ratio));
        session.layout_pixel_rect(pixel_rect);
        session
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Live crop rectangle in viewport points.
    #[must_use]
    pub fn crop_rect(&self) -> Rect {
        self.editor.rect()
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.viewport.zoom_scale
    }

    #[must_use]
    pub fn content_offset(&self) -> Point {
        self.viewport.content_offset
    }

    /// Scroll insets limiting panning to the slack around the crop box.
    #[must_use]
    pub fn content_inset(&self) -> EdgeInsets {
        self.viewport.content_inset(&self.editor.rect())
    }

    /// Current zoom range for the crop box.
    #[must_use]
    pub fn zoom_range(&self) -> (f64, f64) {
        Viewport::min_max_zoom(self.editor.rect().size, self.image_size())
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    #[must_use]
    pub fn transform(&self) -> ImageFilterTransform {
        self.resolver.transform()
    }

    #[must_use]
    pub fn screen_scale(&self) -> f64 {
        self.screen_scale
    }

    /// Displayed image size in unzoomed points.
    #[must_use]
    pub fn image_size(&self) -> Size {
        self.resolver.image_size(self.screen_scale)
    }

    #[must_use]
    pub fn resolver(&self) -> &PixelCropResolver {
        &self.resolver
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.editor.is_dragging()
    }

    #[must_use]
    pub fn is_dimming_revealed(&self) -> bool {
        self.dimming_revealed
    }

    #[must_use]
    pub fn settle_pending(&self) -> bool {
        self.settle.is_pending()
    }

    #[must_use]
    pub fn should_claim_touch(&self, point: Point) -> bool {
        self.editor.should_claim(point)
    }

    /// Crop resolved to whole oriented pixels.
    #[must_use]
    pub fn image_pixel_rect(&self) -> Rect {
        let rect = self.editor.rect();
        self.resolver.resolve(
            rect.origin + self.viewport.content_offset,
            rect.size,
            self.viewport.zoom_scale,
            self.screen_scale,
        )
    }

    #[must_use]
    pub fn commit(&self) -> CropEditInfo {
        CropEditInfo {
            rect: self.image_pixel_rect(),
            transform: self.resolver.transform(),
            aspect_ratio: self.aspect_ratio,
            zoom_scale: self.viewport.zoom_scale,
        }
    }

    /// Applies orientation and user transform to `image` (stored pixels) and
    /// crops it to the committed rectangle.
    pub fn render(&self, image: &DynamicImage) -> Result<DynamicImage> {
        image_transform::render_crop(
            image,
            &self.resolver.composed_transform(),
            &self.image_pixel_rect(),
        )
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feeds one drag event. Returns a ticket when a drag ended and the settle
    /// sequence should be started.
    pub fn handle_gesture(&mut self, event: &GestureEvent) -> Option<SettleTicket> {
        let bounds = self.viewport.drag_bounds(self.image_size());
        match self.editor.handle_gesture(event, &bounds) {
            DragOutcome::Armed(_) => {
                self.settle.cancel();
                self.dimming_revealed = false;
                None
            }
            DragOutcome::Released(_) => Some(self.settle.schedule()),
            DragOutcome::Ignored | DragOutcome::Moved | DragOutcome::Rejected => None,
        }
    }

    /// Selects a new aspect ratio. Returns the target rectangle and zoom
    /// multiplier when the rectangle had to change.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) -> Option<AspectRatioChange> {
        self.aspect_ratio = aspect_ratio;
        let value = self.ratio_value(aspect_ratio);
        self.editor.set_aspect_ratio(value);
        let value = value?;

        self.settle.cancel();
        let change = self.viewport.recompute_for_aspect_ratio_change(
            value,
            &self.editor.rect(),
            self.image_size(),
        );
        if change.refits() {
            self.zoom_to_fit(change.proposed);
        } else {
            self.editor.set_rect(change.rect);
        }
        Some(change)
    }

    /// Turns the image a quarter counter-clockwise, keeping the selected region.
    pub fn rotate(&mut self) {
        let mut transform = self.resolver.transform();
        transform.rotate();
        self.aspect_ratio = self.aspect_ratio.rotated();
        self.apply_user_step(transform, AffineTransform::quarter_turns(-1));
    }

    /// Mirrors the image left-to-right, keeping the selected region.
    pub fn flip(&mut self) {
        let mut transform = self.resolver.transform();
        transform.flip();
        self.apply_user_step(transform, AffineTransform::horizontal_flip());
    }

    /// Clears rotate/flip and restores the full image with the starting ratio.
    pub fn reset(&mut self) {
        self.settle.cancel();
        self.resolver.set_transform(ImageFilterTransform::IDENTITY);
        self.aspect_ratio = self.initial_aspect_ratio;
        self.editor.set_aspect_ratio(self.ratio_value(self.aspect_ratio));
        let rect = self.default_pixel_crop(self.aspect_ratio);
        self.layout_pixel_rect(rect);
    }

    /// Handles a window or interface-orientation change; the selected region
    /// is kept and refitted.
    pub fn set_viewport_bounds(&mut self, bounds: Size) {
        let pixel_rect = self.content_pixel_rect();
        self.viewport.bounds = bounds;
        self.layout_pixel_rect(pixel_rect);
    }

    pub fn set_safe_area(&mut self, safe_area: EdgeInsets) {
        let pixel_rect = self.content_pixel_rect();
        self.viewport.safe_area = safe_area;
        self.layout_pixel_rect(pixel_rect);
    }

    pub fn scroll_began(&mut self) {
        self.settle.scroll_began();
    }

    /// Pan/zoom input from the scroll view. The zoom is clamped to
    /// [`CropSession::zoom_range`] and the offset so the crop box stays over
    /// the image.
    pub fn scroll_to(&mut self, content_offset: Point, zoom_scale: f64) {
        let image = self.image_size();
        let crop = self.editor.rect();
        let (min, max) = Viewport::min_max_zoom(crop.size, image);
        if zoom_scale.is_finite() {
            self.viewport.zoom_scale = zoom_scale.max(min).min(max);
        }
        self.viewport.content_offset = content_offset;
        self.viewport.clamp_offset(&crop, image);
    }

    pub fn scroll_ended(&mut self) -> Option<SettleTicket> {
        self.settle.scroll_ended()
    }

    /// Applies a settle timer tick. Stale ticks are ignored and return `false`.
    pub fn apply_settle_tick(&mut self, tick: SettleTick) -> bool {
        if self.editor.is_dragging() || !self.settle.accept(tick) {
            return false;
        }
        match tick.stage {
            SettleStage::RevealDimming => self.dimming_revealed = true,
            SettleStage::Finalize => self.settle(),
        }
        true
    }

    /// Refits and centers the crop rectangle, zooming so the same image
    /// region stays under it.
    pub fn settle(&mut self) {
        self.zoom_to_fit(self.editor.rect());
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ratio_value(&self, aspect_ratio: AspectRatio) -> Option<f64> {
        aspect_ratio.value(self.resolver.oriented_pixel_size())
    }

    fn apply_user_step(&mut self, transform: ImageFilterTransform, step: AffineTransform) {
        self.settle.cancel();
        let old_size = self.resolver.oriented_pixel_size();
        let pixel_rect = self.content_pixel_rect();
        self.resolver.set_transform(transform);

        let mapped = step.centered_on(old_size).apply_to_rect(&pixel_rect);
        self.editor.set_aspect_ratio(self.ratio_value(self.aspect_ratio));
        self.layout_pixel_rect(mapped);
    }

    /// Unrounded crop in oriented pixels.
    fn content_pixel_rect(&self) -> Rect {
        let rect = self.editor.rect();
        Rect::from_origin_size(rect.origin + self.viewport.content_offset, rect.size)
            .scaled(self.screen_scale / self.viewport.zoom_scale)
    }

    /// Fits `pixel_rect` (oriented pixels) into the viewport and derives zoom
    /// and offset so it shows exactly that region.
    fn layout_pixel_rect(&mut self, pixel_rect: Rect) {
        let content = pixel_rect.scaled(1.0 / self.screen_scale);
        let (scale, fitted) = self.viewport.fit_scale_and_rect(content.size);
        self.viewport.zoom_scale = scale;
        self.viewport.content_offset = content.origin * scale - fitted.origin;
        self.editor.set_rect(fitted);
        self.viewport.clamp_offset(&fitted, self.image_size());
    }

    /// Scales `source` (viewport points) up to the fitted rectangle and moves
    /// the content so the image under `source` ends up under the new rectangle.
    ///
    /// The zoom never passes the maximum for the fitted rectangle. When it
    /// would, the crop shows a larger region around the same center instead.
    fn zoom_to_fit(&mut self, source: Rect) {
        let image = self.image_size();
        let (scale, fitted) = self.viewport.fit_scale_and_rect(source.size);
        let (min, max) = Viewport::min_max_zoom(fitted.size, image);
        let target = self.viewport.zoom_scale * scale;
        let zoom = target.max(min).min(max);
        if zoom < target {
            tracing::debug!(target, max, "settle zoom capped");
        }

        let factor = zoom / self.viewport.zoom_scale;
        let content_center = source.center() + self.viewport.content_offset;
        self.viewport.zoom_scale = zoom;
        self.viewport.content_offset = content_center * factor - fitted.center();
        self.editor.set_rect(fitted);
        self.viewport.clamp_offset(&fitted, image);
    }

    fn initial_pixel_crop(&self, options: &CropOptions) -> (Rect, AspectRatio) {
        let Some(rect) = options.initial_crop else {
            return (
                self.default_pixel_crop(options.aspect_ratio),
                options.aspect_ratio,
            );
        };

        let image = Rect::from_size(self.resolver.oriented_pixel_size());
        let ratio = self.ratio_value(options.aspect_ratio);
        // One pixel of slack: callers usually pass rounded rectangles.
        let ratio_matches =
            ratio.is_none_or(|value| (rect.width() - rect.height() * value).abs() <= 1.0);

        if rect.is_valid_in(&image) && ratio_matches {
            let rect = ratio.map_or(rect, |value| conform_to_ratio(&rect, value));
            return (rect, options.aspect_ratio);
        }

        tracing::warn!(
            ?rect,
            image = ?image.size,
            aspect_ratio = %options.aspect_ratio,
            "initial crop rejected, using the full image"
        );
        (image, AspectRatio::Freeform)
    }

    /// Full image, shrunk to the largest centered rectangle with the ratio.
    fn default_pixel_crop(&self, aspect_ratio: AspectRatio) -> Rect {
        let image = Rect::from_size(self.resolver.oriented_pixel_size());
        match self.ratio_value(aspect_ratio) {
            Some(value) => conform_to_ratio(&image, value),
            None => image,
        }
    }
}

/// Shrinks the longer side of `rect` about its center until `width / height == ratio`.
fn conform_to_ratio(rect: &Rect, ratio: f64) -> Rect {
    let size = if rect.width() / rect.height() > ratio {
        Size::new(rect.height() * ratio, rect.height())
    } else {
        Size::new(rect.width(), rect.width() / ratio)
    };
    Rect::centered_at(rect.center(), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::Fraction;
    use crate::editor::ToolbarPosition;
    use crate::test_utils::{assert_abs_diff_eq, assert_rect_eq};

    fn settings() -> EditorSettings {
        EditorSettings {
            toolbar_position: ToolbarPosition::None,
            toolbar_thickness: 0.0,
            content_margin: 0.0,
            ..EditorSettings::default()
        }
    }

    fn session(width: u32, height: u32, options: CropOptions) -> CropSession {
        CropSession::new(
            SourceImage::new(width, height, ImageOrientation::Up),
            options,
            settings(),
            Size::new(400.0, 400.0),
            1.0,
        )
    }

    #[test]
    fn starts_with_full_image_fitted() {
        let session = session(800, 400, CropOptions::default());

        assert_rect_eq(session.crop_rect(), Rect::new(0.0, 100.0, 400.0, 200.0));
        assert_abs_diff_eq!(session.zoom_scale(), 0.5);
        assert_eq!(session.image_pixel_rect(), Rect::new(0.0, 0.0, 800.0, 400.0));
    }

    #[test]
    fn valid_initial_crop_is_shown() {
        let options = CropOptions {
            initial_crop: Some(Rect::new(100.0, 50.0, 200.0, 100.0)),
            ..CropOptions::default()
        };
        let session = session(800, 400, options);

        assert_eq!(session.image_pixel_rect(), Rect::new(100.0, 50.0, 200.0, 100.0));
        assert_abs_diff_eq!(session.zoom_scale(), 2.0);
    }

    #[test]
    fn invalid_initial_crop_falls_back_to_freeform_full_image() {
        let options = CropOptions {
            initial_crop: Some(Rect::new(700.0, 0.0, 200.0, 100.0)),
            aspect_ratio: AspectRatio::Square,
            ..CropOptions::default()
        };
        let session = session(800, 400, options);

        assert_eq!(session.aspect_ratio(), AspectRatio::Freeform);
        assert_eq!(session.image_pixel_rect(), Rect::new(0.0, 0.0, 800.0, 400.0));
    }

    #[test]
    fn mismatched_ratio_initial_crop_falls_back() {
        let options = CropOptions {
            initial_crop: Some(Rect::new(0.0, 0.0, 300.0, 100.0)),
            aspect_ratio: AspectRatio::Square,
            ..CropOptions::default()
        };
        let session = session(800, 400, options);
        assert_eq!(session.aspect_ratio(), AspectRatio::Freeform);
    }

    #[test]
    fn locked_ratio_without_initial_crop_centers_largest_rect() {
        let options = CropOptions {
            aspect_ratio: AspectRatio::Square,
            ..CropOptions::default()
        };
        let session = session(800, 400, options);
        assert_eq!(session.image_pixel_rect(), Rect::new(200.0, 0.0, 400.0, 400.0));
    }

    #[test]
    fn square_ratio_on_wide_crop_shrinks_in_place() {
        let mut session = session(200, 100, CropOptions::default());
        // Fitted crop: (0, 100, 400, 200) at zoom 2.
        let change = session
            .set_aspect_ratio(AspectRatio::Square)
            .expect("locked ratio changes the rect");

        assert!(!change.refits());
        assert_rect_eq(session.crop_rect(), Rect::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(session.image_pixel_rect(), Rect::new(50.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn freeform_selection_changes_nothing() {
        let mut session = session(800, 400, CropOptions::default());
        let before = session.crop_rect();
        assert!(session.set_aspect_ratio(AspectRatio::Freeform).is_none());
        assert_eq!(session.crop_rect(), before);
    }

    #[test]
    fn drag_then_settle_keeps_pixel_region() {
        let mut session = session(800, 800, CropOptions::default());
        // Full image fitted at (0, 0, 400, 400), zoom 0.5.
        let start = Point::new(400.0, 400.0);
        session.handle_gesture(&GestureEvent::began(start));
        session.handle_gesture(&GestureEvent::changed(
            start - Point::new(200.0, 200.0),
            Point::new(-200.0, -200.0),
        ));
        let ticket = session
            .handle_gesture(&GestureEvent::ended(start))
            .expect("release schedules settle");

        assert_rect_eq(session.crop_rect(), Rect::new(0.0, 0.0, 200.0, 200.0));
        let before = session.image_pixel_rect();

        assert!(session.apply_settle_tick(ticket.tick(SettleStage::RevealDimming)));
        assert!(session.is_dimming_revealed());
        assert!(session.apply_settle_tick(ticket.tick(SettleStage::Finalize)));

        assert_rect_eq(session.crop_rect(), Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_abs_diff_eq!(session.zoom_scale(), 1.0);
        assert_eq!(session.image_pixel_rect(), before);
        assert_eq!(before, Rect::new(0.0, 0.0, 400.0, 400.0));
    }

    #[test]
    fn new_drag_makes_pending_settle_stale() {
        let mut session = session(800, 800, CropOptions::default());
        let corner = Point::new(400.0, 400.0);
        session.handle_gesture(&GestureEvent::began(corner));
        let ticket = session
            .handle_gesture(&GestureEvent::ended(corner))
            .expect("settle scheduled");

        session.handle_gesture(&GestureEvent::began(corner));
        assert!(!session.apply_settle_tick(ticket.tick(SettleStage::Finalize)));
    }

    #[test]
    fn scrolling_reschedules_settle() {
        let mut session = session(800, 800, CropOptions::default());
        let corner = Point::new(400.0, 400.0);
        session.handle_gesture(&GestureEvent::began(corner));
        let ticket = session
            .handle_gesture(&GestureEvent::ended(corner))
            .expect("settle scheduled");

        session.scroll_began();
        assert!(!session.apply_settle_tick(ticket.tick(SettleStage::RevealDimming)));
        let resumed = session.scroll_ended().expect("settle rescheduled");
        assert!(session.apply_settle_tick(resumed.tick(SettleStage::Finalize)));
    }

    #[test]
    fn scroll_clamps_zoom_and_offset() {
        let mut session = session(800, 800, CropOptions::default());
        let (min, max) = session.zoom_range();
        assert_abs_diff_eq!(min, 0.5);
        assert_abs_diff_eq!(max, 7.5);

        session.scroll_to(Point::new(-1000.0, 5000.0), 100.0);
        assert_abs_diff_eq!(session.zoom_scale(), 7.5);
        let image = session.image_size() * session.zoom_scale();
        let content = Rect::from_origin_size(-session.content_offset(), image);
        assert!(content.contains_rect(&session.crop_rect()));
    }

    #[test]
    fn four_rotations_restore_image_size() {
        let mut session = session(300, 200, CropOptions::default());
        for _ in 0..4 {
            session.rotate();
        }
        assert_eq!(session.image_size(), Size::new(300.0, 200.0));
        assert!(session.transform().is_identity());
    }

    #[test]
    fn rotate_keeps_selected_region_and_swaps_ratio() {
        let options = CropOptions {
            initial_crop: Some(Rect::new(0.0, 0.0, 300.0, 200.0)),
            aspect_ratio: AspectRatio::Landscape(Fraction::R2x3),
            ..CropOptions::default()
        };
        let mut session = session(600, 400, options);

        session.rotate();

        // Counter-clockwise: the top-left region moves to the bottom-left.
        assert_eq!(session.image_size(), Size::new(400.0, 600.0));
        assert_eq!(
            session.aspect_ratio(),
            AspectRatio::Portrait(Fraction::R2x3)
        );
        assert_eq!(session.image_pixel_rect(), Rect::new(0.0, 300.0, 200.0, 300.0));
    }

    #[test]
    fn flip_mirrors_selected_region() {
        let options = CropOptions {
            initial_crop: Some(Rect::new(0.0, 0.0, 200.0, 400.0)),
            ..CropOptions::default()
        };
        let mut session = session(600, 400, options);

        session.flip();

        assert!(session.transform().is_flipped());
        assert_eq!(session.image_pixel_rect(), Rect::new(400.0, 0.0, 200.0, 400.0));
    }

    #[test]
    fn reset_restores_full_image_and_initial_ratio() {
        let options = CropOptions {
            aspect_ratio: AspectRatio::Square,
            ..CropOptions::default()
        };
        let mut session = session(600, 400, options);
        session.rotate();
        session.flip();
        session.set_aspect_ratio(AspectRatio::Freeform);

        session.reset();

        assert!(session.transform().is_identity());
        assert_eq!(session.aspect_ratio(), AspectRatio::Square);
        assert_eq!(session.image_pixel_rect(), Rect::new(100.0, 0.0, 400.0, 400.0));
    }

    #[test]
    fn viewport_change_preserves_region() {
        let options = CropOptions {
            initial_crop: Some(Rect::new(100.0, 100.0, 300.0, 200.0)),
            ..CropOptions::default()
        };
        let mut session = session(800, 600, options);
        let before = session.image_pixel_rect();

        session.set_viewport_bounds(Size::new(900.0, 300.0));

        assert_eq!(session.image_pixel_rect(), before);
        assert_abs_diff_eq!(session.crop_rect().height(), 300.0);
    }

    #[test]
    fn commit_reports_state() {
        let mut session = session(800, 400, CropOptions::default());
        session.rotate();
        let info = session.commit();

        assert_eq!(info.rect, Rect::new(0.0, 0.0, 400.0, 800.0));
        assert_eq!(info.transform, session.transform());
        assert_eq!(info.aspect_ratio, AspectRatio::Freeform);
        assert_abs_diff_eq!(info.zoom_scale, 0.5);
    }

    #[test]
    fn locked_ratio_survives_drag_and_settle() {
        let options = CropOptions {
            aspect_ratio: AspectRatio::Landscape(Fraction::R9x16),
            ..CropOptions::default()
        };
        let mut session = session(1600, 900, options);
        let corner = session.crop_rect().origin;

        session.handle_gesture(&GestureEvent::began(corner));
        session.handle_gesture(&GestureEvent::changed(corner, Point::new(40.0, 3.0)));
        session.handle_gesture(&GestureEvent::ended(corner));
        session.settle();

        let rect = session.crop_rect();
        assert_abs_diff_eq!(rect.width() / rect.height(), 16.0 / 9.0, epsilon = 1e-6);
    }

    #[test]
    fn repeated_shrink_and_settle_respects_max_zoom() {
        let mut session = session(800, 800, CropOptions::default());

        for round in 0..3 {
            let rect = session.crop_rect();
            let corner = Point::new(rect.max_x(), rect.max_y());
            session.handle_gesture(&GestureEvent::began(corner));
            session.handle_gesture(&GestureEvent::changed(corner, Point::new(-1000.0, -1000.0)));
            session.handle_gesture(&GestureEvent::ended(corner));
            session.settle();

            let (min, max) = session.zoom_range();
            let zoom = session.zoom_scale();
            assert!(zoom <= max + 1e-9, "round {round}: zoom {zoom} > max {max}");
            assert!(zoom >= min - 1e-9, "round {round}: zoom {zoom} < min {min}");
            let content = session.viewport().content_rect(session.image_size());
            assert!(content.contains_rect(&session.crop_rect()), "round {round}");
        }

        // At the maximum zoom the crop covers a fifteenth of the image.
        let pixels = session.image_pixel_rect();
        assert!(pixels.width() >= (800.0_f64 / 15.0).floor());
    }

    #[test]
    fn safe_area_change_keeps_region_inside_new_bounds() {
        let options = CropOptions {
            initial_crop: Some(Rect::new(100.0, 100.0, 300.0, 200.0)),
            ..CropOptions::default()
        };
        let mut session = session(800, 600, options);
        let before = session.image_pixel_rect();

        let safe_area = EdgeInsets::new(40.0, 10.0, 30.0, 20.0);
        session.set_safe_area(safe_area);

        assert_eq!(session.image_pixel_rect(), before);
        let bounds = session.viewport().crop_bounds();
        assert_rect_eq(bounds, Rect::new(10.0, 40.0, 370.0, 330.0));
        assert!(bounds.contains_rect(&session.crop_rect()));

        let rect = session.crop_rect();
        let inset = session.content_inset();
        assert_abs_diff_eq!(inset.top, rect.min_y());
        assert_abs_diff_eq!(inset.left, rect.min_x());
        assert_abs_diff_eq!(inset.bottom, 400.0 - rect.max_y());
        assert_abs_diff_eq!(inset.right, 400.0 - rect.max_x());
        assert!(inset.top >= safe_area.top && inset.right >= safe_area.right);
    }
}
