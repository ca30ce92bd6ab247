use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{DrawableArea, TimeMapper, Timestamp};

use super::{BoundUpdate, PointerButton, PointerEvent, RangeChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionPhase {
    #[default]
    Idle,
    /// A fresh range is being defined by an active drag.
    Drafting,
    /// A finalized range that persists until replaced or cleared.
    Committed,
    /// The committed range is being translated as a whole.
    Dragging,
}

/// Geometry the state machine needs to interpret pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionContext {
    pub mapper: TimeMapper,
    pub area: DrawableArea,
}

impl SelectionContext {
    #[must_use]
    pub fn new(mapper: TimeMapper, area: DrawableArea) -> Self {
        Self { mapper, area }
    }
}

/// Pointer-driven selection record.
///
/// Time bounds are authoritative and stored ordered once both are known.
/// Pixel bounds are a projection of them for the current mapper. Drafts
/// project pixels from times, drags translate pixels and re-derive times,
/// and resizes re-derive pixels from times.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    phase: SelectionPhase,
    start_pixel: Option<f64>,
    end_pixel: Option<f64>,
    start_time: Option<Timestamp>,
    end_time: Option<Timestamp>,
    /// Press point of the current draft, kept apart from the ordered bounds.
    draft_origin_time: Option<Timestamp>,
    /// Press x while drafting, last pointer x while dragging.
    anchor_pointer_x: f64,
}

impl Selection {
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    fn draft(origin_x: f64, origin_time: Timestamp, mapper: TimeMapper) -> Self {
        Self {
            phase: SelectionPhase::Drafting,
            start_pixel: mapper.time_to_pixel(Some(origin_time)),
            end_pixel: None,
            start_time: Some(origin_time),
            end_time: None,
            draft_origin_time: Some(origin_time),
            anchor_pointer_x: origin_x,
        }
    }

    fn spanning(
        phase: SelectionPhase,
        pixels: (f64, f64),
        times: (Timestamp, Timestamp),
        anchor_pointer_x: f64,
    ) -> Self {
        Self {
            phase,
            start_pixel: Some(pixels.0.min(pixels.1)),
            end_pixel: Some(pixels.0.max(pixels.1)),
            start_time: Some(times.0.min(times.1)),
            end_time: Some(times.0.max(times.1)),
            draft_origin_time: None,
            anchor_pointer_x,
        }
    }

    /// Draft covering `origin_time` and `pointer_time`, with pixels projected
    /// through the current mapper.
    fn drafted(
        origin_time: Timestamp,
        pointer_time: Timestamp,
        anchor_pointer_x: f64,
        mapper: TimeMapper,
    ) -> Option<Self> {
        let times = (origin_time.min(pointer_time), origin_time.max(pointer_time));
        let pixels = project(mapper, times)?;
        Some(Self {
            draft_origin_time: Some(origin_time),
            ..Self::spanning(SelectionPhase::Drafting, pixels, times, anchor_pointer_x)
        })
    }

    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == SelectionPhase::Idle
    }

    #[must_use]
    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> Option<Timestamp> {
        self.end_time
    }

    #[must_use]
    pub fn start_pixel(&self) -> Option<f64> {
        self.start_pixel
    }

    #[must_use]
    pub fn end_pixel(&self) -> Option<f64> {
        self.end_pixel
    }

    #[must_use]
    pub fn anchor_pointer_x(&self) -> f64 {
        self.anchor_pointer_x
    }

    /// Ordered time bounds when both are known.
    #[must_use]
    pub fn time_bounds(&self) -> Option<(Timestamp, Timestamp)> {
        Some((self.start_time?, self.end_time?))
    }

    /// Ordered pixel bounds when both are known.
    #[must_use]
    pub fn pixel_bounds(&self) -> Option<(f64, f64)> {
        Some((self.start_pixel?, self.end_pixel?))
    }

    #[must_use]
    pub fn pixel_width(&self) -> Option<f64> {
        self.pixel_bounds().map(|(start, end)| end - start)
    }

    /// Whether `x` hits a committed selection.
    #[must_use]
    pub fn contains_pixel(&self, x: f64) -> bool {
        self.phase == SelectionPhase::Committed
            && self
                .pixel_bounds()
                .is_some_and(|(start, end)| x >= start && x <= end)
    }

    /// Re-derives pixel bounds from the stored time bounds.
    ///
    /// Phase, times and anchors are untouched, so projecting twice with equal
    /// mappers yields equal records. The anchor stays in pointer space on
    /// purpose: drafts only compare it against the release x, and drags only
    /// take deltas from it, so neither reads it as a selection pixel.
    #[must_use]
    pub fn reprojected(&self, mapper: TimeMapper) -> Self {
        Self {
            start_pixel: mapper.time_to_pixel(self.start_time),
            end_pixel: mapper.time_to_pixel(self.end_time),
            ..*self
        }
    }
}

/// Outcome of feeding one event to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub selection: Selection,
    pub emitted: Option<RangeChange>,
}

impl Transition {
    fn unchanged(selection: &Selection) -> Self {
        Self {
            selection: *selection,
            emitted: None,
        }
    }

    fn emit(selection: Selection, change: RangeChange) -> Self {
        Self {
            selection,
            emitted: Some(change),
        }
    }

    #[must_use]
    pub fn changed_from(&self, previous: &Selection) -> bool {
        self.selection != *previous
    }
}

/// Applies one pointer event to `current` and returns the full next record.
///
/// Events from non-primary buttons and events not covered by the transition
/// table leave the selection untouched and emit nothing.
#[must_use]
pub fn transition(current: &Selection, event: PointerEvent, ctx: &SelectionContext) -> Transition {
    if event
        .button()
        .is_some_and(|button| button != PointerButton::Primary)
    {
        return Transition::unchanged(current);
    }

    let next = match (current.phase, event) {
        (SelectionPhase::Idle, PointerEvent::Down { x, .. }) if ctx.area.contains(x) => {
            start_draft(x, ctx, BoundUpdate::Keep)
        }
        (SelectionPhase::Drafting, PointerEvent::Move { x, .. }) if ctx.area.contains(x) => {
            extend_draft(current, x, ctx)
        }
        (SelectionPhase::Drafting, PointerEvent::Up { x, .. }) => finish_draft(current, x, ctx),
        (SelectionPhase::Committed, PointerEvent::Down { x, .. }) if ctx.area.contains(x) => {
            if current.contains_pixel(x) {
                Transition {
                    selection: Selection {
                        phase: SelectionPhase::Dragging,
                        anchor_pointer_x: x,
                        ..*current
                    },
                    emitted: None,
                }
            } else {
                start_draft(x, ctx, BoundUpdate::Clear)
            }
        }
        (SelectionPhase::Dragging, PointerEvent::Move { x, .. }) => drag(current, x, ctx),
        (SelectionPhase::Dragging, PointerEvent::Up { .. }) => end_drag(current),
        (SelectionPhase::Drafting | SelectionPhase::Dragging, PointerEvent::Leave) => {
            finalize_on_leave(current)
        }
        _ => Transition::unchanged(current),
    };

    trace!(
        from = ?current.phase,
        to = ?next.selection.phase,
        event = ?event,
        emitted = ?next.emitted,
        "selection transition"
    );
    next
}

fn start_draft(x: f64, ctx: &SelectionContext, to: BoundUpdate) -> Transition {
    let origin_time = ctx.mapper.pixel_to_time(x);
    Transition::emit(
        Selection::draft(x, origin_time, ctx.mapper),
        RangeChange::new(BoundUpdate::Set(origin_time), to),
    )
}

fn extend_draft(current: &Selection, x: f64, ctx: &SelectionContext) -> Transition {
    let Some(origin_time) = current.draft_origin_time else {
        return Transition::unchanged(current);
    };
    let pointer_time = ctx.mapper.pixel_to_time(x);
    match Selection::drafted(origin_time, pointer_time, current.anchor_pointer_x, ctx.mapper) {
        Some(selection) => {
            Transition::emit(selection, RangeChange::span(origin_time, pointer_time))
        }
        None => Transition::unchanged(current),
    }
}

fn finish_draft(current: &Selection, x: f64, ctx: &SelectionContext) -> Transition {
    if current.end_time.is_none() && x == current.anchor_pointer_x {
        return Transition::emit(Selection::idle(), RangeChange::cleared());
    }

    let times = match (current.time_bounds(), current.draft_origin_time) {
        (Some(times), _) => times,
        // Released elsewhere without an in-area move: the release point closes the range.
        (None, Some(origin_time)) => (origin_time, ctx.mapper.pixel_to_time(ctx.area.clamp(x))),
        (None, None) => return Transition::emit(Selection::idle(), RangeChange::cleared()),
    };
    // Pixels come from the current mapper; the surface may have resized mid-gesture.
    let Some(pixels) = project(ctx.mapper, times) else {
        return Transition::emit(Selection::idle(), RangeChange::cleared());
    };

    let selection = Selection::spanning(
        SelectionPhase::Committed,
        pixels,
        times,
        current.anchor_pointer_x,
    );
    Transition::emit(selection, RangeChange::span(times.0, times.1))
}

fn project(mapper: TimeMapper, times: (Timestamp, Timestamp)) -> Option<(f64, f64)> {
    Some((
        mapper.time_to_pixel(Some(times.0))?,
        mapper.time_to_pixel(Some(times.1))?,
    ))
}

/// Translates `[start, start + width]` by `delta` while keeping it inside `area`.
///
/// The window is clamped as a whole so its width never changes; a window
/// wider than the area is fitted to the area instead.
#[must_use]
pub fn translate_within(start: f64, width: f64, delta: f64, area: DrawableArea) -> (f64, f64) {
    if width >= area.width() {
        return (area.left, area.right);
    }
    let new_start = (start + delta).clamp(area.left, area.right - width);
    (new_start, new_start + width)
}

fn drag(current: &Selection, x: f64, ctx: &SelectionContext) -> Transition {
    let Some((start, end)) = current.pixel_bounds() else {
        return Transition::unchanged(current);
    };
    let delta = x - current.anchor_pointer_x;
    let (new_start, new_end) = translate_within(start, end - start, delta, ctx.area);
    let start_time = ctx.mapper.pixel_to_time(new_start);
    let end_time = ctx.mapper.pixel_to_time(new_end);

    let selection = Selection::spanning(
        SelectionPhase::Dragging,
        (new_start, new_end),
        (start_time, end_time),
        x,
    );
    Transition::emit(selection, RangeChange::span(start_time, end_time))
}

fn end_drag(current: &Selection) -> Transition {
    let Some((start_time, end_time)) = current.time_bounds() else {
        return Transition::emit(Selection::idle(), RangeChange::cleared());
    };
    let selection = Selection {
        phase: SelectionPhase::Committed,
        ..*current
    };
    Transition::emit(selection, RangeChange::span(start_time, end_time))
}

fn finalize_on_leave(current: &Selection) -> Transition {
    match (current.pixel_bounds(), current.time_bounds()) {
        (Some(pixels), Some(times)) => Transition::emit(
            Selection::spanning(
                SelectionPhase::Committed,
                pixels,
                times,
                current.anchor_pointer_x,
            ),
            RangeChange::span(times.0, times.1),
        ),
        // A draft that never got an end bound has no range to keep.
        _ => Transition::emit(Selection::idle(), RangeChange::cleared()),
    }
}
