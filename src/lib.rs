//! Hitsujun (筆順, "stroke order") is a kanji stroke-order animation engine.
//!
//! It takes a stroke-order SVG (one `<path>` per stroke, in draw order) and draws it stroke
//! by stroke on a timeline that can be played, paused, resumed and scrubbed, always showing
//! the same picture for the same position.
//!
//! # Pipeline overview
//!
//! 1. **Mount**: `svg text -> Canvas` (strokes, labels and gradients in document order)
//! 2. **Extract**: `stroke lengths -> StrokeTable` (each stroke placed on a length-unit axis
//!    and a millisecond axis)
//! 3. **Drive**: [`Driver`] operations (`play`, `pause`, `resume`, `seek`, `cancel`) change
//!    stroke presentation through the [`StrokeSurface`] capability and publish the position
//!    into [`CanvasState`]
//! 4. **Control**: [`Transport`] and [`Scrubber`] turn button presses and drags into driver
//!    calls
//!
//! Key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Host-driven time**: nothing runs on its own; the host calls [`Driver::tick`] (or
//!   `on_frame` / `on_timers`) and every canvas advances from its own schedule.
//! - **One writer**: only the driver touches stroke presentation. Widgets read state and call
//!   driver operations.
//! - **No errors for UI misuse**: the animation core logs and ignores double pauses, seeks on
//!   unmounted canvases and the like; errors come only from sources, mounting and config.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod canvas;
mod config;
mod controls;
mod foundation;
mod source;

pub use animation::clock::{Clock, ManualClock, SystemClock, elapsed_since, ms_to_unit, unit_to_ms};
pub use animation::driver::{Driver, MountOptions};
pub use animation::ease::TransitionTiming;
pub use animation::extract::{StrokeMeta, StrokeTable, compute_metadata, prime_surface};
pub use animation::options::{AnimationOptions, AnimationOverrides};
pub use animation::schedule::{Callback, CallbackHandle, CallbackSchedule};
pub use animation::state::{AnimationStore, CanvasState, PlaybackPhase, StateSnapshot};
pub use canvas::geometry::{ARCLEN_ACCURACY, parse_path_data, path_bounds, path_length};
pub use canvas::mount::{Canvas, GradientSpan, LabelElement, StrokeElement, StrokeStyle};
pub use canvas::surface::{StrokeSurface, StrokeTransition};
pub use config::PlayerConfig;
pub use controls::scrubber::{Scrubber, ScrubberView};
pub use controls::transport::{
    Transport, TransportView, can_step_backward, can_step_forward, step_backward_target,
    step_forward_target,
};
pub use foundation::core::{BezPath, CanvasId, Point, Rect, Span};
pub use foundation::error::{HitsujunError, HitsujunResult};
pub use foundation::math::{approx_eq, clamp};
pub use source::metadata::{JsonMetadataSource, KanjiMetadata, MetadataSource};
pub use source::svg::{DirStrokeSource, StrokeSource, extract_svg_element, svg_file_name};
