use std::time::Duration;

use tracing::debug;

use crate::core::frame::Frame;
use crate::core::source::FrameSource;
use crate::core::surface::Surface;
use crate::error::{Result, SpinError};

/// Cadence of the automatic demo rotation.
pub const DEMO_FRAME_INTERVAL: Duration = Duration::from_millis(25);

/// Pointer input fed to the spinner by its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Primary button pressed at horizontal position `x`.
    Down { x: i32 },
    /// Absolute-position motion while held. The spinner derives the delta
    /// from consecutive coordinates.
    MoveTo { x: i32 },
    /// Relative motion while held, for hosts that report movement deltas
    /// directly.
    MoveBy { dx: i32 },
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Active { last_x: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoPhase {
    Disabled,
    /// Requested at construction; starts once the frames arrive.
    Armed,
    Running,
    Finished,
}

/// Cycles through a fixed set of decoded frames on an owned surface,
/// simulating rotation of the photographed object.
///
/// The spinner performs no IO. The host loads the frames (see
/// [`FrameLoader`](crate::core::loader::FrameLoader)), delivers them once via
/// [`attach_frames`](Self::attach_frames), and forwards pointer input and
/// demo ticks. Every frame change redraws the whole surface.
pub struct FrameSpinner<S> {
    sources: Vec<FrameSource>,
    frames: Vec<Frame>,
    current: usize,
    ready: bool,
    drag: DragState,
    demo: DemoPhase,
    surface: S,
}

impl<S: Surface> FrameSpinner<S> {
    /// Fails with [`SpinError::NoSources`] when the source list is empty.
    pub fn new(sources: Vec<FrameSource>, surface: S, demo_mode: bool) -> Result<Self> {
        if sources.is_empty() {
            return Err(SpinError::NoSources);
        }
        Ok(Self {
            sources,
            frames: Vec::new(),
            current: 0,
            ready: false,
            drag: DragState::Idle,
            demo: if demo_mode {
                DemoPhase::Armed
            } else {
                DemoPhase::Disabled
            },
            surface,
        })
    }

    /// Deliver the complete decoded frame set, in source order.
    ///
    /// Sizes the surface to the first frame, marks the spinner ready and
    /// draws once; a second delivery is ignored. The loader guarantees the
    /// set is complete, so partial sets never reach this point.
    pub fn attach_frames(&mut self, frames: Vec<Frame>) {
        if self.ready || frames.is_empty() {
            debug!("Ignoring frame delivery (ready={})", self.ready);
            return;
        }
        debug_assert_eq!(frames.len(), self.sources.len());

        let (width, height) = (frames[0].width(), frames[0].height());
        self.frames = frames;
        self.surface.resize(width, height);
        self.ready = true;

        if self.demo == DemoPhase::Armed {
            self.start_demo();
        } else {
            self.update(0);
        }
    }

    /// Step the current frame by `direction` and redraw.
    ///
    /// The index wraps with floor semantics: one step back from frame 0
    /// lands on the last frame. Does nothing until the frames are attached.
    pub fn update(&mut self, direction: isize) {
        if !self.ready {
            return;
        }
        let count = self.frames.len() as isize;
        self.current = (self.current as isize + direction).rem_euclid(count) as usize;
        self.surface.draw_image(&self.frames[self.current], 0, 0);
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x } => {
                // A drag that starts before the frames arrive is meaningless;
                // stay idle so later motion does not step frames.
                if self.ready {
                    self.drag = DragState::Active { last_x: x };
                }
            }
            PointerEvent::MoveTo { x } => {
                if let DragState::Active { last_x } = self.drag {
                    self.drag = DragState::Active { last_x: x };
                    self.step_by_delta(x - last_x);
                }
            }
            PointerEvent::MoveBy { dx } => {
                if matches!(self.drag, DragState::Active { .. }) {
                    self.step_by_delta(dx);
                }
            }
            PointerEvent::Up | PointerEvent::Cancel => {
                self.drag = DragState::Idle;
            }
        }
    }

    /// One frame step per move event, by direction only; the magnitude of a
    /// fast drag does not multiply into extra steps.
    fn step_by_delta(&mut self, delta: i32) {
        match delta.cmp(&0) {
            std::cmp::Ordering::Greater => self.update(1),
            std::cmp::Ordering::Less => self.update(-1),
            std::cmp::Ordering::Equal => {}
        }
    }

    /// Begin one automatic forward pass through all frames. No-op until
    /// ready. The host calls [`demo_step`](Self::demo_step) every
    /// [`DEMO_FRAME_INTERVAL`] while [`demo_running`](Self::demo_running).
    pub fn start_demo(&mut self) {
        if !self.ready {
            return;
        }
        self.update(0);
        self.demo = DemoPhase::Running;
    }

    /// Advance the demo rotation by one frame. Once the last frame is
    /// reached the pass finishes and the host's timer stops with it.
    pub fn demo_step(&mut self) {
        if !self.ready || self.demo != DemoPhase::Running {
            return;
        }
        self.update(1);
        if self.current == self.frames.len() - 1 {
            self.demo = DemoPhase::Finished;
        }
    }

    pub fn demo_running(&self) -> bool {
        self.demo == DemoPhase::Running
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Active { .. })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of decoded frames; zero until the set is attached.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> &[FrameSource] {
        &self.sources
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.current)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
