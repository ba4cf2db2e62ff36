use alloc::boxed::Box;
use core::time::Duration;

use scroll_recycler::{
    ScrollDelegate, ScrollUpdate, Scroller, ScrollerError, ScrollerEvent, ScrollerOptions,
};

use crate::{JumpRequest, SnapOptions, Tween, jump_target};

/// Callback run once a jump reaches its target.
pub type JumpComplete = Box<dyn FnOnce() + Send>;

enum Completion {
    None,
    Callback(JumpComplete),
    Snap { view_index: usize, data_index: usize },
}

struct ActiveTween {
    tween: Tween,
    completion: Completion,
}

/// A framework-neutral controller that wraps a [`Scroller`] and adds navigation:
/// jumps to a data index (immediate or tweened) and velocity-triggered snapping.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `tick(dt)` once per frame (deferred reloads, scrolling state, tween steps)
///
/// At most one tween runs at a time. Starting a jump or snap, a user scroll, and
/// [`Controller::cancel_tween`] all cancel the running tween without calling its
/// completion.
pub struct Controller<D: ScrollDelegate> {
    s: Scroller<D>,
    snap: SnapOptions,
    tween: Option<ActiveTween>,
    snap_jumping: bool,
    snap_inertia: bool,
}

impl<D: ScrollDelegate> Controller<D> {
    pub fn new(options: ScrollerOptions, snap: SnapOptions) -> Self {
        Self::from_scroller(Scroller::new(options), snap)
    }

    pub fn with_delegate(options: ScrollerOptions, snap: SnapOptions, delegate: D) -> Self {
        Self::from_scroller(Scroller::with_delegate(options, delegate), snap)
    }

    pub fn from_scroller(s: Scroller<D>, snap: SnapOptions) -> Self {
        let snap_inertia = s.inertia();
        Self {
            s,
            snap,
            tween: None,
            snap_jumping: false,
            snap_inertia,
        }
    }

    pub fn scroller(&self) -> &Scroller<D> {
        &self.s
    }

    pub fn scroller_mut(&mut self) -> &mut Scroller<D> {
        &mut self.s
    }

    pub fn into_scroller(mut self) -> Scroller<D> {
        self.cancel_tween();
        self.s
    }

    pub fn snap_options(&self) -> &SnapOptions {
        &self.snap
    }

    pub fn set_snap_options(&mut self, snap: SnapOptions) {
        self.snap = snap;
    }

    pub fn is_tweening(&self) -> bool {
        self.tween.is_some()
    }

    pub fn is_snap_jumping(&self) -> bool {
        self.snap_jumping
    }

    /// Target of the running tween, if any.
    pub fn tween_target(&self) -> Option<f32> {
        self.tween.as_ref().map(|t| t.tween.to)
    }

    /// Stops the running tween where it is. Its completion is dropped, not called.
    pub fn cancel_tween(&mut self) {
        let Some(active) = self.tween.take() else {
            return;
        };
        rdebug!(to = active.tween.to, "Controller: tween cancelled");
        if let Completion::Snap { .. } = active.completion {
            self.end_snap();
        }
        self.s.emit(ScrollerEvent::TweeningChanged(false));
    }

    fn end_snap(&mut self) {
        self.snap_jumping = false;
        self.s.set_inertia(self.snap_inertia);
    }

    pub fn on_viewport_size(&mut self, viewport_size: f32) -> Result<(), ScrollerError> {
        self.s.set_viewport_size(viewport_size)
    }

    /// Call this when the UI reports a scroll change (e.g. user wheel/drag).
    ///
    /// This cancels any active tween, then starts a snap if the velocity has slowed
    /// down enough.
    pub fn on_scroll(
        &mut self,
        position: f32,
        velocity: f32,
    ) -> Result<ScrollUpdate, ScrollerError> {
        self.cancel_tween();
        let update = self.s.on_scroll(position, velocity)?;
        if !self.snap_jumping && self.snap.should_snap(velocity) {
            self.snap()?;
        }
        Ok(update)
    }

    /// Jumps so `data_index` sits at `request`'s anchor. See [`Self::jump_to_index_then`].
    pub fn jump_to_index(
        &mut self,
        data_index: usize,
        request: &JumpRequest,
    ) -> Result<f32, ScrollerError> {
        self.start_jump(data_index, request, Completion::None)
    }

    /// Jumps so `data_index` sits at `request`'s anchor, then runs `on_complete`.
    ///
    /// An immediate request (or one whose target equals the current position) lands and
    /// completes before returning. Otherwise a tween starts and `on_complete` runs from the
    /// [`Self::tick`] that reaches the target. Returns the target position.
    pub fn jump_to_index_then(
        &mut self,
        data_index: usize,
        request: &JumpRequest,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> Result<f32, ScrollerError> {
        self.start_jump(
            data_index,
            request,
            Completion::Callback(Box::new(on_complete)),
        )
    }

    /// Snaps the item under the watch offset onto the configured anchor.
    ///
    /// Host inertia is switched off until the snap completes or is cancelled.
    pub fn snap(&mut self) -> Result<(), ScrollerError> {
        let count = self.s.item_count();
        if count == 0 {
            return Ok(());
        }
        self.cancel_tween();

        self.snap_jumping = true;
        self.s.set_velocity(0.0);
        self.snap_inertia = self.s.inertia();
        self.s.set_inertia(false);

        let watch = self.s.scroll_position()
            + self.s.viewport_size() * self.snap.watch_offset.clamp(0.0, 1.0);
        let view_index = self.s.view_index_at_position(watch);
        let data_index = view_index % count;
        rdebug!(view_index, data_index, "Controller::snap");

        let request = self.snap.jump_request();
        let completion = Completion::Snap {
            view_index,
            data_index,
        };
        match self.start_jump(data_index, &request, completion) {
            Ok(_) => Ok(()),
            Err(err) => {
                self.end_snap();
                Err(err)
            }
        }
    }

    fn start_jump(
        &mut self,
        data_index: usize,
        request: &JumpRequest,
        completion: Completion,
    ) -> Result<f32, ScrollerError> {
        self.cancel_tween();

        let current = self.s.scroll_position();
        let Some(target) = jump_target(&self.s, data_index, request) else {
            self.finish(completion);
            return Ok(current);
        };
        if target == current {
            self.finish(completion);
            return Ok(target);
        }

        if request.is_immediate() {
            self.s.set_scroll_position(target)?;
            self.finish(completion);
            return Ok(self.s.scroll_position());
        }

        rdebug!(
            from = current,
            to = target,
            duration_ms = request.duration.as_millis() as u64,
            "Controller: tween started"
        );
        self.s.set_velocity(0.0);
        self.tween = Some(ActiveTween {
            tween: Tween::new(current, target, request.duration, request.easing),
            completion,
        });
        self.s.emit(ScrollerEvent::TweeningChanged(true));
        Ok(target)
    }

    fn finish(&mut self, completion: Completion) {
        match completion {
            Completion::None => {}
            Completion::Callback(f) => f(),
            Completion::Snap {
                view_index,
                data_index,
            } => {
                self.end_snap();
                self.s.emit(ScrollerEvent::Snapped {
                    view_index,
                    data_index,
                });
            }
        }
    }

    /// Advances the controller by `dt`.
    ///
    /// Runs the engine's per-frame work, then steps the active tween. Returns the new
    /// scroll position when a tween moved it, so the host can mirror it into its
    /// container.
    pub fn tick(&mut self, dt: Duration) -> Result<Option<f32>, ScrollerError> {
        self.s.tick()?;

        let Some(active) = self.tween.as_mut() else {
            return Ok(None);
        };
        let step = active.tween.advance(dt);
        let forward = active.tween.is_forward();

        if !step.done {
            let mut position = step.position;
            if let Some(layout) = self.s.loop_layout() {
                let leading = self.s.options().leading_padding();
                if let Some(local) = layout.wrap_directed(position - leading, forward) {
                    position = local + leading;
                }
            }
            if let Err(err) = self.s.set_scroll_position(position) {
                self.cancel_tween();
                return Err(err);
            }
            return Ok(Some(self.s.scroll_position()));
        }

        let Some(active) = self.tween.take() else {
            return Ok(None);
        };
        if let Err(err) = self.s.set_scroll_position(active.tween.to) {
            if let Completion::Snap { .. } = active.completion {
                self.end_snap();
            }
            self.s.emit(ScrollerEvent::TweeningChanged(false));
            return Err(err);
        }
        rdebug!(to = active.tween.to, "Controller: tween finished");
        self.finish(active.completion);
        self.s.emit(ScrollerEvent::TweeningChanged(false));
        Ok(Some(self.s.scroll_position()))
    }
}

impl<D: ScrollDelegate> core::fmt::Debug for Controller<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("scroller", &self.s)
            .field("snap", &self.snap)
            .field("tween", &self.tween.as_ref().map(|t| t.tween))
            .field("snap_jumping", &self.snap_jumping)
            .finish_non_exhaustive()
    }
}
