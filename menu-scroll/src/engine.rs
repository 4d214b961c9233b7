use crate::{AnchorKey, AnchorMap, Easing, FrameScheduler, ScrollSurface, Tween};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Idle,
    /// Mounted, but the scrollable extent has not been measured yet.
    Measuring,
    Animating,
}

/// Geometry reported by the adapter on mount, resize and content growth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutMetrics {
    pub content_height: u64,
    pub viewport_height: u64,
}

impl LayoutMetrics {
    pub fn new(content_height: u64, viewport_height: u64) -> Self {
        Self {
            content_height,
            viewport_height,
        }
    }

    /// Largest reachable scroll offset.
    pub fn scroll_extent(&self) -> u64 {
        self.content_height.saturating_sub(self.viewport_height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOptions {
    /// Height of the fixed header; sections land just below it.
    pub header_offset: u64,
    pub duration_ms: u64,
    /// How long the destination section stays highlighted after arrival.
    pub highlight_ms: u64,
    pub easing: Easing,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            header_offset: 80,
            duration_ms: 600,
            highlight_ms: 1500,
            easing: Easing::EaseInOutQuad,
        }
    }
}

/// What one `tick` decided. Adapters that do not use [`ScrollEngine::pump`] apply it themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<K> {
    /// The offset to write this frame, if animating.
    pub scroll_to: Option<u64>,
    /// Set on the frame the animation reaches its destination.
    pub arrived: Option<K>,
    pub highlight_cleared: Option<K>,
    /// Another frame is needed.
    pub next_frame: bool,
    /// Nothing to animate, but a highlight expires in this many ms.
    pub wake_in_ms: Option<u64>,
}

impl<K> Frame<K> {
    fn empty() -> Self {
        Self {
            scroll_to: None,
            arrived: None,
            highlight_cleared: None,
            next_frame: false,
            wake_in_ms: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Run<K> {
    key: K,
    tween: Tween,
}

#[derive(Clone, Debug)]
struct Highlight<K> {
    key: K,
    until_ms: u64,
}

/// Scroll-to-section state machine.
///
/// The engine holds no UI objects and no clock. Adapters drive it by calling:
/// - `mount` / `remeasure` / `relayout` when layout changes
/// - `on_scroll` when the viewport reports a scroll offset
/// - `select` when the user picks a section
/// - `tick(now_ms)` or `pump(now_ms, ..)` once per frame while animating
///
/// Selecting while an animation runs restarts from the current, possibly mid-flight, offset.
/// Only the latest run ever writes the offset.
#[derive(Clone, Debug)]
pub struct ScrollEngine<K> {
    options: ScrollOptions,
    anchors: AnchorMap<K>,
    extent: Option<u64>,
    offset: u64,
    measuring: bool,
    run: Option<Run<K>>,
    highlight: Option<Highlight<K>>,
}

impl<K: AnchorKey> ScrollEngine<K> {
    pub fn new(options: ScrollOptions) -> Self {
        Self {
            options,
            anchors: AnchorMap::new(),
            extent: None,
            offset: 0,
            measuring: false,
            run: None,
            highlight: None,
        }
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    /// Takes effect from the next `select`; a running animation keeps its tween.
    pub fn set_options(&mut self, options: ScrollOptions) {
        self.options = options;
    }

    pub fn phase(&self) -> Phase {
        if self.run.is_some() {
            Phase::Animating
        } else if self.measuring {
            Phase::Measuring
        } else {
            Phase::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.offset
    }

    /// The last measured scrollable extent, `None` before the first measurement after mount.
    pub fn extent(&self) -> Option<u64> {
        self.extent
    }

    pub fn anchors(&self) -> &AnchorMap<K> {
        &self.anchors
    }

    pub fn anchors_mut(&mut self) -> &mut AnchorMap<K> {
        &mut self.anchors
    }

    pub fn register_anchor(&mut self, key: K, top: u64) {
        self.anchors.register(key, top);
    }

    pub fn invalidate_anchors(&mut self) {
        self.anchors.invalidate();
    }

    /// The section that was most recently arrived at, while its highlight lasts.
    pub fn highlighted(&self) -> Option<&K> {
        self.highlight.as_ref().map(|h| &h.key)
    }

    /// Content is mounting; forget any previous measurement until `remeasure` is called.
    pub fn mount(&mut self) {
        self.extent = None;
        self.measuring = true;
        strace!("mount");
    }

    /// Replaces the scrollable extent with `content - viewport` (never negative).
    ///
    /// A running animation is not interrupted; its destination was clamped when it started.
    pub fn remeasure(&mut self, metrics: LayoutMetrics) -> u64 {
        let extent = metrics.scroll_extent();
        self.extent = Some(extent);
        self.measuring = false;
        sdebug!(
            content_height = metrics.content_height,
            viewport_height = metrics.viewport_height,
            extent,
            "remeasure"
        );
        extent
    }

    /// Remeasures and swaps in the section positions of a new layout.
    pub fn relayout(
        &mut self,
        metrics: LayoutMetrics,
        sections: impl IntoIterator<Item = (K, u64)>,
    ) -> u64 {
        self.anchors.invalidate();
        for (key, top) in sections {
            self.anchors.register(key, top);
        }
        self.remeasure(metrics)
    }

    /// Records an offset observed on the surface (user scrolling, or our own writes echoed back).
    pub fn on_scroll(&mut self, offset: u64) {
        self.offset = offset;
    }

    /// Stops the current animation where it is. The highlight, if any, still expires normally.
    pub fn cancel_animation(&mut self) {
        self.run = None;
    }

    /// The offset that brings `key`'s section just below the header, clamped to the extent.
    pub fn target_for(&self, key: &K) -> Option<u64> {
        let top = self.anchors.get(key)?;
        let target = top.saturating_sub(self.options.header_offset);
        Some(match self.extent {
            Some(extent) => target.min(extent),
            None => target,
        })
    }

    /// Starts (or restarts) an animation towards `key`'s section.
    ///
    /// Returns the destination offset, or `None` without touching any state when `key` has no
    /// registered anchor yet.
    pub fn select(&mut self, key: K, now_ms: u64) -> Option<u64> {
        let Some(to) = self.target_for(&key) else {
            sdebug!(now_ms, "select: section not rendered yet");
            return None;
        };
        let from = self.offset;
        sdebug!(
            from,
            to,
            now_ms,
            restart = self.run.is_some(),
            "select"
        );
        let tween = Tween::new(
            from,
            to,
            now_ms,
            self.options.duration_ms,
            self.options.easing,
        );
        self.run = Some(Run { key, tween });
        Some(to)
    }

    /// Like [`ScrollEngine::select`], and asks `scheduler` for the first frame.
    pub fn select_and_schedule(
        &mut self,
        key: K,
        now_ms: u64,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<u64> {
        let to = self.select(key, now_ms)?;
        scheduler.request_frame();
        Some(to)
    }

    /// Advances the engine to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Frame<K> {
        let mut frame = Frame::empty();

        if self.highlight.as_ref().is_some_and(|h| now_ms >= h.until_ms) {
            frame.highlight_cleared = self.highlight.take().map(|h| h.key);
        }

        if let Some(run) = self.run.take() {
            let offset = run.tween.sample(now_ms);
            self.offset = offset;
            frame.scroll_to = Some(offset);
            strace!(offset, now_ms, "frame");

            if run.tween.is_done(now_ms) {
                sdebug!(offset, now_ms, "arrived");
                if let Some(previous) = self.highlight.take() {
                    frame.highlight_cleared = Some(previous.key);
                }
                self.highlight = Some(Highlight {
                    key: run.key.clone(),
                    until_ms: now_ms.saturating_add(self.options.highlight_ms),
                });
                frame.arrived = Some(run.key);
            } else {
                self.run = Some(run);
            }
        }

        frame.next_frame = self.run.is_some();
        if !frame.next_frame {
            frame.wake_in_ms = self
                .highlight
                .as_ref()
                .map(|h| h.until_ms.saturating_sub(now_ms));
        }
        frame
    }

    /// Runs one `tick`, applies it to `surface`, and schedules the next wake-up.
    pub fn pump(
        &mut self,
        now_ms: u64,
        surface: &mut impl ScrollSurface<K>,
        scheduler: &mut impl FrameScheduler,
    ) -> Frame<K> {
        let frame = self.tick(now_ms);
        if let Some(offset) = frame.scroll_to {
            surface.scroll_to(offset);
        }
        if let Some(key) = &frame.highlight_cleared {
            surface.set_highlight(key, false);
        }
        if let Some(key) = &frame.arrived {
            surface.set_highlight(key, true);
        }
        if frame.next_frame {
            scheduler.request_frame();
        } else if let Some(delay_ms) = frame.wake_in_ms {
            scheduler.request_timeout(delay_ms);
        }
        frame
    }
}
