/// The rendering side of a scroll container.
///
/// Implemented by adapters (DOM, TUI, GUI). The engine never reads from it; observed offsets are
/// fed back through [`crate::ScrollEngine::on_scroll`].
pub trait ScrollSurface<K> {
    /// Writes the viewport scroll offset. Called at most once per frame.
    fn scroll_to(&mut self, offset: u64);

    /// Turns the arrival highlight of a section on or off.
    fn set_highlight(&mut self, key: &K, on: bool);
}

/// How the engine asks to be driven again.
///
/// A frame callback, a timer, or a test loop; each `pump` runs to completion before the next is
/// scheduled.
pub trait FrameScheduler {
    /// Call `pump` again on the next frame.
    fn request_frame(&mut self);

    /// Call `pump` again after roughly `delay_ms`. Used for highlight expiry only.
    fn request_timeout(&mut self, delay_ms: u64);
}
