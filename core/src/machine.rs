/// Describes a single input button that a machine accepts.
pub struct InputButton {
    /// Machine-defined button identifier, passed to `set_input()`.
    pub id: u8,
    /// Human-readable name for display/configuration (e.g., "A", "Start").
    pub name: &'static str,
}

/// Machine-agnostic interface for emulated systems.
///
/// The frontend is a pure rendering engine that does not know about
/// emulator internals (interrupt flags, palette registers, bank switching);
/// everything it needs goes through this trait.
pub trait Machine {
    /// Native display resolution as (width, height) in pixels.
    fn display_size(&self) -> (u32, u32);

    /// Run one frame of emulation (advance until the next V-blank).
    fn run_frame(&mut self);

    /// Render the current video state into an ARGB32 pixel buffer.
    ///
    /// The buffer must be at least `width * height` entries (from
    /// `display_size()`). Pixels are stored left-to-right, top-to-bottom,
    /// one `0xAARRGGBB` word per pixel.
    fn render_frame(&self, buffer: &mut [u32]);

    /// Handle an input event. `button` is a machine-defined ID from
    /// `input_map()`. `pressed` is true for key-down, false for key-up.
    ///
    /// Called per-event, not per-frame. Each call latches the button state
    /// so that `run_frame()` sees the accumulated input.
    fn set_input(&mut self, button: u8, pressed: bool);

    /// Get the list of input buttons this machine accepts.
    /// The frontend uses this to build key mappings.
    fn input_map(&self) -> &[InputButton];

    /// Reset the machine to its initial power-on state.
    fn reset(&mut self);

    /// Load battery-backed RAM previously returned by `save_nvram`.
    fn load_nvram(&mut self, _data: &[u8]) {}

    /// Battery-backed RAM to persist, or `None` when there is nothing
    /// worth writing (no battery, or RAM never modified).
    fn save_nvram(&self) -> Option<Vec<u8>> {
        None
    }
}
