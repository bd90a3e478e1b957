//! UI mode sequencing: Splash → Pages ⇄ ModeAnnounce.
//!
//! [`UiState::poll`] runs once per control tick but throttles rendering
//! to [`UI_PERIOD_MS`], so input latency is decoupled from redraw rate.
//! The rendering collaborator sits behind the [`PageRenderer`] trait;
//! the sequencer never inspects its drawing state.

use crate::config::{MODE_ANNOUNCE_MS, SPLASH_MS, UI_PERIOD_MS};
use crate::state::VehicleState;

/// Top-level presentation state, independent of which page is shown.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum UiMode {
    #[default]
    Splash,
    Pages,
    ModeAnnounce,
}

/// Available pages, advanced by the page button.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// Odometer, actual gear, PRND strip, drive mode.
    #[default]
    Main,
    /// Lambda line plus MAP/RPM bars.
    Sensors,
    /// Lambda and oil pressure readouts.
    Fuel,
    /// Page index and bus data age.
    Debug,
}

impl Page {
    pub const COUNT: usize = 4;

    /// Advance to the next page (cycles: Main → Sensors → Fuel → Debug → Main).
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Main => Self::Sensors,
            Self::Sensors => Self::Fuel,
            Self::Fuel => Self::Debug,
            Self::Debug => Self::Main,
        }
    }

    /// Index for the debug page readout.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Self::Main => 0,
            Self::Sensors => 1,
            Self::Fuel => 2,
            Self::Debug => 3,
        }
    }
}

/// Rendering collaborator boundary: one call per view.
///
/// Implementations draw into whatever surface they own; the sequencer
/// only decides which call happens on which tick.
pub trait PageRenderer {
    /// Splash view, invoked once on entry.
    fn draw_splash(&mut self);

    /// Currently selected page. `window_active` drives the PRND strip
    /// marker; `now_ms` feeds time-based readouts (bus data age).
    fn draw_page(
        &mut self,
        page: Page,
        vehicle: &VehicleState,
        window_active: bool,
        now_ms: u32,
    );

    /// Drive-mode announcement view.
    fn draw_mode_announce(
        &mut self,
        vehicle: &VehicleState,
    );
}

/// UI sequencing state.
pub struct UiState {
    mode: UiMode,
    page: Page,
    boot_ms: u32,
    announce_start_ms: u32,
    last_redraw_ms: u32,
    splash_drawn: bool,
}

impl UiState {
    pub const fn new(boot_ms: u32) -> Self {
        Self {
            mode: UiMode::Splash,
            page: Page::Main,
            boot_ms,
            announce_start_ms: 0,
            last_redraw_ms: boot_ms,
            splash_drawn: false,
        }
    }

    #[inline]
    pub const fn mode(&self) -> UiMode { self.mode }

    #[inline]
    pub const fn page(&self) -> Page { self.page }

    #[inline]
    pub const fn announce_start_ms(&self) -> u32 { self.announce_start_ms }

    /// Enter the announcement view with a fresh start timestamp.
    pub fn announce_mode(
        &mut self,
        now_ms: u32,
    ) {
        self.mode = UiMode::ModeAnnounce;
        self.announce_start_ms = now_ms;
    }

    /// Advance the page index (wrapping).
    pub fn next_page(&mut self) { self.page = self.page.next(); }

    /// Evaluate the sequencer for this tick; returns whether anything
    /// was rendered (so the caller knows to flush the display).
    ///
    /// The splash view is rendered exactly once, on entry; afterwards
    /// every render is throttled to one per [`UI_PERIOD_MS`].
    pub fn poll<R: PageRenderer>(
        &mut self,
        vehicle: &VehicleState,
        window_active: bool,
        renderer: &mut R,
        now_ms: u32,
    ) -> bool {
        if self.mode == UiMode::Splash && !self.splash_drawn {
            renderer.draw_splash();
            self.splash_drawn = true;
            self.last_redraw_ms = now_ms;
            return true;
        }

        // Redraw throttle; inputs are serviced by the caller every tick
        if now_ms.wrapping_sub(self.last_redraw_ms) < UI_PERIOD_MS {
            return false;
        }
        self.last_redraw_ms = now_ms;

        match self.mode {
            UiMode::Splash => {
                if now_ms.wrapping_sub(self.boot_ms) >= SPLASH_MS {
                    self.mode = UiMode::Pages;
                    self.page = Page::Main;
                    renderer.draw_page(self.page, vehicle, window_active, now_ms);
                    true
                } else {
                    false // splash stays up without redrawing
                }
            }

            UiMode::ModeAnnounce => {
                renderer.draw_mode_announce(vehicle);
                if now_ms.wrapping_sub(self.announce_start_ms) >= MODE_ANNOUNCE_MS {
                    self.mode = UiMode::Pages;
                    renderer.draw_page(self.page, vehicle, window_active, now_ms);
                }
                true
            }

            UiMode::Pages => {
                renderer.draw_page(self.page, vehicle, window_active, now_ms);
                true
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
