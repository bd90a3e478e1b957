//! Demo bus feeder task.
//!
//! Stands in for the CAN/serial bus decoder: generates simulated engine
//! values with micromath sine waves and publishes them on a Watch
//! channel. The control loop consumes the latest frame each tick and
//! copies it into the vehicle state.

use defmt::info;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::Watch;
use embassy_time::{Instant, Timer};

/// One decoded bus frame: every sensor field the pages display.
#[derive(Clone, Copy, Default)]
pub struct BusFrame {
    pub rpm: i16,
    pub map_kpa: i16,
    pub tps: i16,
    pub clt: i16,
    pub iat: i16,
    pub gear: i8,
    pub lambda: f32,
    pub oil_pressure: f32,
}

/// Watch channel for sharing bus frames between tasks.
/// The feeder task writes, the control loop reads the latest frame.
/// Initialized at compile time (Watch::new() is const).
pub static BUS_FRAMES: Watch<CriticalSectionRawMutex, BusFrame, 2> = Watch::new();

/// Feeder task - runs concurrently with the control loop.
#[embassy_executor::task]
pub async fn demo_bus_task(
    sender: embassy_sync::watch::DynSender<'static, BusFrame>,
    start_time: Instant,
) {
    info!("Demo bus task started");

    loop {
        // Time-based waveforms (independent of the control loop rate)
        let elapsed_ms = start_time.elapsed().as_millis() as u32;
        let t = elapsed_ms as f32 / 1000.0;

        let frame = BusFrame {
            rpm: (3500.0 + 3000.0 * micromath::F32(t * 0.6).sin().0) as i16,
            map_kpa: (120.0 + 90.0 * micromath::F32(t * 0.8).sin().0) as i16,
            tps: (50.0 + 50.0 * micromath::F32(t * 0.7).sin().0) as i16,
            clt: (88.0 + 6.0 * micromath::F32(t * 0.2).sin().0) as i16,
            iat: (35.0 + 10.0 * micromath::F32(t * 0.3).sin().0) as i16,
            gear: ((start_time.elapsed().as_secs() / 5) % 6) as i8 + 1,
            lambda: 0.97 + 0.12 * micromath::F32(t * 0.45).sin().0,
            oil_pressure: 3.5 + 1.2 * micromath::F32(t * 0.5).sin().0,
        };

        // Send latest frame (overwrites previous if not consumed)
        sender.send(frame);

        // ~20 Hz, well above the 10 Hz redraw rate
        Timer::after_millis(50).await;
    }
}
