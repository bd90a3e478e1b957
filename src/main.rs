//! Instrument cluster firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Drives a 128x64 SSD1306 OLED over SPI and polls four active-low
//! inputs at a fixed 5ms tick:
//!
//! - **Left/Right paddles**: hold both for 1s to shift to Neutral and
//!   open a 3s selection window; a single right press then selects
//!   Drive, a single left press selects Reverse
//! - **Mode button**: cycles Comfort → Sport → Sport+ → Manual with a
//!   1.5s full-screen announcement
//! - **Page button**: cycles Main → Sensors → Fuel → Debug
//!
//! Per tick the loop services the demo bus feed, polls the debounced
//! inputs, advances the gesture and UI state machines, and flushes the
//! framebuffer when the sequencer rendered a frame.

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
mod demo;
mod display;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use instrument_cluster::config::TICK_MS;
use instrument_cluster::screens::Screens;
use instrument_cluster::state::{DebouncedInput, PaddleGesture, VehicleState, process_buttons};
use instrument_cluster::ui::UiState;

use crate::demo::BUS_FRAMES;
use crate::display::{Ssd1306Flusher, Ssd1306Renderer};

/// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"instrument-cluster"),
    embassy_rp::binary_info::rp_program_description!(c"Digital instrument cluster on a 128x64 SSD1306 OLED"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Instrument cluster starting...");

    let p = embassy_rp::init(Default::default());

    // Display pins: CS=17, DC=16, CLK=18, MOSI=19, RST=21
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let rst = Output::new(p.PIN_21, Level::High);

    // Async SPI with DMA (TX-only, the panel has no MISO)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 10_000_000;
    let spi_bus = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, spi_config);

    let mut flusher = Ssd1306Flusher::new(spi_bus, dc, cs, rst);
    flusher.init().await;
    info!("Display initialized");

    // SAFETY: Only one renderer instance exists
    let renderer = unsafe { Ssd1306Renderer::new() };
    let mut screens = Screens::new(renderer);

    // Inputs (active-low with internal pull-up)
    // Left paddle=2, Right paddle=3, Mode=4, Page=5
    let paddle_left = Input::new(p.PIN_2, Pull::Up);
    let paddle_right = Input::new(p.PIN_3, Pull::Up);
    let btn_mode = Input::new(p.PIN_4, Pull::Up);
    let btn_page = Input::new(p.PIN_5, Pull::Up);

    let mut paddle_left_state = DebouncedInput::new();
    let mut paddle_right_state = DebouncedInput::new();
    let mut btn_mode_state = DebouncedInput::new();
    let mut btn_page_state = DebouncedInput::new();

    info!("Inputs initialized");

    let mut vehicle = VehicleState::new();
    let mut gesture = PaddleGesture::new();

    let boot = Instant::now();
    let mut ui = UiState::new(boot.elapsed().as_millis() as u32);

    // Get sender/receiver from static Watch channel (initialized at compile time)
    let mut bus_receiver = BUS_FRAMES.dyn_receiver().unwrap();
    let bus_sender = BUS_FRAMES.dyn_sender();

    spawner.spawn(demo::demo_bus_task(bus_sender, boot)).unwrap();
    info!("Demo bus task spawned");

    info!("Control loop starting");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    loop {
        ticker.next().await;
        let now_ms = boot.elapsed().as_millis() as u32;

        // Bus service: the decoder owns the sensor fields, the loop just
        // copies the latest frame in
        if let Some(frame) = bus_receiver.try_changed() {
            vehicle.rpm = frame.rpm;
            vehicle.map_kpa = frame.map_kpa;
            vehicle.tps = frame.tps;
            vehicle.clt = frame.clt;
            vehicle.iat = frame.iat;
            vehicle.gear = frame.gear;
            vehicle.lambda = frame.lambda;
            vehicle.oil_pressure = frame.oil_pressure;
            vehicle.last_bus_ms = now_ms;
        }

        // Input polling: press edges fire on the HIGH->LOW transition
        let left_edge = paddle_left_state.just_pressed(paddle_left.is_high(), now_ms);
        let right_edge = paddle_right_state.just_pressed(paddle_right.is_high(), now_ms);
        let mode_edge = btn_mode_state.just_pressed(btn_mode.is_high(), now_ms);
        let page_edge = btn_page_state.just_pressed(btn_page.is_high(), now_ms);

        // Gear-range gesture consumes paddle edges while a window is open
        gesture.update(
            &mut vehicle.gear_range,
            left_edge,
            right_edge,
            paddle_left_state.is_held(),
            paddle_right_state.is_held(),
            now_ms,
        );

        process_buttons(mode_edge, page_edge, &mut vehicle, &mut ui, now_ms);
        if mode_edge {
            info!("Drive mode: {}", vehicle.drive_mode.label());
        }
        if page_edge {
            info!("Page: {}", ui.page().index());
        }

        // The sequencer decides whether this tick rendered a frame
        if ui.poll(&vehicle, gesture.window_active(), &mut screens, now_ms) {
            // SAFETY: Rendering for this frame is complete and the
            // renderer is not touched again until flush returns
            let buffer = unsafe { &*core::ptr::addr_of!(display::FRAMEBUFFER) };
            flusher.flush(buffer).await;
        }
    }
}
