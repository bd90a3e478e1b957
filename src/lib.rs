//! Instrument cluster library - testable modules for the cluster firmware.
//!
//! This library contains the input interpretation core and screen drawing
//! that can be tested on the host machine. The binary (`main.rs`) uses this
//! library and adds the embedded-specific code (GPIO polling, SPI display).
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Configuration
pub mod config;

// Input interpretation core and shared vehicle record
pub mod state;

// UI mode sequencing and the rendering collaborator boundary
pub mod ui;

// Screen drawing for any monochrome DrawTarget
pub mod screens;
