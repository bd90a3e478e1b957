//! SSD1306 128x64 display driver for embassy-rp.
//!
//! The driver is split into two components, mirroring the render/flush
//! separation of the control loop:
//! - [`Ssd1306Renderer`]: Implements `DrawTarget`, writes to the 1 KiB
//!   monochrome framebuffer
//! - [`Ssd1306Flusher`]: Owns the SPI peripheral and pushes the
//!   framebuffer to the panel via async DMA transfers
//!
//! The framebuffer uses the SSD1306 page layout: one byte covers an
//! 8-pixel vertical strip, bit 0 at the top of the strip.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Display dimensions.
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

/// Static framebuffer (1,024 bytes).
pub static mut FRAMEBUFFER: [u8; BUFFER_SIZE] = [0u8; BUFFER_SIZE];

// SSD1306 commands
const SET_DISP_OFF: u8 = 0xAE;
const SET_DISP_ON: u8 = 0xAF;
const SET_DISP_CLK_DIV: u8 = 0xD5;
const SET_MUX_RATIO: u8 = 0xA8;
const SET_DISP_OFFSET: u8 = 0xD3;
const SET_START_LINE: u8 = 0x40;
const SET_CHARGE_PUMP: u8 = 0x8D;
const SET_MEM_ADDR_MODE: u8 = 0x20;
const SET_SEG_REMAP: u8 = 0xA1;
const SET_COM_SCAN_DEC: u8 = 0xC8;
const SET_COM_PINS: u8 = 0xDA;
const SET_CONTRAST: u8 = 0x81;
const SET_PRECHARGE: u8 = 0xD9;
const SET_VCOM_DESELECT: u8 = 0xDB;
const SET_ENTIRE_ON_RESUME: u8 = 0xA4;
const SET_NORMAL_DISP: u8 = 0xA6;
const SET_COL_ADDR: u8 = 0x21;
const SET_PAGE_ADDR: u8 = 0x22;

/// Panel contrast (0-255).
const CONTRAST: u8 = 120;

/// Framebuffer renderer - implements `DrawTarget` for the screen code.
pub struct Ssd1306Renderer {
    buffer: &'static mut [u8; BUFFER_SIZE],
}

impl Ssd1306Renderer {
    /// Create the renderer over the static framebuffer.
    ///
    /// # Safety
    /// Must only be called once; the static framebuffer is owned by
    /// this instance.
    pub unsafe fn new() -> Self {
        Self {
            buffer: unsafe { &mut *core::ptr::addr_of_mut!(FRAMEBUFFER) },
        }
    }
}

impl OriginDimensions for Ssd1306Renderer {
    fn size(&self) -> Size { Size::new(WIDTH as u32, HEIGHT as u32) }
}

impl DrawTarget for Ssd1306Renderer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if (0..WIDTH as i32).contains(&point.x) && (0..HEIGHT as i32).contains(&point.y) {
                let idx = point.x as usize + (point.y as usize / 8) * WIDTH;
                let mask = 1u8 << (point.y as usize % 8);
                if color.is_on() {
                    self.buffer[idx] |= mask;
                } else {
                    self.buffer[idx] &= !mask;
                }
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

/// SSD1306 flusher - owns SPI and handles async DMA transfers.
pub struct Ssd1306Flusher<'d> {
    spi: Spi<'d, SPI0, Async>,
    dc: Output<'d>,
    cs: Output<'d>,
    rst: Output<'d>,
}

impl<'d> Ssd1306Flusher<'d> {
    pub fn new(
        spi: Spi<'d, SPI0, Async>,
        dc: Output<'d>,
        cs: Output<'d>,
        rst: Output<'d>,
    ) -> Self {
        Self { spi, dc, cs, rst }
    }

    /// Hardware reset followed by the panel init sequence.
    pub async fn init(&mut self) {
        self.rst.set_high();
        Timer::after_millis(1).await;
        self.rst.set_low();
        Timer::after_millis(10).await;
        self.rst.set_high();
        Timer::after_millis(10).await;

        const INIT_SEQUENCE: &[u8] = &[
            SET_DISP_OFF,
            SET_DISP_CLK_DIV,
            0x80,
            SET_MUX_RATIO,
            (HEIGHT - 1) as u8,
            SET_DISP_OFFSET,
            0x00,
            SET_START_LINE,
            SET_CHARGE_PUMP,
            0x14, // internal charge pump
            SET_MEM_ADDR_MODE,
            0x00, // horizontal addressing
            SET_SEG_REMAP,
            SET_COM_SCAN_DEC,
            SET_COM_PINS,
            0x12,
            SET_CONTRAST,
            CONTRAST,
            SET_PRECHARGE,
            0xF1,
            SET_VCOM_DESELECT,
            0x40,
            SET_ENTIRE_ON_RESUME,
            SET_NORMAL_DISP,
            SET_DISP_ON,
        ];
        self.write_commands(INIT_SEQUENCE).await;
    }

    /// Flush the framebuffer to the panel via DMA.
    pub async fn flush(
        &mut self,
        buffer: &[u8],
    ) {
        self.write_commands(&[SET_COL_ADDR, 0, (WIDTH - 1) as u8, SET_PAGE_ADDR, 0, (HEIGHT / 8 - 1) as u8])
            .await;

        self.dc.set_high();
        self.cs.set_low();
        self.spi.write(buffer).await.ok();
        self.cs.set_high();
    }

    async fn write_commands(
        &mut self,
        bytes: &[u8],
    ) {
        self.dc.set_low();
        self.cs.set_low();
        self.spi.write(bytes).await.ok();
        self.cs.set_high();
    }
}
