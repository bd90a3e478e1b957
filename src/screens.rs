//! Screen drawing for the 128x64 monochrome cluster display.
//!
//! [`Screens`] implements the [`PageRenderer`] collaborator over any
//! `DrawTarget<Color = BinaryColor>`, so the same drawing code runs
//! against the SSD1306 framebuffer on hardware and a plain pixel array
//! in host tests. Out-of-range gauge values are clamped, never rejected.

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle};
use embedded_graphics::text::Text;
use heapless::String;
use profont::{PROFONT_7_POINT, PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use crate::config::{LAMBDA_MAX, LAMBDA_MIN, MAP_KPA_MAX, RPM_MAX, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::state::VehicleState;
use crate::ui::{Page, PageRenderer};

const ON: BinaryColor = BinaryColor::On;
const OFF: BinaryColor = BinaryColor::Off;

/// Rendered width of a monospaced string.
fn text_width(
    font: &MonoFont<'_>,
    len: usize,
) -> i32 {
    len as i32 * (font.character_size.width + font.character_spacing) as i32
}

/// Bar fill width in pixels, value clamped into [min, max].
fn bar_fill_width(
    value: i32,
    min: i32,
    max: i32,
    inner_w: i32,
) -> i32 {
    if max <= min {
        return 0;
    }
    let v = value.clamp(min, max);
    (i64::from(v - min) * i64::from(inner_w) / i64::from(max - min)) as i32
}

/// Numeric gear label: -1 = R, 0 = N, 1..n as digits.
fn gear_label(gear: i8) -> String<4> {
    let mut s = String::new();
    match gear {
        -1 => {
            s.push('R').ok();
        }
        0 => {
            s.push('N').ok();
        }
        g => {
            write!(s, "{g}").ok();
        }
    }
    s
}

/// Screen drawing over an owned display target.
pub struct Screens<D> {
    pub display: D,
}

impl<D> Screens<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(display: D) -> Self { Self { display } }

    fn text(
        &mut self,
        s: &str,
        x: i32,
        baseline_y: i32,
        font: &MonoFont<'_>,
        color: BinaryColor,
    ) {
        Text::new(s, Point::new(x, baseline_y), MonoTextStyle::new(font, color))
            .draw(&mut self.display)
            .ok();
    }

    fn text_centered(
        &mut self,
        s: &str,
        baseline_y: i32,
        font: &MonoFont<'_>,
    ) {
        let x = (SCREEN_WIDTH - text_width(font, s.len())) / 2;
        self.text(s, x, baseline_y, font, ON);
    }

    /// Progress bar with the label centered over it; the part of the
    /// label inside the filled region is drawn inverted.
    fn labeled_bar(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        value: i32,
        min: i32,
        max: i32,
        label: &str,
    ) {
        let fill = bar_fill_width(value, min, max, w - 2);
        let fill_rect = Rectangle::new(Point::new(x + 1, y + 1), Size::new(fill.max(0) as u32, (h - 2) as u32));

        if fill > 0 {
            fill_rect
                .into_styled(PrimitiveStyle::with_fill(ON))
                .draw(&mut self.display)
                .ok();
        }

        let font = &PROFONT_7_POINT;
        let tx = x + (w - text_width(font, label.len())) / 2;
        let ty = y + h - 3;
        self.text(label, tx, ty, font, ON);
        if fill > 0 {
            let mut inverted = self.display.clipped(&fill_rect);
            Text::new(label, Point::new(tx, ty), MonoTextStyle::new(font, OFF))
                .draw(&mut inverted)
                .ok();
        }

        RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32)),
            Size::new(3, 3),
        )
        .into_styled(PrimitiveStyle::with_stroke(ON, 1))
        .draw(&mut self.display)
        .ok();
    }

    /// Lambda readout as a moving marker over a fixed scale, with a
    /// reference line at stoichiometric (1.00).
    fn lambda_line(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        lambda: f32,
    ) {
        Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
            .into_styled(PrimitiveStyle::with_stroke(ON, 1))
            .draw(&mut self.display)
            .ok();

        let lambda = lambda.clamp(LAMBDA_MIN, LAMBDA_MAX);
        let inner_w = (w - 2) as f32;
        let span = LAMBDA_MAX - LAMBDA_MIN;

        let stoich_x = x + 1 + ((1.0 - LAMBDA_MIN) * inner_w / span) as i32;
        Line::new(Point::new(stoich_x, y + 1), Point::new(stoich_x, y + h - 2))
            .into_styled(PrimitiveStyle::with_stroke(ON, 1))
            .draw(&mut self.display)
            .ok();

        // 2px marker for visibility
        let marker_x = x + 1 + ((lambda - LAMBDA_MIN) * inner_w / span) as i32;
        for dx in 0..2 {
            Line::new(Point::new(marker_x + dx, y + 1), Point::new(marker_x + dx, y + h - 2))
                .into_styled(PrimitiveStyle::with_stroke(ON, 1))
                .draw(&mut self.display)
                .ok();
        }
    }

    /// Selection-window marker: an outward-pointing arrow pair above
    /// the PRND strip.
    fn selection_marker(
        &mut self,
        x: i32,
        y: i32,
        size: i32,
    ) {
        let arrow_style = PrimitiveStyle::with_stroke(ON, 1);
        let offset = size / 2 + 2;

        Triangle::new(
            Point::new(x + size / 2, y),
            Point::new(x + size / 2, y + size),
            Point::new(x, y + size / 2),
        )
        .into_styled(arrow_style)
        .draw(&mut self.display)
        .ok();

        Triangle::new(
            Point::new(x + offset, y),
            Point::new(x + offset, y + size),
            Point::new(x + size / 2 + offset, y + size / 2),
        )
        .into_styled(arrow_style)
        .draw(&mut self.display)
        .ok();
    }

    /// PRND strip: the selected range inverted in a filled box, the
    /// remaining letters alongside in a small font.
    fn prnd_strip(
        &mut self,
        x: i32,
        y: i32,
        vehicle: &VehicleState,
        window_active: bool,
    ) {
        use crate::state::GearRange::{Drive, Neutral, Park, Reverse};

        if window_active {
            self.selection_marker(x + 16, y - 7, 6);
        }

        Rectangle::new(Point::new(x + 16, y), Size::new(9, 13))
            .into_styled(PrimitiveStyle::with_fill(ON))
            .draw(&mut self.display)
            .ok();
        self.text(vehicle.gear_range.label(), x + 17, y + 11, &PROFONT_12_POINT, OFF);

        let (before, after) = match vehicle.gear_range {
            Park => ("", "RND"),
            Reverse => ("P", "ND"),
            Neutral => ("PR", "D"),
            Drive => ("PRN", ""),
        };
        let font = &PROFONT_7_POINT;
        if !before.is_empty() {
            self.text(before, x + 14 - text_width(font, before.len()), y + 10, font, ON);
        }
        if !after.is_empty() {
            self.text(after, x + 27, y + 10, font, ON);
        }
    }

    /// Actual gear in a filled rounded box, centered on screen.
    fn actual_gear(
        &mut self,
        gear: i8,
        y: i32,
    ) {
        RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(53, y), Size::new(22, 23)),
            Size::new(3, 3),
        )
        .into_styled(PrimitiveStyle::with_fill(ON))
        .draw(&mut self.display)
        .ok();

        let label = gear_label(gear);
        let font = &PROFONT_18_POINT;
        let x = (SCREEN_WIDTH - text_width(font, label.len())) / 2;
        self.text(&label, x, y + 20, font, OFF);
    }

    /// Odometer with unit, centered on screen.
    fn odometer_centered(
        &mut self,
        odometer_km: u32,
        baseline_y: i32,
    ) {
        let mut num: String<12> = String::new();
        write!(num, "{odometer_km}").ok();

        let num_font = &PROFONT_10_POINT;
        let unit_font = &PROFONT_7_POINT;
        let gap = 3;

        let num_w = text_width(num_font, num.len());
        let total_w = num_w + gap + text_width(unit_font, 2);
        let x = (SCREEN_WIDTH - total_w) / 2;

        self.text(&num, x, baseline_y, num_font, ON);
        self.text("km", x + num_w + gap, baseline_y, unit_font, ON);
    }

    fn main_page(
        &mut self,
        vehicle: &VehicleState,
        window_active: bool,
    ) {
        self.odometer_centered(vehicle.odometer_km, 18);
        self.actual_gear(vehicle.gear, 28);
        self.prnd_strip(5, 48, vehicle, window_active);

        // Drive mode label centered on a small box slot right of the gear
        let font = &PROFONT_7_POINT;
        let label = vehicle.drive_mode.label();
        let slot_x = 96;
        let slot_w = 15;
        self.text(label, slot_x + (slot_w - text_width(font, label.len())) / 2, 54, font, ON);
    }

    fn sensors_page(
        &mut self,
        vehicle: &VehicleState,
    ) {
        self.text("Sensors", 0, 10, &PROFONT_7_POINT, ON);
        self.lambda_line(0, 15, SCREEN_WIDTH, 11, vehicle.lambda);

        let mut map_txt: String<20> = String::new();
        write!(map_txt, "MAP {} kPa", vehicle.map_kpa).ok();
        self.labeled_bar(0, 39, SCREEN_WIDTH, 11, i32::from(vehicle.map_kpa), 0, MAP_KPA_MAX, &map_txt);

        let mut rpm_txt: String<20> = String::new();
        write!(rpm_txt, "RPM {}", vehicle.rpm).ok();
        self.labeled_bar(0, 52, SCREEN_WIDTH, 11, i32::from(vehicle.rpm), 0, RPM_MAX, &rpm_txt);
    }

    fn fuel_page(
        &mut self,
        vehicle: &VehicleState,
    ) {
        self.text("Fuel / Lambda", 0, 10, &PROFONT_7_POINT, ON);

        let mut line: String<24> = String::new();
        write!(line, "Lambda: {:.2}", vehicle.lambda).ok();
        self.text(&line, 0, 28, &PROFONT_10_POINT, ON);

        line.clear();
        write!(line, "OilP: {:.1} bar", vehicle.oil_pressure).ok();
        self.text(&line, 0, 44, &PROFONT_10_POINT, ON);
    }

    fn debug_page(
        &mut self,
        vehicle: &VehicleState,
        now_ms: u32,
    ) {
        self.text("Debug", 0, 10, &PROFONT_7_POINT, ON);

        let mut line: String<24> = String::new();
        write!(line, "Page: {}", Page::Debug.index()).ok();
        self.text(&line, 0, 24, &PROFONT_7_POINT, ON);

        line.clear();
        write!(line, "Bus age: {} ms", now_ms.wrapping_sub(vehicle.last_bus_ms)).ok();
        self.text(&line, 0, 36, &PROFONT_7_POINT, ON);

        line.clear();
        write!(line, "TPS: {} %  CLT: {} C", vehicle.tps, vehicle.clt).ok();
        self.text(&line, 0, 48, &PROFONT_7_POINT, ON);

        line.clear();
        write!(line, "IAT: {} C", vehicle.iat).ok();
        self.text(&line, 0, 60, &PROFONT_7_POINT, ON);
    }
}

impl<D> PageRenderer for Screens<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn draw_splash(&mut self) {
        self.display.clear(OFF).ok();

        RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(2, 10), Size::new((SCREEN_WIDTH - 4) as u32, (SCREEN_HEIGHT - 20) as u32)),
            Size::new(4, 4),
        )
        .into_styled(PrimitiveStyle::with_stroke(ON, 1))
        .draw(&mut self.display)
        .ok();

        self.text_centered("CLUSTER", 44, &PROFONT_24_POINT);
    }

    fn draw_page(
        &mut self,
        page: Page,
        vehicle: &VehicleState,
        window_active: bool,
        now_ms: u32,
    ) {
        self.display.clear(OFF).ok();

        match page {
            Page::Main => self.main_page(vehicle, window_active),
            Page::Sensors => self.sensors_page(vehicle),
            Page::Fuel => self.fuel_page(vehicle),
            Page::Debug => self.debug_page(vehicle, now_ms),
        }
    }

    fn draw_mode_announce(
        &mut self,
        vehicle: &VehicleState,
    ) {
        self.display.clear(OFF).ok();

        self.text_centered("DRIVE MODE", 16, &PROFONT_7_POINT);
        self.text_centered(vehicle.drive_mode.label(), 44, &PROFONT_18_POINT);

        let underline_w = 80;
        let x = (SCREEN_WIDTH - underline_w) / 2;
        Line::new(Point::new(x, 52), Point::new(x + underline_w, 52))
            .into_styled(PrimitiveStyle::with_stroke(ON, 1))
            .draw(&mut self.display)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain pixel-array target for exercising the drawing code on host.
    struct TestDisplay {
        pixels: Vec<bool>,
    }

    impl TestDisplay {
        fn new() -> Self {
            Self {
                pixels: vec![false; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize],
            }
        }

        fn lit_count(&self) -> usize { self.pixels.iter().filter(|p| **p).count() }
    }

    impl OriginDimensions for TestDisplay {
        fn size(&self) -> Size { Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32) }
    }

    impl DrawTarget for TestDisplay {
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
                if (0..SCREEN_WIDTH).contains(&point.x) && (0..SCREEN_HEIGHT).contains(&point.y) {
                    self.pixels[(point.y * SCREEN_WIDTH + point.x) as usize] = color.is_on();
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_bar_fill_width_clamps() {
        assert_eq!(bar_fill_width(-50, 0, 250, 126), 0);
        assert_eq!(bar_fill_width(0, 0, 250, 126), 0);
        assert_eq!(bar_fill_width(250, 0, 250, 126), 126);
        assert_eq!(bar_fill_width(9999, 0, 250, 126), 126);
        assert_eq!(bar_fill_width(125, 0, 250, 126), 63);
    }

    #[test]
    fn test_bar_fill_width_degenerate_range() {
        assert_eq!(bar_fill_width(10, 100, 100, 126), 0);
        assert_eq!(bar_fill_width(10, 200, 100, 126), 0);
    }

    #[test]
    fn test_gear_label() {
        assert_eq!(gear_label(-1).as_str(), "R");
        assert_eq!(gear_label(0).as_str(), "N");
        assert_eq!(gear_label(3).as_str(), "3");
        assert_eq!(gear_label(7).as_str(), "7");
    }

    #[test]
    fn test_all_views_draw_pixels() {
        let vehicle = VehicleState::new();

        let mut screens = Screens::new(TestDisplay::new());
        screens.draw_splash();
        assert!(screens.display.lit_count() > 0);

        for page in [Page::Main, Page::Sensors, Page::Fuel, Page::Debug] {
            let mut screens = Screens::new(TestDisplay::new());
            screens.draw_page(page, &vehicle, false, 5000);
            assert!(screens.display.lit_count() > 0);
        }

        let mut screens = Screens::new(TestDisplay::new());
        screens.draw_mode_announce(&vehicle);
        assert!(screens.display.lit_count() > 0);
    }

    #[test]
    fn test_window_marker_adds_pixels_on_main_page() {
        let vehicle = VehicleState::new();

        let mut without = Screens::new(TestDisplay::new());
        without.draw_page(Page::Main, &vehicle, false, 0);
        let mut with = Screens::new(TestDisplay::new());
        with.draw_page(Page::Main, &vehicle, true, 0);

        assert!(with.display.lit_count() > without.display.lit_count());
    }

    #[test]
    fn test_out_of_range_sensor_values_render() {
        // Clamped, never rejected
        let mut vehicle = VehicleState::new();
        vehicle.rpm = i16::MAX;
        vehicle.map_kpa = -300;
        vehicle.lambda = 9.5;

        let mut screens = Screens::new(TestDisplay::new());
        screens.draw_page(Page::Sensors, &vehicle, false, 0);
        assert!(screens.display.lit_count() > 0);
    }
}
