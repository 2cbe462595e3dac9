mod tests {
    use led_pattern_engine::{Led16, LedGrid, LedStrip};

    const CO: Led16 = Led16 { r: 100, g: 0, b: 0 };

    fn reds(strip: &LedStrip<u16>) -> Vec<u16> {
        strip.leds().iter().map(|led| led.r).collect()
    }

    #[test]
    fn test_row_major_indexing() {
        let mut strip = LedStrip::new(12);
        let mut grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 4, 3);
        assert_eq!(grid.led_index(2, 1), Some(6));
        assert_eq!(grid.led_index(0, 0), Some(0));
        grid.set_led(CO, 2, 1);
        assert_eq!(strip.leds()[6], CO);
    }

    #[test]
    fn test_height_derived_from_strip() {
        let mut strip = LedStrip::new(10);
        let grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 4, 0);
        assert_eq!(grid.height(), 3);
        // the last row is ragged; coordinates past the strip end miss
        assert_eq!(grid.led_index(1, 2), Some(9));
        assert_eq!(grid.led_index(2, 2), None);
    }

    #[test]
    fn test_off_grid_is_a_no_op() {
        let mut strip = LedStrip::new(12);
        let mut grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 4, 3);
        assert_eq!(grid.led_index(-1, 0), None);
        assert_eq!(grid.led_index(4, 0), None);
        assert_eq!(grid.led_index(0, -1), None);
        assert_eq!(grid.led_index(0, 5), None);
        grid.set_led(CO, -1, 0);
        grid.set_led(CO, 0, 5);
        assert_eq!(reds(&strip), [0; 12]);
    }

    #[test]
    fn test_pixel_finder_overrides_layout() {
        fn first_row_only(x: i32, y: i32) -> Option<usize> {
            if y == 0 && (0..4).contains(&x) {
                Some(x as usize)
            } else {
                None
            }
        }

        let mut strip = LedStrip::new(12);
        let mut grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 4, 3);
        grid.set_pixel_finder(first_row_only);
        grid.set_led(CO, 1, 0);
        grid.set_led(CO, 1, 1);
        assert_eq!(strip.leds()[1], CO);
        assert_eq!(strip.leds()[5], Led16::default());
    }

    #[test]
    fn test_fill_row_horizontal_coverage() {
        let mut strip = LedStrip::new(12);
        let mut grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 4, 3);
        grid.fill_row(CO, 1, 0.5, 2.5);
        assert_eq!(reds(&strip), [0, 0, 0, 0, 50, 100, 50, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_vertical_coverage() {
        let mut strip = LedStrip::new(12);
        let mut grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 4, 3);
        grid.fill(CO, 0.0, 0.5, 2.0, 1.5);
        assert_eq!(reds(&strip), [50, 50, 0, 0, 50, 50, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_clamps_and_swaps_without_wrap() {
        let mut strip = LedStrip::new(12);
        let mut grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 4, 3);
        grid.fill(CO, 3.0, 0.0, 1.0, 1.0);
        assert_eq!(reds(&strip), [0, 100, 100, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_wraps_on_x() {
        let mut strip = LedStrip::new(12);
        let mut grid: LedGrid<'_, u16, true> = LedGrid::new(&mut strip, 4, 3);
        grid.fill(CO, 3.0, 0.0, 5.0, 1.0);
        assert_eq!(reds(&strip), [100, 0, 0, 100, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_clear_color() {
        let mut strip = LedStrip::new(4);
        let mut grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 2, 2);
        grid.clear_color(CO);
        grid.clear();
        assert_eq!(reds(&strip), [0; 4]);

        let mut grid: LedGrid<'_, u16> = LedGrid::new(&mut strip, 2, 2);
        grid.clear_color(CO);
        assert_eq!(reds(&strip), [100; 4]);
    }
}
