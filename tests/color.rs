mod tests {
    use led_pattern_engine::{HexGamma, Led8, Led16, PackRegimes};
    use smart_leds::RGB8;

    #[test]
    fn test_saturating_arithmetic() {
        assert_eq!(
            Led8::new(200, 10, 0) + Led8::new(100, 250, 0),
            Led8::new(255, 255, 0)
        );
        assert_eq!(
            Led8::new(100, 5, 0) - Led8::new(200, 3, 0),
            Led8::new(0, 2, 0)
        );
        assert_eq!(
            Led16::new(60000, 60000, 0) + Led16::new(10000, 0, 1),
            Led16::new(65535, 60000, 1)
        );
    }

    #[test]
    fn test_scalar_multiply_truncates_scaled_rounds() {
        assert_eq!(Led8::new(101, 51, 3) * 0.5, Led8::new(50, 25, 1));
        assert_eq!(Led8::new(101, 51, 3).scaled(0.5), Led8::new(51, 26, 2));
        // scaling past full range clamps
        assert_eq!(Led8::new(200, 0, 0) * 2.0, Led8::new(255, 0, 0));
    }

    #[test]
    fn test_from_rgb_clamps_to_full_scale() {
        assert_eq!(Led8::from_rgb(300, 255, 0), Led8::new(255, 255, 0));
        assert_eq!(Led16::from_rgb(70000, 65535, 1), Led16::new(65535, 65535, 1));
    }

    #[test]
    fn test_tint_multiply() {
        let a = Led8::new(255, 128, 0);
        let b = Led8::new(128, 255, 255);
        assert_eq!(a * b, Led8::new(128, 128, 0));
        // full scale is the identity tint
        assert_eq!(a * Led8::new(255, 255, 255), a);
    }

    #[test]
    fn test_mix() {
        let red = Led8::new(255, 0, 0);
        let blue = Led8::new(0, 0, 255);
        assert_eq!(red.mix(blue, 0.0), red);
        assert_eq!(red.mix(blue, 1.0), blue);
        assert_eq!(red.mix(blue, 0.5), Led8::new(128, 0, 128));
    }

    #[test]
    fn test_brightness() {
        assert_eq!(Led16::new(5, 70, 3).brightness(), 70);
        assert_eq!(Led8::default().brightness(), 0);
    }

    #[test]
    fn test_hex_round_trip_is_exact() {
        for v in 0..=255u32 {
            let hex = v << 16 | v << 8 | v;
            assert_eq!(Led8::from_hex(hex).to_hex(), hex);
            assert_eq!(Led16::from_hex(hex).to_hex(), hex);
        }
        assert_eq!(Led16::from_hex(0x123456), Led16::new(0x1212, 0x3434, 0x5656));
        assert_eq!(Led8::from_hex(0x123456), Led8::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_hex_gamma_round_trip_within_one() {
        let gamma = HexGamma::new(2.2);
        for hex in [0x000000u32, 0x010a30, 0x4080c0, 0xff8001, 0xffffff] {
            let back = Led16::from_hex_gamma(hex, gamma).to_hex_gamma(gamma);
            for shift in [16, 8, 0] {
                let a = (hex >> shift) & 0xff;
                let b = (back >> shift) & 0xff;
                assert!(a.abs_diff(b) <= 1, "{hex:06x} -> {back:06x}");
            }
        }
    }

    #[test]
    fn test_gamma_darkens_midtones() {
        let gamma = HexGamma::new(2.2);
        let linear = Led16::from_hex(0x808080);
        let corrected = Led16::from_hex_gamma(0x808080, gamma);
        assert!(corrected.r < linear.r);
        // endpoints stay put
        assert_eq!(Led16::from_hex_gamma(0xffffff, gamma), Led16::new(65535, 65535, 65535));
        assert_eq!(Led16::from_hex_gamma(0x000000, gamma), Led16::default());
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Led8::hsv(0, 255, 255), Led8::new(255, 0, 0));
        assert_eq!(Led8::hsv(85, 255, 255), Led8::new(0, 255, 0));
        assert_eq!(Led8::hsv(171, 255, 255), Led8::new(0, 0, 255));
        assert_eq!(Led16::hsv(0, 65535, 65535), Led16::new(65535, 0, 0));
    }

    #[test]
    fn test_hsv_zero_saturation_is_grey() {
        assert_eq!(Led8::hsv(123, 0, 200), Led8::new(200, 200, 200));
        let (h, s, v) = Led8::new(200, 200, 200).to_hsv();
        assert_eq!((h, s, v), (0, 0, 200));
    }

    #[test]
    fn test_to_hsv_black() {
        assert_eq!(Led8::default().to_hsv(), (0, 0, 0));
    }

    #[test]
    fn test_hsv_round_trip() {
        // value and saturation come back exact, hue shifts by the
        // integer rounding of the forward conversion
        let co = Led8::hsv(100, 200, 150);
        assert_eq!(co, Led8::new(32, 150, 73));
        assert_eq!(co.to_hsv(), (105, 200, 150));

        // at full saturation hue is within one count
        let co = Led8::hsv(100, 255, 150);
        assert_eq!(co, Led8::new(0, 150, 52));
        let (h, s, v) = co.to_hsv();
        assert_eq!((s, v), (255, 150));
        assert!(h.abs_diff(100) <= 1);
    }

    #[test]
    fn test_to_hsv_pure_green() {
        let (h, s, v) = Led8::new(0, 255, 0).to_hsv();
        assert_eq!((h, s, v), (85, 255, 255));
    }

    #[test]
    fn test_depth_conversion() {
        assert_eq!(Led8::new(255, 0, 0x12).to_led16(), Led16::new(65535, 0, 0x1212));
        assert_eq!(Led16::new(65535, 0, 0x1212).to_led8(), Led8::new(255, 0, 0x12));
        // identity at the same depth
        assert_eq!(Led8::new(1, 2, 3).to_led8(), Led8::new(1, 2, 3));
    }

    #[test]
    fn test_rgb8_interop() {
        assert_eq!(
            RGB8::from(Led16::new(65535, 0, 32768)),
            RGB8 { r: 255, g: 0, b: 128 }
        );
        let co: Led16 = RGB8 { r: 10, g: 20, b: 30 }.into();
        assert_eq!(co, Led16::new(2570, 5140, 7710));
    }

    #[test]
    fn test_pack_led8() {
        assert_eq!(Led8::new(1, 2, 3).pack(), 0xff03_0201);
        assert_eq!(Led8::default().pack(), 0xff00_0000);
    }

    #[test]
    fn test_pack_led16_regimes() {
        // bright: full 31/31 multiplier, top bytes pass through
        let bright = Led16::new(65535, 0, 0).pack();
        assert_eq!(bright >> 24, 0xff);
        assert_eq!(bright, 0xff00_00ff);

        // mid: 5/31 multiplier, channels scaled up to compensate
        let mid = Led16::new(10000, 0, 0).pack();
        assert_eq!(mid >> 24, 0xe5);
        assert_eq!(mid, 0xe500_00f2);

        // dim: 1/31 multiplier
        let dim = Led16::new(2000, 0, 0).pack();
        assert_eq!(dim >> 24, 0xe1);
        assert_eq!(dim, 0xe100_00f2);
    }

    #[test]
    fn test_pack_led16_custom_regimes() {
        let regimes = PackRegimes { mid: 20000, low: 100 };
        assert_eq!(Led16::new(10000, 0, 0).pack_with(regimes) >> 24, 0xe5);
        assert_eq!(Led16::new(50, 0, 0).pack_with(regimes) >> 24, 0xe1);
    }
}
