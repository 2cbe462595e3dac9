mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use led_pattern_engine::{
        CommandQueue, Duration, Led16, LedStrip, Pattern, PatternCommand, PatternContext,
        PatternManager, PatternSlot, QueueFull,
    };

    /// Fills the whole strip with its single color parameter.
    struct Mono {
        name: &'static str,
        hex: u32,
    }

    impl Pattern<u16> for Mono {
        fn name(&self) -> &'static str {
            self.name
        }

        fn inner_init(&mut self, ctx: &mut PatternContext<u16>) {
            ctx.params.add_color("color", Led16::from_hex(self.hex));
        }

        fn inner_tick(
            &mut self,
            _delta: Duration,
            ctx: &mut PatternContext<u16>,
            strip: &mut LedStrip<u16>,
        ) {
            strip.fill(ctx.params.value_color(0));
        }
    }

    fn red_blue_manager() -> PatternManager<u16> {
        let mut manager = PatternManager::new();
        manager.add_pattern(Mono {
            name: "red",
            hex: 0xff0000,
        });
        manager.add_pattern(Mono {
            name: "blue",
            hex: 0x0000ff,
        });
        manager.init_patterns(4);
        manager
    }

    const RED: Led16 = Led16 { r: 65535, g: 0, b: 0 };
    const BLUE: Led16 = Led16 { r: 0, g: 0, b: 65535 };

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_registration_and_lookup() {
        let manager = red_blue_manager();
        assert_eq!(manager.pattern_count(), 2);
        assert_eq!(manager.pattern_index("blue"), Some(1));
        assert_eq!(manager.pattern_index("nope"), None);
        assert_eq!(manager.pattern(0).unwrap().name(), "red");
        assert_eq!(manager.pattern(0).unwrap().led_count(), 4);
        assert_eq!(manager.current_index(), None);
    }

    #[test]
    fn test_no_pattern_renders_black() {
        let mut manager = PatternManager::<u16>::new();
        let mut strip = LedStrip::new(4);
        strip.fill(RED);
        manager.set_pattern(0, ms(0));
        manager.tick(ms(20), &mut strip);
        assert_eq!(strip.leds(), [Led16::default(); 4]);
    }

    #[test]
    fn test_immediate_switch() {
        let mut manager = red_blue_manager();
        let mut strip = LedStrip::new(4);
        manager.set_pattern(0, ms(0));
        assert!(!manager.is_crossfading());
        manager.tick(ms(20), &mut strip);
        assert_eq!(strip.leds()[0], RED);
    }

    #[test]
    fn test_out_of_range_index_wraps_to_first() {
        let mut manager = red_blue_manager();
        manager.set_pattern(7, ms(0));
        assert_eq!(manager.current_index(), Some(0));
    }

    #[test]
    fn test_visual_crossfade_blend_sequence() {
        let mut manager = red_blue_manager();
        let mut strip = LedStrip::new(4);
        manager.set_pattern(0, ms(0));
        manager.tick(ms(10), &mut strip);

        manager.set_pattern(1, ms(200));
        assert!(manager.is_crossfading());

        // four 50ms frames walk the blend 25% at a time
        manager.tick(ms(50), &mut strip);
        assert_eq!(strip.leds()[0], Led16::new(49151, 0, 16384));

        manager.tick(ms(50), &mut strip);
        assert_eq!(strip.leds()[0], Led16::new(32768, 0, 32768));

        manager.tick(ms(50), &mut strip);
        assert_eq!(strip.leds()[0], Led16::new(16384, 0, 49151));

        manager.tick(ms(50), &mut strip);
        assert_eq!(strip.leds()[0], BLUE);
        assert!(!manager.is_crossfading());

        // later frames hold the destination
        manager.tick(ms(50), &mut strip);
        assert_eq!(strip.leds()[0], BLUE);
    }

    #[test]
    fn test_new_switch_supersedes_running_crossfade() {
        let mut manager = red_blue_manager();
        let mut strip = LedStrip::new(4);
        manager.set_pattern(0, ms(0));
        manager.tick(ms(10), &mut strip);

        manager.set_pattern(1, ms(1000));
        manager.tick(ms(100), &mut strip);

        // switch back mid-fade; the old fade is gone on the spot
        manager.set_pattern(0, ms(1000));
        assert_eq!(manager.current_index(), Some(0));

        manager.tick(ms(500), &mut strip);
        assert!(manager.is_crossfading());
        assert_eq!(strip.leds()[0], Led16::new(32768, 0, 32768));

        manager.tick(ms(500), &mut strip);
        assert!(!manager.is_crossfading());
        assert_eq!(strip.leds()[0], RED);
    }

    #[test]
    fn test_param_morph_interpolates_then_lands_exact() {
        let mut manager = red_blue_manager();
        let mut strip = LedStrip::new(4);
        manager.set_pattern(0, ms(0));
        manager.tick(ms(10), &mut strip);

        // re-select the current pattern with a new color target
        manager.set_pattern_with_params(0, 0, &[0x0000ff], ms(400));
        assert!(manager.is_crossfading());
        assert_eq!(manager.current_index(), Some(0));

        manager.tick(ms(100), &mut strip);
        // a quarter of the way from full red to full blue
        assert_eq!(strip.leds()[0], Led16::new(49151, 0, 16383));
        assert_eq!(
            manager.pattern(0).unwrap().param_color(0),
            Led16::new(49151, 0, 16383)
        );

        // saved parameters report the destination, not the blend
        let mut out = [0u32; 1];
        manager.get_params(0, &mut out);
        assert_eq!(out, [0x0000ff]);

        manager.tick(ms(300), &mut strip);
        assert!(!manager.is_crossfading());
        // the exact target value, no interpolation residue
        assert_eq!(manager.pattern(0).unwrap().param_color(0), BLUE);
        assert_eq!(strip.leds()[0], BLUE);
    }

    #[test]
    fn test_zero_fade_morph_applies_immediately() {
        let mut manager = red_blue_manager();
        let mut strip = LedStrip::new(4);
        manager.set_pattern(0, ms(0));
        manager.tick(ms(10), &mut strip);

        manager.set_pattern_with_params(0, 0, &[0x00ff00], ms(0));
        assert!(!manager.is_crossfading());
        manager.tick(ms(20), &mut strip);
        assert_eq!(strip.leds()[0], Led16::new(0, 65535, 0));
    }

    #[test]
    fn test_switch_with_params_sets_targets_up_front() {
        let mut manager = red_blue_manager();
        let mut strip = LedStrip::new(4);
        manager.set_pattern(0, ms(0));
        manager.tick(ms(10), &mut strip);

        // different pattern: params land immediately, blend is visual
        manager.set_pattern_with_params(1, 0, &[0x00ff00], ms(200));
        assert_eq!(
            manager.pattern(1).unwrap().param_color(0),
            Led16::new(0, 65535, 0)
        );
        assert!(manager.is_crossfading());
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut manager = red_blue_manager();
        let mut strip = LedStrip::new(4);
        manager.set_pattern(0, ms(0));
        manager.tick(Duration::from_secs(10), &mut strip);
        // a 10s gap counts as 100ms of animation time
        assert_eq!(manager.pattern(0).unwrap().total(), ms(100));
    }

    #[test]
    fn test_changed_fires_once_per_edit() {
        let changes = Rc::new(Cell::new(0u32));

        struct ChangeCounter {
            changes: Rc<Cell<u32>>,
        }

        impl Pattern<u16> for ChangeCounter {
            fn name(&self) -> &'static str {
                "counter"
            }

            fn inner_init(&mut self, ctx: &mut PatternContext<u16>) {
                ctx.params.add_int("level", 1);
            }

            fn inner_changed(&mut self, _ctx: &mut PatternContext<u16>) {
                self.changes.set(self.changes.get() + 1);
            }

            fn inner_tick(
                &mut self,
                _delta: Duration,
                _ctx: &mut PatternContext<u16>,
                _strip: &mut LedStrip<u16>,
            ) {
            }
        }

        let mut slot = PatternSlot::new(Box::new(ChangeCounter {
            changes: changes.clone(),
        }));
        slot.init(4);
        let mut strip = LedStrip::new(4);

        // the first tick primes caches from the fresh parameter set
        slot.tick(ms(20), &mut strip);
        assert_eq!(changes.get(), 1);
        slot.tick(ms(20), &mut strip);
        assert_eq!(changes.get(), 1);

        slot.set_param_int(0, 5);
        slot.tick(ms(20), &mut strip);
        slot.tick(ms(20), &mut strip);
        assert_eq!(changes.get(), 2);
    }

    #[test]
    fn test_performance_info() {
        let mut manager = red_blue_manager();
        let mut strip = LedStrip::new(4);
        manager.set_pattern(0, ms(0));

        let fresh = manager.performance_info();
        assert_eq!(fresh.ms_per_frame, 1);
        assert_eq!(fresh.frames_per_second, 1000);

        for _ in 0..20 {
            manager.tick(ms(20), &mut strip);
        }
        let info = manager.performance_info();
        assert_eq!(info.ms_per_frame, 20);
        assert_eq!(info.frames_per_second, 50);
    }

    #[test]
    fn test_command_queue_drains_in_order() {
        let mut manager = red_blue_manager();
        let queue = CommandQueue::<8>::new();
        let sender = queue.sender();

        sender
            .try_send(PatternCommand::SetPattern {
                index: 1,
                fade_ms: 0,
            })
            .unwrap();
        sender
            .try_send(PatternCommand::SetParamColor {
                param: 0,
                hex: 0x123456,
            })
            .unwrap();

        manager.process_commands(&queue);
        assert_eq!(manager.current_index(), Some(1));
        assert_eq!(
            manager.pattern(1).unwrap().param_color(0),
            Led16::from_hex(0x123456)
        );
        assert!(queue.try_receive().is_none());
    }

    #[test]
    fn test_command_queue_full() {
        let queue = CommandQueue::<2>::new();
        queue.try_send(PatternCommand::MidiPanic).unwrap();
        queue.try_send(PatternCommand::MidiPanic).unwrap();
        assert_eq!(
            queue.try_send(PatternCommand::MidiPanic),
            Err(QueueFull(PatternCommand::MidiPanic))
        );
    }

    #[test]
    fn test_commands_on_missing_targets_do_nothing() {
        let mut manager = red_blue_manager();
        manager.apply_command(PatternCommand::SetParamInt { param: 0, value: 5 });
        manager.apply_command(PatternCommand::Action {
            param: 9,
            pressed: true,
        });
        manager.apply_command(PatternCommand::MidiPanic);
        assert_eq!(manager.current_index(), None);
    }
}
