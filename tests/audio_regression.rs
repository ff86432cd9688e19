use musica_dsp::{
    engine::Scheduler, DemoConfig, EngineConfig, EventBatch, OfflineDriver, SoundEvent,
};
use musica_dsp::dsp::Waveform;

const SAMPLE_RATE: f32 = 8_000.0;

fn frames(seconds: f64) -> usize {
    (seconds * SAMPLE_RATE as f64).round() as usize
}

fn scheduler_with(driver: OfflineDriver, max_voices: usize) -> Scheduler<OfflineDriver> {
    let config = EngineConfig {
        max_voices,
        noise_seed: Some(1234),
        ..Default::default()
    };
    Scheduler::new(driver, config, DemoConfig::default())
}

fn render(scheduler: &mut Scheduler<OfflineDriver>, seconds: f64) -> Vec<f32> {
    scheduler.engine_mut().driver_mut().render(frames(seconds))
}

fn energy(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s * s).sum()
}

fn zero_crossings(samples: &[f32]) -> usize {
    samples
        .windows(2)
        .filter(|w| (w[0] > 0.0 && w[1] < 0.0) || (w[0] < 0.0 && w[1] > 0.0))
        .count()
}

#[test]
fn first_dispatch_schedules_from_activation_time() {
    // The output has already produced 0.1 s when activation returns.
    let preroll = frames(0.1);
    let driver = OfflineDriver::new(SAMPLE_RATE).with_preroll(preroll);
    let mut scheduler = scheduler_with(driver, 64);

    let report = scheduler.dispatch_demo("rhythm", "simple").unwrap();
    assert!((report.anchor - 0.1).abs() < 1e-9, "anchor is activation time, not 0");

    // Rendering continues from the anchor, so index 0 is the first click.
    let out = render(&mut scheduler, 2.5);
    let beat = frames(0.625);

    for i in 0..4 {
        let onset = i * beat;
        assert!(energy(&out[onset..onset + 64]) > 0.0, "click {i} missing");
    }
    for i in 0..3 {
        let gap = &out[i * beat + 300..(i + 1) * beat];
        assert_eq!(energy(gap), 0.0, "silence expected between clicks {i} and {}", i + 1);
    }

    let accent = energy(&out[..256]);
    let pulse = energy(&out[beat..beat + 256]);
    assert!(accent > 0.0 && pulse > 0.0);
}

#[test]
fn explicit_activation_is_idempotent() {
    let mut scheduler = scheduler_with(OfflineDriver::new(SAMPLE_RATE), 64);

    scheduler.activate_clock().unwrap();
    let first = scheduler.engine().clock().unwrap().clone();
    scheduler.activate_clock().unwrap();
    let second = scheduler.engine().clock().unwrap().clone();

    assert!(scheduler.is_active());
    assert!(first.same_as(&second));
}

#[test]
fn ascending_scale_rises_note_by_note() {
    let mut scheduler = scheduler_with(OfflineDriver::new(SAMPLE_RATE), 64);
    scheduler.dispatch_demo("melody", "asc").unwrap();

    let out = render(&mut scheduler, 1.5);

    // Window inside each note after the previous note's tail has stopped
    let crossings: Vec<usize> = (0..8)
        .map(|i| {
            let start = frames(0.15 * i as f64 + 0.03);
            let end = frames(0.15 * i as f64 + 0.14);
            zero_crossings(&out[start..end])
        })
        .collect();

    assert!(crossings.iter().all(|&c| c > 0));
    assert!(
        crossings.windows(2).all(|w| w[1] >= w[0]),
        "pitch should not fall: {crossings:?}"
    );
    // The octave has roughly twice as many crossings as the tonic
    let ratio = crossings[7] as f64 / crossings[0] as f64;
    assert!((ratio - 2.0).abs() < 0.1, "octave ratio {ratio}");

    // Last note: 1.05 + 0.15 + 0.02 tail
    assert_eq!(energy(&out[frames(1.23)..]), 0.0);
}

#[test]
fn batches_dispatched_later_do_not_overlap_earlier_ones() {
    let mut scheduler = scheduler_with(OfflineDriver::new(SAMPLE_RATE), 64);

    let first = scheduler.dispatch_demo("timbre", "sine").unwrap();
    let out = render(&mut scheduler, 1.0);
    let second = scheduler.dispatch_demo("timbre", "sawtooth").unwrap();

    assert_eq!(first.anchor, 0.0);
    assert!((second.anchor - 1.0).abs() < 1e-9);
    // First tone is over (0.6 + 0.02) before the second is dispatched
    assert_eq!(energy(&out[frames(0.62)..]), 0.0);

    let out = render(&mut scheduler, 1.0);
    assert!(energy(&out[..frames(0.6)]) > 0.0);
}

#[test]
fn bad_events_are_skipped_while_siblings_play() {
    let mut scheduler = scheduler_with(OfflineDriver::new(SAMPLE_RATE), 64);
    let batch: EventBatch = vec![
        SoundEvent::tone(0.0, 0.2, 0.0, Waveform::Sine, 0.2),
        SoundEvent::tone(0.5, 0.2, 330.0, Waveform::Square, 0.2),
    ]
    .into_iter()
    .collect();

    let report = scheduler.dispatch(&batch).unwrap();
    assert_eq!((report.scheduled, report.skipped), (1, 1));

    let out = render(&mut scheduler, 1.0);
    assert_eq!(energy(&out[..frames(0.5)]), 0.0);
    assert!(energy(&out[frames(0.5)..frames(0.7)]) > 0.0);
}

#[test]
fn exhausted_voice_pool_drops_without_failing() {
    let mut scheduler = scheduler_with(OfflineDriver::new(SAMPLE_RATE), 4);

    let report = scheduler.dispatch_demo("textura", "homo").unwrap();
    assert_eq!(report.scheduled, 24);

    let out = render(&mut scheduler, 1.5);
    let stats = scheduler.engine().stats().unwrap();
    assert_eq!(stats.dropped_voices(), 20);
    assert!(energy(&out) > 0.0);

    // The next batch still plays once the pool drains.
    scheduler.dispatch_demo("harmony", "triada").unwrap();
    let out = render(&mut scheduler, 1.0);
    assert!(energy(&out[..frames(0.5)]) > 0.0);
}

#[test]
fn every_demo_renders_within_unit_range() {
    let mut scheduler = scheduler_with(OfflineDriver::new(SAMPLE_RATE), 64);

    for entry in musica_dsp::sequencing::CATALOG {
        let report = scheduler
            .dispatch_demo(entry.category.name(), entry.variant)
            .unwrap();
        assert_eq!(report.skipped, 0, "{} {}", entry.category, entry.variant);

        let out = render(&mut scheduler, report.span + 0.1);
        assert!(out.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
        assert!(energy(&out) > 0.0, "{} {} is silent", entry.category, entry.variant);
    }
}
