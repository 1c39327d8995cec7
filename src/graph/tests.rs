use std::sync::Arc;

use super::filter::{Band, FilterChain, clamp_gain};
use super::manager::{EqualizerState, SignalGraph};
use crate::library::TrackSource;

fn src(uri: &str) -> TrackSource {
    TrackSource::new(uri)
}

#[test]
fn gain_is_clamped_regardless_of_magnitude() {
    assert_eq!(clamp_gain(0.0), 0.0);
    assert_eq!(clamp_gain(11.9), 11.9);
    assert_eq!(clamp_gain(12.0), 12.0);
    assert_eq!(clamp_gain(400.0), 12.0);
    assert_eq!(clamp_gain(-12.0), -12.0);
    assert_eq!(clamp_gain(-9000.0), -12.0);
    assert_eq!(clamp_gain(f32::INFINITY), 12.0);
}

#[test]
fn manager_clamps_gains_on_the_way_in() {
    let mut graph = SignalGraph::new(EqualizerState::default());
    assert_eq!(graph.set_gain(Band::Bass, 99.0), 12.0);
    assert_eq!(graph.set_gain(Band::Treble, -99.0), -12.0);
    assert_eq!(graph.equalizer().bass_db, 12.0);
    assert_eq!(graph.equalizer().treble_db, -12.0);
    assert_eq!(graph.equalizer().mid_db, 0.0);
}

#[test]
fn out_of_range_defaults_are_clamped_at_construction() {
    let graph = SignalGraph::new(EqualizerState {
        bass_db: 40.0,
        mid_db: -40.0,
        treble_db: 3.0,
    });
    assert_eq!(graph.equalizer().bass_db, 12.0);
    assert_eq!(graph.equalizer().mid_db, -12.0);
    assert_eq!(graph.equalizer().treble_db, 3.0);
}

#[test]
fn context_is_created_lazily_on_first_attach() {
    let mut graph = SignalGraph::new(EqualizerState::default());
    assert!(!graph.has_context());
    assert_eq!(graph.connected_sources(), 0);

    graph.attach(&src("a.mp3")).unwrap();
    assert!(graph.has_context());
    assert!(graph.is_suspended());

    graph.resume();
    assert!(!graph.is_suspended());
}

#[test]
fn attach_keeps_exactly_one_source_connected() {
    let mut graph = SignalGraph::new(EqualizerState::default());
    graph.attach(&src("x.mp3")).unwrap();
    assert_eq!(graph.connected_sources(), 1);
    assert_eq!(graph.attached_source(), Some(&src("x.mp3")));

    // Mid-playback switch: X must be fully disconnected.
    graph.attach(&src("y.mp3")).unwrap();
    assert_eq!(graph.connected_sources(), 1);
    assert_eq!(graph.attached_source(), Some(&src("y.mp3")));
}

#[test]
fn attach_is_idempotent_for_the_current_source() {
    let mut graph = SignalGraph::new(EqualizerState::default());
    let first = graph.attach(&src("a.mp3")).unwrap();
    let second = graph.attach(&src("a.mp3")).unwrap();
    // Same chain, no duplicate connection.
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(graph.connected_sources(), 1);
}

#[test]
fn chain_persists_across_track_changes() {
    let mut graph = SignalGraph::new(EqualizerState::default());
    let tap_a = graph.attach(&src("a.mp3")).unwrap();
    graph.set_gain(Band::Mid, 6.0);

    let tap_b = graph.attach(&src("b.mp3")).unwrap();
    assert!(Arc::ptr_eq(&tap_a, &tap_b));
    assert_eq!(tap_b.lock().unwrap().gain(Band::Mid), 6.0);
}

#[test]
fn gains_set_before_first_attach_reach_the_chain() {
    let mut graph = SignalGraph::new(EqualizerState::default());
    graph.set_gain(Band::Bass, -4.0);

    let tap = graph.attach(&src("a.mp3")).unwrap();
    assert_eq!(tap.lock().unwrap().gain(Band::Bass), -4.0);
}

#[test]
fn zero_gain_chain_is_transparent() {
    let mut chain = FilterChain::new([0.0, 0.0, 0.0]);
    for i in 0..64 {
        let sample = ((i as f32) * 0.37).sin() * 0.5;
        let out = chain.process(sample, 0);
        assert!((out - sample).abs() < 1e-4, "sample {i}: {out} vs {sample}");
    }
}

#[test]
fn bass_boost_amplifies_a_low_frequency_tone() {
    let mut chain = FilterChain::new([12.0, 0.0, 0.0]);
    // 40 Hz tone at 44.1 kHz, well inside the low shelf.
    let sr = 44_100.0;
    let freq = 40.0;
    let mut peak_in: f32 = 0.0;
    let mut peak_out: f32 = 0.0;
    for i in 0..44_100 {
        let sample = (2.0 * std::f32::consts::PI * freq * i as f32 / sr).sin() * 0.25;
        let out = chain.process(sample, 0);
        // Skip the transient at the start.
        if i > 4_000 {
            peak_in = peak_in.max(sample.abs());
            peak_out = peak_out.max(out.abs());
        }
    }
    assert!(peak_out > peak_in * 2.0, "expected ~+12 dB, got {peak_out} vs {peak_in}");
}

#[test]
fn surround_channels_pass_through_unfiltered() {
    let mut chain = FilterChain::new([12.0, 12.0, 12.0]);
    assert_eq!(chain.process(0.3, 2), 0.3);
    assert_eq!(chain.process(0.3, 5), 0.3);
}
