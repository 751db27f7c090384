//! Behavior of the gateway radio entity against a recording mock transport

mod common;

use std::time::Duration;

use common::{test_device, test_radio, MockTransport};
use gateway_radio::{
    DeviceClass, Entity, MediaPlayer, PlayerState, SupportedFeatures, SETTLE_DELAY,
};
use proptest::prelude::*;
use rstest::rstest;
use serde_json::{json, Value};

// ============================================================================
// Playback commands
// ============================================================================

#[tokio::test]
async fn play_acknowledged_marks_playing_and_publishes() {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport.clone());
    let mut updates = radio.subscribe();

    assert!(radio.play().await);

    assert_eq!(radio.player_state(), PlayerState::Playing);
    assert_eq!(radio.pending_settle_delay(), SETTLE_DELAY);
    assert_eq!(transport.calls_to("play_fm"), vec![vec![json!("on")]]);

    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().state.as_deref(), Some("playing"));
}

#[tokio::test]
async fn play_transport_failure_leaves_state_untouched() {
    let transport = MockTransport::new();
    transport.set_unreachable(true);
    let mut radio = test_radio(transport.clone());
    let updates = radio.subscribe();

    assert!(!radio.play().await);

    assert_eq!(radio.player_state(), PlayerState::Paused);
    assert_eq!(radio.pending_settle_delay(), Duration::ZERO);
    assert!(!updates.has_changed().unwrap());
    assert_eq!(transport.calls_to("play_fm").len(), 1);
}

#[rstest]
#[case::error_marker(json!(["error"]))]
#[case::empty_array(json!([]))]
#[case::bare_string(json!("ok"))]
#[case::object(json!({"result": "ok"}))]
#[tokio::test]
async fn play_without_ok_ack_is_not_success(#[case] reply: Value) {
    let transport = MockTransport::new();
    transport.reply("play_fm", reply);
    let mut radio = test_radio(transport);

    assert!(!radio.play().await);
    assert_eq!(radio.player_state(), PlayerState::Paused);
}

#[tokio::test]
async fn pause_publishes_without_settle_delay() {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport.clone());
    assert!(radio.play().await);
    let mut updates = radio.subscribe();

    assert!(radio.pause().await);

    assert_eq!(radio.player_state(), PlayerState::Paused);
    assert_eq!(transport.calls_to("play_fm").last(), Some(&vec![json!("off")]));
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().state.as_deref(), Some("paused"));
}

#[tokio::test]
async fn pause_failure_keeps_playing() {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport.clone());
    assert!(radio.play().await);

    transport.fail("play_fm");
    assert!(!radio.pause().await);
    assert_eq!(radio.player_state(), PlayerState::Playing);
}

#[tokio::test]
async fn next_track_sends_prev_without_publishing() {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport.clone());
    let updates = radio.subscribe();

    assert!(radio.next_track().await);

    assert_eq!(transport.calls_to("play_fm"), vec![vec![json!("prev")]]);
    assert_eq!(radio.player_state(), PlayerState::Playing);
    assert_eq!(radio.pending_settle_delay(), SETTLE_DELAY);
    assert!(!updates.has_changed().unwrap());
}

#[tokio::test]
async fn previous_track_sends_next_without_publishing() {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport.clone());
    let updates = radio.subscribe();

    assert!(radio.previous_track().await);

    assert_eq!(transport.calls_to("play_fm"), vec![vec![json!("next")]]);
    assert_eq!(radio.player_state(), PlayerState::Playing);
    assert_eq!(radio.pending_settle_delay(), SETTLE_DELAY);
    assert!(!updates.has_changed().unwrap());
}

#[tokio::test]
async fn track_change_failure_arms_nothing() {
    let transport = MockTransport::new();
    transport.fail("play_fm");
    let mut radio = test_radio(transport);

    assert!(!radio.next_track().await);
    assert!(!radio.previous_track().await);
    assert_eq!(radio.player_state(), PlayerState::Paused);
    assert_eq!(radio.pending_settle_delay(), Duration::ZERO);
}

// ============================================================================
// Volume
// ============================================================================

#[rstest]
#[case(0.5, "50.0")]
#[case(0.0, "0.0")]
#[case(1.0, "100.0")]
#[case(0.25, "25.0")]
#[tokio::test]
async fn set_volume_sends_percentage_string(#[case] level: f64, #[case] expected: &str) {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport.clone());

    assert!(radio.set_volume(level).await);
    assert_eq!(transport.calls_to("volume_ctrl_fm"), vec![vec![json!(expected)]]);
}

#[tokio::test]
async fn set_volume_success_waits_for_poll_to_update_level() {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport.clone());
    let updates = radio.subscribe();

    assert!(radio.set_volume(0.5).await);

    assert_eq!(radio.volume_level(), None);
    assert!(!updates.has_changed().unwrap());
}

#[tokio::test]
async fn set_volume_transport_failure_keeps_cached_level() {
    let transport = MockTransport::new();
    transport.reply("get_prop_fm", json!({"current_status": "pause", "current_volume": 30}));
    let mut radio = test_radio(transport.clone());
    radio.refresh().await;

    transport.fail("volume_ctrl_fm");
    assert!(!radio.set_volume(0.8).await);
    assert_eq!(radio.volume_level(), Some(0.3));
}

#[rstest]
#[case::above_range(1.5)]
#[case::below_range(-0.1)]
#[tokio::test]
async fn set_volume_out_of_range_caches_level_without_sending(#[case] level: f64) {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport.clone());
    let mut updates = radio.subscribe();

    assert!(!radio.set_volume(level).await);

    assert!(transport.calls_to("volume_ctrl_fm").is_empty());
    assert_eq!(radio.volume_level(), Some(level));
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().volume_level, Some(level));
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn refresh_reads_status_and_volume() {
    let transport = MockTransport::new();
    transport.reply(
        "get_prop_fm",
        json!({"current_status": "run", "current_volume": 42, "current_program": 527782008}),
    );
    let mut radio = test_radio(transport.clone());

    radio.refresh().await;

    assert!(radio.available());
    assert_eq!(radio.player_state(), PlayerState::Playing);
    assert_eq!(radio.volume_level(), Some(0.42));
    assert_eq!(radio.state_attributes().get("current_volume"), Some(&json!(42)));
    assert_eq!(radio.media_title().as_deref(), Some("527782008"));
    assert_eq!(transport.calls_to("get_prop_fm"), vec![Vec::<Value>::new()]);
}

#[rstest]
#[case::run(json!("run"), PlayerState::Playing)]
#[case::pause(json!("pause"), PlayerState::Paused)]
#[case::other(json!("stopped"), PlayerState::Unknown)]
#[case::not_a_string(json!(3), PlayerState::Unknown)]
#[case::null(Value::Null, PlayerState::Unknown)]
#[tokio::test]
async fn refresh_maps_fm_status(#[case] status: Value, #[case] expected: PlayerState) {
    let transport = MockTransport::new();
    transport.reply("get_prop_fm", json!({"current_status": status, "current_volume": 10}));
    let mut radio = test_radio(transport);

    radio.refresh().await;

    assert_eq!(radio.player_state(), expected);
    assert_eq!(radio.state(), Some(expected.as_str()));
}

#[tokio::test]
async fn refresh_without_volume_reads_zero() {
    let transport = MockTransport::new();
    transport.reply("get_prop_fm", json!({"current_status": "pause"}));
    let mut radio = test_radio(transport);

    radio.refresh().await;

    assert_eq!(radio.volume_level(), Some(0.0));
    assert_eq!(radio.media_title(), None);
}

#[tokio::test]
async fn refresh_failure_marks_unavailable_and_keeps_cache() {
    let transport = MockTransport::new();
    transport.reply("get_prop_fm", json!({"current_status": "run", "current_volume": 60}));
    let mut radio = test_radio(transport.clone());
    radio.refresh().await;

    transport.set_unreachable(true);
    radio.refresh().await;

    assert!(!radio.available());
    assert_eq!(radio.player_state(), PlayerState::Playing);
    assert_eq!(radio.volume_level(), Some(0.6));
    assert_eq!(radio.state_attributes().get("current_status"), Some(&json!("run")));

    transport.set_unreachable(false);
    radio.refresh().await;
    assert!(radio.available());
}

#[rstest]
#[case::array_payload(json!(["ok"]))]
#[case::bad_volume(json!({"current_status": "run", "current_volume": "loud"}))]
#[tokio::test]
async fn refresh_with_malformed_payload_marks_unavailable(#[case] payload: Value) {
    let transport = MockTransport::new();
    transport.reply("get_prop_fm", payload);
    let mut radio = test_radio(transport);

    radio.refresh().await;

    assert!(!radio.available());
    assert_eq!(radio.player_state(), PlayerState::Paused);
    assert_eq!(radio.volume_level(), None);
}

#[tokio::test]
async fn refresh_merges_attributes_without_dropping_keys() {
    let transport = MockTransport::new();
    transport.reply(
        "get_prop_fm",
        json!({"current_status": "run", "current_volume": 20, "current_program": "Radio 1"}),
    );
    let mut radio = test_radio(transport.clone());
    radio.refresh().await;

    transport.reply("get_prop_fm", json!({"current_status": "pause", "current_volume": 35}));
    radio.refresh().await;

    let attributes = radio.state_attributes();
    assert_eq!(attributes.get("current_status"), Some(&json!("pause")));
    assert_eq!(attributes.get("current_volume"), Some(&json!(35)));
    assert_eq!(attributes.get("current_program"), Some(&json!("Radio 1")));
    assert_eq!(radio.media_title().as_deref(), Some("Radio 1"));
}

#[tokio::test(start_paused = true)]
async fn refresh_after_play_waits_for_settle_delay_once() {
    let transport = MockTransport::new();
    transport.reply("get_prop_fm", json!({"current_status": "run", "current_volume": 50}));
    let mut radio = test_radio(transport);

    assert!(radio.play().await);

    let started = tokio::time::Instant::now();
    radio.refresh().await;
    let first = started.elapsed();
    assert!(first >= SETTLE_DELAY, "waited only {:?}", first);
    assert!(first < SETTLE_DELAY + Duration::from_secs(1));
    assert_eq!(radio.pending_settle_delay(), Duration::ZERO);

    let started = tokio::time::Instant::now();
    radio.refresh().await;
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn refresh_without_command_does_not_wait() {
    let transport = MockTransport::new();
    let mut radio = test_radio(transport);

    let started = tokio::time::Instant::now();
    radio.refresh().await;
    assert!(started.elapsed() < Duration::from_secs(1));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn polled_volume_is_scaled_to_unit_range(percent in 0u32..=100) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let transport = MockTransport::new();
        transport.reply("get_prop_fm", json!({"current_status": "run", "current_volume": percent}));
        let mut radio = test_radio(transport);

        runtime.block_on(radio.refresh());

        let level = radio.volume_level().unwrap();
        prop_assert!((0.0..=1.0).contains(&level));
        prop_assert!((level - f64::from(percent) / 100.0).abs() < 1e-12);
    }
}

// ============================================================================
// Published state and raw commands
// ============================================================================

#[tokio::test]
async fn snapshot_describes_the_entity() {
    let transport = MockTransport::new();
    transport.reply(
        "get_prop_fm",
        json!({"current_status": "run", "current_volume": 70, "current_program": "Jazz FM"}),
    );
    let mut radio = test_radio(transport);
    radio.refresh().await;

    let snapshot = radio.snapshot();
    assert_eq!(snapshot.unique_id, "lumi.gateway.v3-34:CE:00:AA:BB:CC");
    assert_eq!(snapshot.name, "Xiaomi Gateway Radio");
    assert!(snapshot.available);
    assert_eq!(snapshot.state.as_deref(), Some("playing"));
    assert_eq!(snapshot.device_class, DeviceClass::Speaker);
    assert_eq!(snapshot.supported_features, 16437);
    assert_eq!(snapshot.volume_level, Some(0.7));
    assert_eq!(snapshot.media_title.as_deref(), Some("Jazz FM"));

    assert_eq!(radio.supported_features(), SupportedFeatures::radio());
    assert_eq!(radio.device_class(), DeviceClass::Speaker);
    assert!(radio.should_poll());
}

#[tokio::test]
async fn initial_state_is_paused_and_available() {
    let radio = test_radio(MockTransport::new());

    assert_eq!(radio.player_state(), PlayerState::Paused);
    assert!(radio.available());
    assert_eq!(radio.volume_level(), None);
    assert!(radio.state_attributes().is_empty());
    assert_eq!(radio.subscribe().borrow().state.as_deref(), Some("paused"));
}

#[tokio::test]
async fn send_raw_command_passes_method_through() {
    let transport = MockTransport::new();
    let radio = test_radio(transport.clone());

    assert!(
        radio
            .send_raw_command("set_rgb", vec![json!(1677786880)])
            .await
    );
    assert_eq!(transport.calls(), vec![("set_rgb".to_string(), vec![json!(1677786880)])]);

    transport.fail("set_rgb");
    assert!(!radio.send_raw_command("set_rgb", vec![json!(0)]).await);
}

#[tokio::test]
async fn commands_and_polls_are_logged_with_json_payloads() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let transport = MockTransport::new();
    transport.reply("get_prop_fm", json!({"current_status": "run", "current_volume": 15}));
    let mut radio = test_radio(transport.clone());

    assert!(radio.send_raw_command("play_fm", vec![json!("on")]).await);
    radio.refresh().await;

    assert_eq!(radio.volume_level(), Some(0.15));
    assert_eq!(transport.calls().len(), 2);
}

// ============================================================================
// Generic device
// ============================================================================

#[tokio::test]
async fn generic_device_has_no_state_and_skips_refresh() {
    let transport = MockTransport::new();
    let mut device = test_device(transport.clone());

    device.refresh().await;

    assert_eq!(device.state(), None);
    assert!(device.available());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn run_command_reports_acknowledgement() {
    let transport = MockTransport::new();
    transport.reply("get_gateway", json!(["not ok"]));
    let device = test_device(transport.clone());

    assert!(
        device
            .run_command("Turning on failed.", |t| t.send("toggle_plug", &[json!("on")]))
            .await
    );
    assert!(
        !device
            .run_command("Reading failed.", |t| t.send("get_gateway", &[]))
            .await
    );
    assert_eq!(transport.calls().len(), 2);
}

#[test]
fn set_properties_accepts_plain_names() {
    let mut device = test_device(MockTransport::new());

    let names = device
        .set_properties(&["current_status", "current_volume"])
        .unwrap();

    assert_eq!(names, vec!["current_status", "current_volume"]);
    assert_eq!(device.properties().len(), 2);
    assert_eq!(device.properties_getter(), "get_prop_fm");
}

#[test]
fn set_properties_parses_scoped_descriptors() {
    let mut device = test_device(MockTransport::new()).with_properties_getter("get_properties");

    let names = device
        .set_properties(&[r#"{"did": "volume", "siid": 2, "piid": 1}"#])
        .unwrap();
    assert_eq!(names, vec!["volume"]);

    assert!(device.set_properties(&["volume"]).is_err());
}
