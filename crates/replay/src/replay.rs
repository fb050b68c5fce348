//! Drive a [`Dongle`] from a capture and collect what it produced.

use std::sync::Arc;

use opendongle_dongle::{
    ClientEvents, Dongle, DongleConfig, MacAddress, RadioTransport, RecordingTransport,
    build_controller_frame,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::capture::{CaptureEvent, CaptureFile, parse_hex_bytes, to_hex};
use crate::device::{DeviceHub, DeviceReport};
use crate::error::CliError;

/// Output of one capture event.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub event: CaptureEvent,
    /// Radio frames transmitted while handling the event, as hex
    pub frames: Vec<String>,
    pub reports: Vec<DeviceReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayLog {
    pub dongle_address: MacAddress,
    pub steps: Vec<ReplayStep>,
    /// Frames sent by the shutdown sweep
    pub close_frames: Vec<String>,
}

pub fn run(capture: &CaptureFile, config: DongleConfig) -> Result<ReplayLog, CliError> {
    let transport = capture
        .dongle_address
        .map(RecordingTransport::new)
        .unwrap_or_default();
    let hub = DeviceHub::default();
    let dongle = Dongle::new(
        Arc::new(transport.clone()),
        Arc::new(hub.clone()),
        config,
    );

    dongle.after_open()?;

    let mut steps = Vec::with_capacity(capture.events.len());
    for (index, event) in capture.events.iter().enumerate() {
        apply(&dongle, &hub, index, event)?;
        steps.push(ReplayStep {
            index,
            event: event.clone(),
            frames: drain_frames(&transport),
            reports: hub.take_reports(),
        });
    }

    dongle.before_close()?;
    let close_frames = drain_frames(&transport);
    info!(events = steps.len(), "Replay finished");

    Ok(ReplayLog {
        dongle_address: transport.mac_address(),
        steps,
        close_frames,
    })
}

fn apply(
    dongle: &Dongle<RecordingTransport>,
    hub: &DeviceHub,
    index: usize,
    event: &CaptureEvent,
) -> Result<(), CliError> {
    match event {
        CaptureEvent::Connect { wcid, address } => dongle.client_connected(*wcid, *address),
        CaptureEvent::Disconnect { wcid } => dongle.client_disconnected(*wcid),
        CaptureEvent::Packet { wcid, data } => {
            let packet = parse_hex_bytes(data)
                .map_err(|e| CliError::InvalidCapture(format!("event {index}: {e}")))?;
            dongle.packet_received(*wcid, &packet);
        }
        CaptureEvent::Feedback { wcid, .. } => {
            if let Some((effect, gain)) = event.effect() {
                if !hub.play_feedback(*wcid, &effect, gain) {
                    warn!(wcid, index, "No virtual device for feedback event");
                }
            }
        }
    }
    Ok(())
}

fn drain_frames(transport: &RecordingTransport) -> Vec<String> {
    let frames = transport.frames().iter().map(|f| to_hex(f)).collect();
    transport.clear();
    frames
}

/// Frame a single payload the way the dongle would.
pub fn frame(
    wcid: u8,
    client: MacAddress,
    dongle: MacAddress,
    payload: &str,
) -> Result<Vec<u8>, CliError> {
    let payload = parse_hex_bytes(payload)?;
    Ok(build_controller_frame(wcid, client, dongle, &payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opendongle_input::{Axis, Key};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const CLIENT: &str = "7c:ed:8d:11:22:33";

    fn announce_hex(product_id: u16) -> String {
        let [lo, hi] = product_id.to_le_bytes();
        let mut bytes = vec![0x02, 0x20, 0x01, 0x1C];
        bytes.extend_from_slice(&[0x7C, 0xED, 0x8D, 0x11, 0x22, 0x33, 0x00, 0x00]);
        bytes.extend_from_slice(&[0x5E, 0x04, lo, hi]);
        bytes.extend_from_slice(&[0u8; 16]);
        to_hex(&bytes)
    }

    fn neutral_input_hex() -> String {
        let mut bytes = vec![0x20, 0x00, 0x02, 0x0E];
        bytes.extend_from_slice(&[0u8; 14]);
        to_hex(&bytes)
    }

    fn capture(events: serde_json::Value) -> Result<CaptureFile, serde_json::Error> {
        serde_json::from_value(serde_json::json!({ "events": events }))
    }

    // ═══ Scenario: Announce and neutral input ══════════════════════════════

    /// GIVEN a capture that connects slot 3, announces 0x02FD and sends a
    ///       neutral input packet
    /// WHEN the capture is replayed
    /// THEN the handshake is framed for slot 3 and the report is neutral
    #[test]
    fn given_announce_and_input_when_replayed_then_handshake_and_report() -> TestResult {
        let capture = capture(serde_json::json!([
            { "type": "connect", "wcid": 3, "address": CLIENT },
            { "type": "packet", "wcid": 3, "data": announce_hex(0x02FD) },
            { "type": "packet", "wcid": 3, "data": neutral_input_hex() },
        ]))?;
        let log = run(&capture, DongleConfig::default())?;

        assert_eq!(log.steps.len(), 3);
        let connect = log.steps.first().ok_or("missing step")?;
        assert!(connect.frames.is_empty());

        let announce = log.steps.get(1).ok_or("missing step")?;
        assert_eq!(announce.frames.len(), 3);
        for frame in &announce.frames {
            assert!(frame.starts_with("00 00 00 02 00 00 00 00"));
        }

        let input = log.steps.get(2).ok_or("missing step")?;
        let report = input.reports.first().ok_or("missing report")?;
        assert_eq!(report.wcid, 3);
        assert_eq!(report.report.key(Key::A), Some(false));
        assert_eq!(report.report.axis(Axis::Y), Some(-1));
        assert_eq!(report.report.axis(Axis::Ry), Some(-1));
        assert_eq!(report.report.axis(Axis::X), Some(0));

        // shutdown sweep powers the controller off
        assert_eq!(log.close_frames.len(), 1);
        Ok(())
    }

    // ═══ Scenario: Feedback playback ═══════════════════════════════════════

    /// GIVEN an announced controller
    /// WHEN a full-gain rumble event is replayed
    /// THEN one rumble frame is transmitted
    #[test]
    fn given_announced_controller_when_feedback_then_rumble_frame() -> TestResult {
        let capture = capture(serde_json::json!([
            { "type": "connect", "wcid": 1, "address": CLIENT },
            { "type": "packet", "wcid": 1, "data": announce_hex(0x02EA) },
            { "type": "feedback", "wcid": 1, "strong": 65535, "weak": 65535, "gain": 65535 },
            { "type": "feedback", "wcid": 2, "strong": 65535, "gain": 65535 },
        ]))?;
        let log = run(&capture, DongleConfig::default())?;

        let rumble = log.steps.get(2).ok_or("missing step")?;
        assert_eq!(rumble.frames.len(), 1);
        let frame = rumble.frames.first().ok_or("missing frame")?;
        assert!(frame.contains("09 00 00 09 00 0f 00 00 ff ff"));

        let unknown = log.steps.get(3).ok_or("missing step")?;
        assert!(unknown.frames.is_empty());
        Ok(())
    }

    /// GIVEN a packet event with malformed hex
    /// WHEN the capture is replayed
    /// THEN the replay stops with InvalidCapture
    #[test]
    fn given_bad_packet_hex_when_replayed_then_error() -> TestResult {
        let capture = capture(serde_json::json!([
            { "type": "connect", "wcid": 1, "address": CLIENT },
            { "type": "packet", "wcid": 1, "data": "0g" },
        ]))?;
        assert!(matches!(
            run(&capture, DongleConfig::default()),
            Err(CliError::InvalidCapture(_))
        ));
        Ok(())
    }

    #[test]
    fn power_off_on_close_can_be_disabled() -> TestResult {
        let capture = capture(serde_json::json!([
            { "type": "connect", "wcid": 1, "address": CLIENT },
        ]))?;
        let config = DongleConfig {
            power_off_on_close: false,
            ..DongleConfig::default()
        };
        let log = run(&capture, config)?;
        assert!(log.close_frames.is_empty());
        Ok(())
    }

    #[test]
    fn frame_uses_slot_prefix() -> TestResult {
        let bytes = frame(
            4,
            CLIENT.parse()?,
            MacAddress::new([0x62, 0x45, 0xB4, 0, 0, 1]),
            "05 20 00 01 00",
        )?;
        assert_eq!(bytes.len(), 64);
        assert_eq!(bytes.get(0..4), Some(&[0u8, 0, 0, 3][..]));
        Ok(())
    }
}
