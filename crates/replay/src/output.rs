//! Output formatting for replay results

use serde_json::json;

use crate::capture::to_hex;
use crate::device::DeviceReport;
use crate::replay::ReplayLog;

/// Print error in JSON format
pub fn print_error_json(error: &anyhow::Error) {
    let error_json = json!({
        "success": false,
        "error": { "message": error.to_string() }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &anyhow::Error) {
    eprintln!("Error: {error}");

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  Caused by: {err}");
        source = err.source();
    }
}

pub fn print_replay(log: &ReplayLog, json: bool) {
    if json {
        let output = json!({ "success": true, "replay": log });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format replay as JSON: {e}"),
        }
        return;
    }

    println!("Dongle {}", log.dongle_address);
    for step in &log.steps {
        println!("[{}] {}", step.index, step.event);
        for frame in &step.frames {
            println!("    tx     {frame}");
        }
        for report in &step.reports {
            println!("    report {}", format_report(report));
        }
    }
    println!("close");
    for frame in &log.close_frames {
        println!("    tx     {frame}");
    }
}

pub fn print_frame(frame: &[u8], json: bool) {
    if json {
        let output = json!({ "success": true, "frame": to_hex(frame), "length": frame.len() });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format frame as JSON: {e}"),
        }
    } else {
        println!("{}", to_hex(frame));
    }
}

fn format_report(report: &DeviceReport) -> String {
    let pressed: Vec<String> = report
        .report
        .keys
        .iter()
        .filter(|(_, pressed)| **pressed)
        .map(|(key, _)| format!("{key:?}"))
        .collect();
    let axes: Vec<String> = report
        .report
        .axes
        .iter()
        .map(|(axis, value)| format!("{axis:?}={value}"))
        .collect();
    format!(
        "wcid={} keys=[{}] axes=[{}]",
        report.wcid,
        pressed.join(","),
        axes.join(" ")
    )
}
