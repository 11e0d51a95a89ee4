//! Formatting utilities

use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a height in meters
pub fn format_meters(value: f32) -> String {
    format!("{value:.2} m")
}

/// Format a world position in meters
pub fn format_position(x: f32, y: f32, z: f32) -> String {
    format!("({x:.2}, {y:.2}, {z:.2})")
}
