//! Shared test utilities for the wallfit test suite.
//!
//! Provides the canonical colour-block fixture, pixel counters used to check
//! where content ends up after crop, pad, resize and gap removal, and a
//! one-shot loopback HTTP server for remote sources.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let image = create_test_image();
//! assert_eq!(count_in_row(&image, 0, RED), 2000);
//! assert_close(count_in_row(&image, 1999, WHITE), 6000.0);
//! ```

use image::{ImageFormat, Rgb, RgbImage};
use std::io::{Cursor, Read, Write};
use std::net::TcpListener;

pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Pixels at colour boundaries may blend during resampling.
pub const MIXING_TOLERANCE: f64 = 4.0;

// =========================================================================
// Fixtures
// =========================================================================

/// The 6000×2000 colour-block fixture.
///
/// ```text
/// ________________________
/// |       |       |       |
/// |   R   |   G   |   B   |   rows 0..1000
/// |_______|_______|_______|
/// |                       |
/// |         White         |   rows 1000..2000
/// |_______________________|
/// ```
pub fn create_test_image() -> RgbImage {
    RgbImage::from_fn(6000, 2000, |x, y| match (x / 2000, y / 1000) {
        (_, 1) => WHITE,
        (0, _) => RED,
        (1, _) => GREEN,
        _ => BLUE,
    })
}

// =========================================================================
// Pixel counters
// =========================================================================

/// Number of pixels in row `y` exactly equal to `color`.
pub fn count_in_row(image: &RgbImage, y: u32, color: Rgb<u8>) -> u32 {
    (0..image.width())
        .filter(|&x| *image.get_pixel(x, y) == color)
        .count() as u32
}

/// Number of pixels in column `x` exactly equal to `color`.
pub fn count_in_column(image: &RgbImage, x: u32, color: Rgb<u8>) -> u32 {
    (0..image.height())
        .filter(|&y| *image.get_pixel(x, y) == color)
        .count() as u32
}

/// Assert a pixel count is within [`MIXING_TOLERANCE`] of `expected`.
#[track_caller]
pub fn assert_close(actual: u32, expected: f64) {
    assert!(
        (f64::from(actual) - expected).abs() <= MIXING_TOLERANCE,
        "expected ~{expected:.2} pixels (±{MIXING_TOLERANCE}), got {actual}"
    );
}

// =========================================================================
// Remote sources
// =========================================================================

/// PNG-encode `image` in memory.
pub fn encode_png(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Answer exactly one HTTP request on a loopback port with `status` and
/// `body`. Returns the URL to request.
pub fn serve_once(status: &'static str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/wall.png", listener.local_addr().unwrap());
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 512];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
    });
    url
}
