//! Common test utilities and helpers for the assistant tests
//!
//! This module provides shared utilities for testing the preprocessing,
//! request and session layers without a real inference endpoint.

#![allow(dead_code)]

/// Synthetic test images
pub mod test_images {
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    /// Smooth diagonal gradient; compresses well and survives JPEG closely.
    pub fn gradient(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            Rgb([
                (x * 255 / w.max(1)) as u8,
                (y * 255 / h.max(1)) as u8,
                ((x + y) * 255 / (w + h).max(1)) as u8,
            ])
        }))
    }

    /// Deterministic noisy texture; exercises the encoder's rate control.
    pub fn textured(w: u32, h: u32) -> DynamicImage {
        let mut state: u32 = 0x2545_F491;
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state & 0x3F) as u8;
            Rgb([
                ((x * 3) % 192) as u8 + noise,
                ((y * 5) % 192) as u8 + noise / 2,
                (((x ^ y) * 7) % 192) as u8 + noise / 3,
            ])
        }))
    }

    /// Semi-transparent RGBA image, as a PNG upload would decode.
    pub fn rgba(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200])
        }))
    }

    /// Encode an image as PNG bytes, the way an upload arrives.
    pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// Mean absolute per-channel difference between two same-sized images.
    pub fn mean_abs_diff(a: &DynamicImage, b: &DynamicImage) -> f64 {
        let (a, b) = (a.to_rgb8(), b.to_rgb8());
        assert_eq!(a.dimensions(), b.dimensions());
        let total: u64 = a
            .as_raw()
            .iter()
            .zip(b.as_raw())
            .map(|(x, y)| x.abs_diff(*y) as u64)
            .sum();
        total as f64 / a.as_raw().len() as f64
    }
}

/// Simulated inference clients
pub mod mock_clients {
    use std::sync::Mutex;

    use diy_assistant::InferenceFailure;
    use diy_assistant::vision::InferenceClient;
    use diy_assistant::vision::types::ChatRequest;

    /// Always answers with the same text.
    pub struct FixedClient(pub String);

    impl InferenceClient for FixedClient {
        fn complete(&self, _request: &ChatRequest) -> Result<String, InferenceFailure> {
            Ok(self.0.clone())
        }
    }

    /// Always fails with the same failure.
    pub struct FailingClient(pub InferenceFailure);

    impl InferenceClient for FailingClient {
        fn complete(&self, _request: &ChatRequest) -> Result<String, InferenceFailure> {
            Err(self.0.clone())
        }
    }

    /// Records every request it sees and answers with fixed text.
    pub struct RecordingClient {
        pub reply: String,
        pub seen: Mutex<Vec<ChatRequest>>,
    }

    impl RecordingClient {
        pub fn new(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<ChatRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl InferenceClient for RecordingClient {
        fn complete(&self, request: &ChatRequest) -> Result<String, InferenceFailure> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }
}

/// Minimal HTTP/1.1 responder for exercising the real client
pub mod http_stub {
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    /// What the stub received.
    #[derive(Debug)]
    pub struct CapturedRequest {
        pub head: String,
        pub body: String,
    }

    impl CapturedRequest {
        /// Case-insensitive header lookup.
        pub fn header(&self, name: &str) -> Option<String> {
            self.head.lines().skip(1).find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim()
                    .eq_ignore_ascii_case(name)
                    .then(|| value.trim().to_string())
            })
        }
    }

    /// A server that answers exactly one request.
    pub struct OneShotServer {
        pub url: String,
        handle: JoinHandle<CapturedRequest>,
    }

    impl OneShotServer {
        /// Wait for the served request.
        pub fn captured(self) -> CapturedRequest {
            self.handle.join().unwrap()
        }
    }

    /// Answer one request with `status` (e.g. `"200 OK"`) and `body`.
    pub fn serve_once(status: &str, body: &str) -> OneShotServer {
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        spawn(move |stream| {
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        })
    }

    /// Read one request, then hold the connection open without answering.
    pub fn serve_silently(hold: Duration) -> OneShotServer {
        spawn(move |_stream| thread::sleep(hold))
    }

    /// A URL nothing is listening on.
    pub fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/openai/v1/chat/completions", addr)
    }

    fn spawn<F>(respond: F) -> OneShotServer
    where
        F: FnOnce(&mut TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let captured = read_request(&mut stream);
            respond(&mut stream);
            captured
        });
        OneShotServer {
            url: format!("http://{}/openai/v1/chat/completions", addr),
            handle,
        }
    }

    fn read_request(stream: &mut TcpStream) -> CapturedRequest {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];
        let head_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
        };
        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim()
                    .eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        let body_start = head_end + 4;
        while buf.len() < body_start + content_length {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before body was complete");
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string();
        CapturedRequest { head, body }
    }
}
