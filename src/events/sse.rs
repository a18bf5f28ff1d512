//! Incremental `text/event-stream` decoder.
//!
//! Bytes arrive in arbitrary chunks from the HTTP body; lines and even UTF-8
//! sequences may be split across chunk boundaries, so partial lines are kept
//! until their terminator shows up.

use std::time::Duration;

/// One dispatched event block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: String,
    pub data: String,
    pub id: Option<String>,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    line: Vec<u8>,
    skip_lf: bool,
    event: Option<String>,
    data: String,
    last_event_id: Option<String>,
    retry: Option<Duration>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last `id:` seen, sent back as `Last-Event-ID` when reconnecting.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    /// Reconnection delay advertised by the server, if any.
    pub fn retry(&self) -> Option<Duration> {
        self.retry
    }

    /// Drop any half-received block. Ids and retry survive reconnects.
    pub fn reset_block(&mut self) {
        self.line.clear();
        self.skip_lf = false;
        self.event = None;
        self.data.clear();
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        for &byte in chunk {
            if self.skip_lf {
                self.skip_lf = false;
                if byte == b'\n' {
                    continue;
                }
            }
            match byte {
                b'\n' => self.end_line(&mut frames),
                b'\r' => {
                    self.end_line(&mut frames);
                    self.skip_lf = true;
                }
                _ => self.line.push(byte),
            }
        }
        frames
    }

    fn end_line(&mut self, frames: &mut Vec<SseFrame>) {
        let raw = std::mem::take(&mut self.line);
        let line = String::from_utf8_lossy(&raw);
        if line.is_empty() {
            if let Some(frame) = self.dispatch() {
                frames.push(frame);
            }
            return;
        }
        self.process_field(&line);
    }

    fn process_field(&mut self, line: &str) {
        if line.starts_with(':') {
            return; // comment / keep-alive
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            }
            "id" => {
                if !value.contains('\0') {
                    self.last_event_id = Some(value.to_string());
                }
            }
            "retry" => {
                if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(ms) = value.parse::<u64>() {
                        self.retry = Some(Duration::from_millis(ms));
                    }
                }
            }
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        let mut data = std::mem::take(&mut self.data);
        if data.is_empty() {
            return None;
        }
        data.pop();

        Some(SseFrame {
            event: event
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "message".to_string()),
            data,
            id: self.last_event_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame() {
        let mut dec = SseDecoder::new();
        let frames = dec.feed(b"id: 1\nevent: play-track\ndata: {\"name\":\"X\"}\n\n");
        assert_eq!(
            frames,
            vec![SseFrame {
                event: "play-track".into(),
                data: "{\"name\":\"X\"}".into(),
                id: Some("1".into()),
            }]
        );
        assert_eq!(dec.last_event_id(), Some("1"));
    }

    #[test]
    fn test_multiline_data_and_comments() {
        let mut dec = SseDecoder::new();
        let frames = dec.feed(b": keep-alive\nevent: log\ndata: a\ndata: b\n\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "a\nb");
    }

    #[test]
    fn test_split_chunks_and_crlf() {
        let mut dec = SseDecoder::new();
        assert!(dec.feed(b"event: track-e").is_empty());
        assert!(dec.feed(b"nd\r").is_empty());
        assert!(dec.feed(b"\ndata: {}\r\n").is_empty());
        let frames = dec.feed(b"\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].event, "track-end");
        assert_eq!(frames[0].data, "{}");
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let mut dec = SseDecoder::new();
        let text = "data: \"Björk\"\n\n".as_bytes();
        let (a, b) = text.split_at(10); // inside the two-byte 'ö'
        assert!(dec.feed(a).is_empty());
        let frames = dec.feed(b);
        assert_eq!(frames[0].data, "\"Björk\"");
        assert_eq!(frames[0].event, "message");
    }

    #[test]
    fn test_block_without_data_is_not_dispatched() {
        let mut dec = SseDecoder::new();
        assert!(dec.feed(b"event: log\n\n").is_empty());
        // The stale event name must not leak into the next block
        let frames = dec.feed(b"data: x\n\n");
        assert_eq!(frames[0].event, "message");
    }

    #[test]
    fn test_retry_field() {
        let mut dec = SseDecoder::new();
        dec.feed(b"retry: 1500\n\n");
        assert_eq!(dec.retry(), Some(Duration::from_millis(1500)));
        dec.feed(b"retry: soon\n\n");
        assert_eq!(dec.retry(), Some(Duration::from_millis(1500)));
    }
}
