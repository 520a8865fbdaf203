//! Server-sent event decoding (Bytes -> typed frames)

use bytes::Bytes;
use futures::{stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::{BoxStream, Result};

const DONE_SIGNAL: &str = "[DONE]";

enum Frame<T> {
    Skip,
    Done,
    Item(Result<T>),
}

/// Decode an SSE byte stream into JSON frames of type `T`.
///
/// - frames are separated by a blank line (`\r\n` is normalized to `\n`)
/// - `data:` lines of one frame are joined; `event:`/`id:`/`retry:` and `:` comments are ignored
/// - `[DONE]` ends the stream
/// - a frame that is not valid JSON for `T` yields an error item
pub fn decode_sse<T>(input: BoxStream<'static, Bytes>) -> BoxStream<'static, T>
where
    T: DeserializeOwned + Send + 'static,
{
    let stream = stream::unfold(Some((input, Vec::<u8>::new())), |state| async move {
        let (mut input, mut buf) = match state {
            Some(state) => state,
            None => return None,
        };

        loop {
            // Emit the next complete frame if the buffer holds one.
            if let Some(idx) = frame_end(&buf) {
                let frame: Vec<u8> = buf.drain(..idx + 2).collect();
                match parse_frame::<T>(&frame[..idx]) {
                    Frame::Skip => continue,
                    Frame::Done => return None,
                    Frame::Item(item) => return Some((item, Some((input, buf)))),
                }
            }

            match input.next().await {
                Some(Ok(bytes)) => buf.extend(bytes.iter().copied().filter(|b| *b != b'\r')),
                Some(Err(e)) => return Some((Err(e), None)),
                None => {
                    // EOF without trailing blank line
                    return match parse_frame::<T>(&buf) {
                        Frame::Item(item) => Some((item, None)),
                        Frame::Skip | Frame::Done => None,
                    };
                }
            }
        }
    });

    Box::pin(stream)
}

fn frame_end(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\n\n")
}

fn parse_frame<T: DeserializeOwned>(raw: &[u8]) -> Frame<T> {
    let text = String::from_utf8_lossy(raw);
    let mut data = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            data.push(rest.trim_start());
        } else if line.starts_with("event:") || line.starts_with("id:") || line.starts_with("retry:")
        {
            continue;
        } else {
            // Bare JSON line without a field name.
            data.push(line);
        }
    }

    let payload = data.join("\n");
    let payload = payload.trim();
    if payload.is_empty() {
        return Frame::Skip;
    }
    if payload == DONE_SIGNAL {
        return Frame::Done;
    }
    Frame::Item(serde_json::from_str(payload).map_err(Into::into))
}
