//! Incremental `text/event-stream` framing for `streamGenerateContent?alt=sse`.
//!
//! Network chunks do not line up with events: a chunk may carry half an event
//! or several of them, so bytes are buffered until a blank line closes a frame.

use super::rest::Error;
use futures::{Stream, StreamExt, stream};

const DONE_SIGNAL: &str = "[DONE]";

#[derive(Debug, Default)]
pub(crate) struct Decoder {
    buf: Vec<u8>,
    done: bool,
}

impl Decoder {
    pub(crate) fn push(&mut self, chunk: &[u8]) {
        // Dropping CR turns `\r\n\r\n` delimiters into `\n\n`.
        self.buf.extend(chunk.iter().copied().filter(|b| *b != b'\r'));
    }

    /// Next complete event payload, if one is buffered.
    pub(crate) fn next_event(&mut self) -> Option<Result<String, Error>> {
        while !self.done {
            let end = self.buf.windows(2).position(|w| w == b"\n\n")?;
            let frame: Vec<u8> = self.buf.drain(..end + 2).collect();
            if let Some(event) = self.parse_frame(&frame[..end]) {
                return Some(event);
            }
        }
        None
    }

    /// Flushes whatever is left once the input ended. Whitespace alone is not an event.
    pub(crate) fn finish(&mut self) -> Option<Result<String, Error>> {
        if self.done {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        let event = if rest.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            self.parse_frame(&rest)
        };
        self.done = true;
        event
    }

    pub(crate) fn close(&mut self) {
        self.buf.clear();
        self.done = true;
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done
    }

    fn parse_frame(&mut self, frame: &[u8]) -> Option<Result<String, Error>> {
        let frame = match std::str::from_utf8(frame) {
            Ok(frame) => frame,
            Err(e) => return Some(Err(Error::Stream(format!("event is not valid UTF-8: {e}")))),
        };

        let data: Vec<&str> = frame
            .lines()
            .filter(|line| !line.starts_with(':'))
            .filter_map(|line| line.strip_prefix("data:"))
            .map(|value| value.strip_prefix(' ').unwrap_or(value))
            .collect();
        if data.is_empty() {
            return None;
        }

        let payload = data.join("\n");
        if payload.trim() == DONE_SIGNAL {
            self.close();
            return None;
        }
        Some(Ok(payload))
    }
}

/// Turns a byte stream into a stream of event payloads.
///
/// The stream ends after the last event, after a `[DONE]` payload, or after the
/// first transport error.
pub(crate) fn events<S, B>(input: S) -> impl Stream<Item = Result<String, Error>> + Send + 'static
where
    S: Stream<Item = Result<B, reqwest::Error>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    stream::unfold(
        (Box::pin(input), Decoder::default()),
        |(mut input, mut decoder)| async move {
            loop {
                if let Some(event) = decoder.next_event() {
                    return Some((event, (input, decoder)));
                }
                if decoder.is_done() {
                    return None;
                }
                match input.next().await {
                    Some(Ok(chunk)) => decoder.push(chunk.as_ref()),
                    Some(Err(e)) => {
                        decoder.close();
                        return Some((Err(Error::from(e)), (input, decoder)));
                    }
                    None => {
                        let event = decoder.finish()?;
                        return Some((event, (input, decoder)));
                    }
                }
            }
        },
    )
}
