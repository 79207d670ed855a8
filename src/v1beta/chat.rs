use super::model::GenerativeModel;
use super::rest::{Error, ResponseStream};
use super::{Content, Part, PartData, response};
use tokio_stream::StreamExt;
use tracing::{debug, warn};

/// Multi-turn conversation with caller-owned history.
///
/// The service keeps no state between calls: every message is sent together
/// with the whole history. The history only grows by a user/model pair, once a
/// turn succeeded with a non-empty reply.
#[derive(Debug, Clone)]
pub struct ChatSession {
    model: GenerativeModel,
    history: Vec<Content>,
}

impl ChatSession {
    pub fn new(model: GenerativeModel) -> Self {
        Self {
            model,
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: impl Into<Vec<Content>>) -> Self {
        self.history = history.into();
        self
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    fn contents_with(&self, turn: &Content) -> Vec<Content> {
        let mut contents = self.history.clone();
        contents.push(turn.clone());
        contents
    }

    pub async fn send_message(
        &mut self,
        parts: impl Into<Vec<Part>>,
    ) -> Result<response::Response, Error> {
        let turn = Content::user(parts);
        let request = self.model.request(self.contents_with(&turn));
        let response = self.model.client().generate_content(request).await?;

        match response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .filter(|content| !content.parts.is_empty())
        {
            Some(reply) => {
                self.history.push(turn);
                self.history.push(Content::model(reply.parts.clone()));
                debug!(turns = self.history.len(), "chat turn completed");
            }
            None => warn!(
                block_reason = ?response.prompt_feedback.as_ref().and_then(|f| f.block_reason),
                "reply carried no content, history left unchanged"
            ),
        }
        Ok(response)
    }

    /// Streams the reply to `parts`.
    ///
    /// The turn is added to the history once the returned stream has been drained
    /// without errors and produced at least one reply part.
    pub async fn send_message_stream(
        &mut self,
        parts: impl Into<Vec<Part>>,
    ) -> Result<ChatStream<'_>, Error> {
        let turn = Content::user(parts);
        let request = self.model.request(self.contents_with(&turn));
        let stream = self.model.client().stream_content(request).await?;
        Ok(ChatStream {
            session: self,
            turn: Some(turn),
            stream,
            reply: Vec::new(),
            failed: false,
        })
    }
}

/// Reply of one streamed chat turn. Pull it with [`ChatStream::next`] until `None`.
pub struct ChatStream<'a> {
    session: &'a mut ChatSession,
    turn: Option<Content>,
    stream: ResponseStream,
    reply: Vec<Part>,
    failed: bool,
}

impl ChatStream<'_> {
    /// Next partial response, `None` once the reply is complete.
    pub async fn next(&mut self) -> Option<Result<response::Response, Error>> {
        match self.stream.next().await {
            Some(Ok(chunk)) => {
                if let Some(content) = chunk.candidates.first().and_then(|c| c.content.as_ref()) {
                    for part in &content.parts {
                        merge_part(&mut self.reply, part.clone());
                    }
                }
                Some(Ok(chunk))
            }
            Some(Err(e)) => {
                self.failed = true;
                Some(Err(e))
            }
            None => {
                if let Some(turn) = self.turn.take() {
                    if self.failed || self.reply.is_empty() {
                        warn!(failed = self.failed, "streamed turn not recorded");
                    } else {
                        self.session.history.push(turn);
                        self.session
                            .history
                            .push(Content::model(std::mem::take(&mut self.reply)));
                        debug!(turns = self.session.history.len(), "chat turn completed");
                    }
                }
                None
            }
        }
    }
}

/// Appends `part`, joining consecutive text fragments into one part.
fn merge_part(parts: &mut Vec<Part>, part: Part) {
    if let (Some(last), PartData::Text(text)) = (parts.last_mut(), &part.data) {
        if let PartData::Text(existing) = &mut last.data {
            existing.push_str(text);
            return;
        }
    }
    parts.push(part);
}
