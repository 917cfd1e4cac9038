//! The Socratic tutor agent.

use crate::client::ChatClient;
use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::history::ChatHistory;
use crate::prompt;
use sage_types::ChatMessage;
use tracing::debug;

/// Turns learner text into streamed tutor replies.
///
/// Each call composes `[system prompt] + recent history + new input`, streams
/// the completion, and records the exchange in the bounded history once the
/// stream finishes. A failed stream leaves the history untouched so a retry
/// does not see a phantom turn.
#[derive(Debug)]
pub struct TutorAgent {
    client: ChatClient,
    history: ChatHistory,
}

impl TutorAgent {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: ChatClient::new(config),
            history: ChatHistory::default(),
        }
    }

    pub fn with_history(config: LlmConfig, history: ChatHistory) -> Self {
        Self {
            client: ChatClient::new(config),
            history,
        }
    }

    /// Streams a reply to `user_text`, invoking `on_token` per content delta.
    ///
    /// Returns the full reply text after the stream completes.
    pub async fn respond<F>(&mut self, user_text: &str, mut on_token: F) -> Result<String, LlmError>
    where
        F: FnMut(&str),
    {
        let messages = compose_messages(&self.history, user_text);
        debug!(
            turns = self.history.len(),
            "requesting streamed tutor reply"
        );

        let mut rx = self.client.stream_completion(&messages).await?;
        let mut reply = String::new();
        while let Some(item) = rx.recv().await {
            let token = item?;
            on_token(&token);
            reply.push_str(&token);
        }

        self.history.push(ChatMessage::user(user_text));
        self.history.push(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }

    /// Opens the session before the learner has said anything.
    pub async fn open_lesson<F>(&mut self, on_token: F) -> Result<String, LlmError>
    where
        F: FnMut(&str),
    {
        self.respond(prompt::OPENING_INSTRUCTION, on_token).await
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }
}

/// Builds the message list for one completion request.
fn compose_messages(history: &ChatHistory, user_text: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(prompt::system_message());
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(user_text));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use sage_types::ChatRole;

    #[test]
    fn composed_messages_start_with_system_and_end_with_user() {
        let mut history = ChatHistory::new(4).unwrap();
        history.push(ChatMessage::user("earlier question"));
        history.push(ChatMessage::assistant("earlier hint"));

        let messages = compose_messages(&history, "what about now?");
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].content, "earlier question");
        assert_eq!(messages[2].content, "earlier hint");
        assert_eq!(messages[3].role, ChatRole::User);
        assert_eq!(messages[3].content, "what about now?");
    }

    #[test]
    fn composed_messages_respect_history_window() {
        let mut history = ChatHistory::new(2).unwrap();
        history.push(ChatMessage::user("dropped"));
        history.push(ChatMessage::assistant("kept hint"));
        history.push(ChatMessage::user("kept question"));

        let messages = compose_messages(&history, "next");
        // system + 2 retained turns + new user text
        assert_eq!(messages.len(), 4);
        assert!(!messages.iter().any(|m| m.content == "dropped"));
    }

    #[tokio::test]
    async fn failed_stream_leaves_history_untouched() {
        // No API key configured: respond errors before any request is made.
        let mut agent = TutorAgent::new(LlmConfig::default());
        let result = agent.respond("hello", |_| {}).await;
        assert!(result.is_err());
        assert!(agent.history().is_empty());
    }
}
