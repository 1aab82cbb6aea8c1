use parking_lot::RwLock;
use std::sync::Arc;

use crate::output::{Message, Output};

#[derive(Clone, Default)]
pub struct MockOutput {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn flush(&self) -> Vec<Message> {
        std::mem::replace(&mut *self.messages.write(), Vec::new())
    }

    pub fn contains_message(&self, message: &Message) -> bool {
        self.messages.read().iter().any(|m| m == message)
    }

    pub fn last_question(&self) -> Option<Vec<String>> {
        self.messages.read().iter().rev().find_map(|m| match m {
            Message::Question(lines) => Some(lines.clone()),
            _ => None,
        })
    }
}

impl Output for MockOutput {
    fn say(&mut self, message: &Message) {
        self.messages.write().push(message.clone());
    }
}
