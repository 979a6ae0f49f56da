//! Conversation state of the floating persona chat.
//!
//! The widget moves `Uninitialized -> Initializing -> Ready` once, on its first
//! open. Visibility is tracked separately so closing and reopening never
//! re-initializes. At most one message is in flight at a time.

mod context;

pub use context::{PageContext, page_context_for};
use serde::Serialize;

use crate::api::types::PersonaIdentity;

/// Number of transcript entries sent along as rolling context.
pub const HISTORY_WINDOW: usize = 20;
pub const FALLBACK_PERSONA: &str = "Assistant";
pub const FALLBACK_GREETING: &str = "Hi! I'm your workspace assistant. Ask me anything about your graph, projects or documents.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InitState {
	#[default]
	Uninitialized,
	Initializing,
	Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatEntry {
	pub role: Role,
	pub content: String,
	/// Failed turns are styled differently and never sent back as history.
	pub is_error: bool,
}

impl ChatEntry {
	fn user(content: &str) -> Self {
		Self {
			role: Role::User,
			content: content.to_string(),
			is_error: false,
		}
	}

	fn assistant(content: String) -> Self {
		Self {
			role: Role::Assistant,
			content,
			is_error: false,
		}
	}

	fn error(content: String) -> Self {
		Self {
			role: Role::Assistant,
			content,
			is_error: true,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistoryEntry {
	pub role: Role,
	pub content: String,
}

/// Body of `POST /api/persona/chat`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PersonaChatRequest {
	pub message: String,
	pub conversation_history: Vec<HistoryEntry>,
	pub page_context: PageContext,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejected {
	NotReady,
	Busy,
	Empty,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSession {
	pub open: bool,
	pub init: InitState,
	pub persona: String,
	pub transcript: Vec<ChatEntry>,
	pub pending: bool,
}

impl ChatSession {
	/// Opens or closes the panel. Returns `true` when the caller must start initialization.
	pub fn toggle(&mut self) -> bool {
		self.open = !self.open;
		if self.open && self.init == InitState::Uninitialized {
			self.init = InitState::Initializing;
			return true;
		}
		false
	}

	pub fn close(&mut self) {
		self.open = false;
	}

	/// A failed initialize still leaves the widget usable with a stock greeting.
	pub fn finish_initialize(&mut self, identity: Result<PersonaIdentity, String>) {
		if self.init != InitState::Initializing {
			return;
		}
		let (persona, greeting) = match identity {
			Ok(id) => (id.name, id.greeting),
			Err(_) => (String::new(), String::new()),
		};
		self.persona = if persona.is_empty() {
			FALLBACK_PERSONA.to_string()
		} else {
			persona
		};
		let greeting = if greeting.is_empty() {
			FALLBACK_GREETING.to_string()
		} else {
			greeting
		};
		self.transcript.push(ChatEntry::assistant(greeting));
		self.init = InitState::Ready;
	}

	pub fn can_send(&self) -> bool {
		self.init == InitState::Ready && !self.pending
	}

	/// Appends the message and returns the request to send.
	pub fn submit(&mut self, text: &str, page: PageContext) -> Result<PersonaChatRequest, Rejected> {
		if self.init != InitState::Ready {
			return Err(Rejected::NotReady);
		}
		if self.pending {
			return Err(Rejected::Busy);
		}
		let message = text.trim();
		if message.is_empty() {
			return Err(Rejected::Empty);
		}

		let start = self.transcript.len().saturating_sub(HISTORY_WINDOW);
		let conversation_history = self.transcript[start..]
			.iter()
			.filter(|e| !e.is_error)
			.map(|e| HistoryEntry {
				role: e.role,
				content: e.content.clone(),
			})
			.collect();
		self.transcript.push(ChatEntry::user(message));
		self.pending = true;
		Ok(PersonaChatRequest {
			message: message.to_string(),
			conversation_history,
			page_context: page,
		})
	}

	/// Records the outcome of the in-flight send. The transcript is never rolled back.
	pub fn receive(&mut self, reply: Result<String, String>) {
		if !self.pending {
			return;
		}
		self.pending = false;
		self.transcript.push(match reply {
			Ok(text) => ChatEntry::assistant(text),
			Err(msg) => ChatEntry::error(msg),
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ready() -> ChatSession {
		let mut chat = ChatSession::default();
		assert!(chat.toggle());
		chat.finish_initialize(Ok(PersonaIdentity {
			name: "Sage".into(),
			greeting: "Hello there".into(),
		}));
		chat
	}

	fn page() -> PageContext {
		page_context_for("/graph")
	}

	#[test]
	fn initializes_once() {
		let mut chat = ready();
		assert_eq!(chat.persona, "Sage");
		assert_eq!(chat.transcript.len(), 1);
		assert!(!chat.toggle());
		assert!(!chat.toggle());
		assert_eq!(chat.init, InitState::Ready);
		assert_eq!(chat.transcript.len(), 1);
	}

	#[test]
	fn failed_initialize_still_becomes_ready() {
		let mut chat = ChatSession::default();
		chat.toggle();
		chat.finish_initialize(Err("boom".into()));
		assert_eq!(chat.init, InitState::Ready);
		assert_eq!(chat.persona, FALLBACK_PERSONA);
		assert_eq!(chat.transcript[0].content, FALLBACK_GREETING);
	}

	#[test]
	fn rejects_while_not_ready() {
		let mut chat = ChatSession::default();
		assert_eq!(chat.submit("hi", page()), Err(Rejected::NotReady));
		chat.toggle();
		assert_eq!(chat.submit("hi", page()), Err(Rejected::NotReady));
	}

	#[test]
	fn second_submission_while_pending_is_rejected() {
		let mut chat = ready();
		assert!(chat.submit("first", page()).is_ok());
		assert!(!chat.can_send());
		assert_eq!(chat.submit("second", page()), Err(Rejected::Busy));
		assert_eq!(chat.transcript.len(), 2);

		chat.receive(Ok("answer".into()));
		assert!(chat.can_send());
		assert!(chat.submit("second", page()).is_ok());
	}

	#[test]
	fn blank_messages_are_ignored() {
		let mut chat = ready();
		assert_eq!(chat.submit("   ", page()), Err(Rejected::Empty));
		assert!(!chat.pending);
	}

	#[test]
	fn failures_are_appended_not_rolled_back() {
		let mut chat = ready();
		chat.submit("hello", page()).unwrap();
		chat.receive(Err("Connection error".into()));
		let last = chat.transcript.last().unwrap();
		assert!(last.is_error);
		assert_eq!(chat.transcript[1].content, "hello");
		assert_eq!(chat.transcript.len(), 3);
	}

	#[test]
	fn history_is_capped_and_excludes_new_message() {
		let mut chat = ready();
		for i in 0..15 {
			chat.submit(&format!("q{i}"), page()).unwrap();
			chat.receive(Ok(format!("a{i}")));
		}
		let req = chat.submit("latest", page()).unwrap();
		assert_eq!(req.conversation_history.len(), HISTORY_WINDOW);
		assert_eq!(req.conversation_history.last().unwrap().content, "a14");
		assert_eq!(req.message, "latest");
		assert_eq!(req.page_context.name, "Graph");
	}
}
