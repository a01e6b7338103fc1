//! Client side of the chat: session state, transport to `/api/chat`, and
//! the text-to-markup transform used to render agent replies.

pub mod markup;
pub mod session;
pub mod transport;

pub use session::{ChatEnvelope, ChatMessage, ChatSession, Sender, SessionState, FALLBACK_REPLY};
pub use transport::{ChatTransport, HttpChatTransport, TransportError};
