//! Portfolio chat - a personal site's "ask about me" assistant
//!
//! The server side relays visitor questions to an OpenAI-compatible
//! completion provider. The client side keeps the chat transcript and
//! reveals each answer progressively.

pub mod api;
pub mod chat;
pub mod config;
pub mod content;
pub mod llm;
pub mod markdown;
pub mod prompt;
pub mod question;
pub mod reveal;
pub mod runtime;
