//! HTTP gateway that forwards code snippets to a chat-completion API for
//! simulated execution (`/api/execute`) or improvement (`/api/fix`) and
//! relays the model's text in a uniform envelope.

pub mod config;
pub mod error;
pub mod gateway;
pub mod io_struct;
pub mod logging;
pub mod mock;
pub mod prompts;
pub mod server;
pub mod upstream;
