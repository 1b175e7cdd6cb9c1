// src/integrations/mod.rs — Chat transport layer

pub mod telegram;
pub mod types;

pub use telegram::TelegramAdapter;
pub use types::{IncomingMessage, MessagingAdapter};
