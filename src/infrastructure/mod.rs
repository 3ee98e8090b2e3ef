//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the X server, the clipboard and the notification daemon.

pub mod clipboard;
pub mod config;
pub mod display;
pub mod notification;

// Re-export adapters
pub use clipboard::{create_clipboard, ArboardClipboard, ClipboardTool, CommandClipboard};
pub use config::XdgConfigStore;
pub use display::DisplayError;
pub use notification::{create_notifier, NotifierKind, NotifyRustNotifier, NotifySendNotifier};
