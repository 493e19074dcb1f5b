//! Infrastructure adapters. Implement outbound ports and the terminal front end.
//!
//! Gemini HTTP, mock backend, inquire UI. Map errors to DomainError.

pub mod ai;
pub mod ui;
