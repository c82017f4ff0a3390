//! Pawplan Assistant Library
//!
//! Facade over [`pawplan_core`] that adds the optional advanced backend,
//! OCR-based prescription scanning, and reminder payload mapping.
//!
//! # Dispatch
//!
//! ```text
//! caller ──► CareEngine
//!              │  feature off? ──► placeholder result
//!              │  advanced preferred + available? ──► one backend attempt
//!              │        │ failure (logged, swallowed)
//!              ▼        ▼
//!        heuristic parsers / recommender / weight detector
//! ```
//!
//! The backend is an injectable [`backend::SmartBackend`] strategy; flags
//! live in an immutable [`config::EngineConfig`] snapshot so tests can
//! pin behavior without global state.
//!
//! # Modules
//!
//! - [`engine`]: The [`engine::CareEngine`] facade
//! - [`backend`]: Backend trait, errors, and model-reply parsing
//! - [`config`]: Engine flag snapshot
//! - [`ocr`]: Text-recognizer collaborator interface
//! - [`prompts`]: Prompt and grammar scaffolding for model backends
//! - [`reminders`]: Notification payload mapping

pub mod backend;
pub mod config;
pub mod engine;
pub mod ocr;
pub mod prompts;
pub mod reminders;

// Re-export commonly used types
pub use backend::{BackendError, BackendResult, SmartBackend, UnavailableBackend};
pub use config::EngineConfig;
pub use engine::CareEngine;
pub use ocr::{OcrError, TextRecognizer};
pub use reminders::{reminder_for, ReminderRequest};
