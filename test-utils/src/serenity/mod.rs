//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating
//! what Discord's gateway would deliver. Use them to exercise conversions from
//! gateway payloads without a live connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{member::create_test_member, voice_state::create_test_voice_state};
//!
//! let member = create_test_member(1000, 2000, "Alice", false);
//! let joined = create_test_voice_state(1000, 2000, Some(3000), Some("Alice"), false);
//! let left = create_test_voice_state(1000, 2000, None, Some("Alice"), false);
//! ```
//!
//! # Available Factories
//!
//! - `member::create_test_member` - Create Serenity Member objects
//! - `voice_state::create_test_voice_state` - Create Serenity VoiceState objects

pub mod member;
pub mod voice_state;

pub use member::create_test_member;
pub use voice_state::create_test_voice_state;
