//! Bedtime story engine: profile wizard, AI storyteller, and offline templates.
//!
//! This crate provides:
//! - A five-step story profile wizard with validation and timed auto-advance
//! - AI-powered story generation using Claude
//! - Offline story assembly from built-in style templates
//! - API key validation and storage, plus plain text story export
//!
//! # Quick Start
//!
//! ```ignore
//! use bedtime_core::{Gender, Interest, Profile, Storyteller, StoryStyle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let profile = Profile {
//!         age: 6,
//!         gender: Some(Gender::Girl),
//!         interests: vec![Interest::Space],
//!         style: Some(StoryStyle::Magical),
//!         lesson: "sharing is caring".to_string(),
//!     };
//!
//!     let storyteller = Storyteller::from_env()?;
//!     let story = storyteller.generate(&profile).await?;
//!     println!("{}\n\n{}", story.title, story.body);
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod catalog;
pub mod credential;
pub mod export;
pub mod profile;
pub mod storyteller;
pub mod wizard;

// Primary public API
pub use assembler::assemble;
pub use credential::{CredentialError, CredentialStore};
pub use profile::{Gender, Interest, Profile, Pronouns, Story, StoryStyle};
pub use storyteller::{GenerationError, Storyteller, StorytellerConfig};
pub use wizard::{Step, Wizard, AUTO_ADVANCE_DELAY};
