//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (tracks, sets, UI state)
//! - `navigation`: Carousel position transitions and engine reconciliation
//! - `playback`: Playback snapshot and progress timing
//! - `bangr_client`: Bangr backend API client
//! - `app_model`: Main application model with state management methods

mod types;
mod navigation;
mod playback;
mod bangr_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{EnginePhase, LeaderboardEntry, Set, Track, UiState};

pub use navigation::{NavPosition, NavStep, ScrollDirection};

pub use playback::{NowPlaying, PlaybackInfo};

pub use bangr_client::BangrClient;

pub use app_model::AppModel;
