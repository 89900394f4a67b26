//! Core types for the wordtally word counter widget.
//!
//! This crate has no knowledge of any rendering surface:
//! - Text statistics: [`compute`], [`MetricsEngine`], [`TextMetrics`]
//! - Animated counters: [`IncrementalPresenter`] writing through a [`DisplaySink`]
//! - Widget configuration: [`WidgetConfig`]
//! - Editor commands, keyboard shortcuts and contact form validation

pub mod actions;
pub mod animation;
mod config;
mod error;
mod metrics;
mod presenter;
pub mod sample;
pub mod shortcut;
pub mod validation;

pub use actions::{clear_request, copy_request, format_count, ActionPolicy, Notice, NoticeKind};
pub use animation::{AnimationConfig, CountAnimation};
pub use config::{
    AnimationSettings, AutosaveConfig, DisplayConfig, ReadingConfig, WidgetConfig,
    DEFAULT_AUTOSAVE_KEY,
};
pub use error::ConfigError;
pub use metrics::{
    compute, count_characters, count_characters_no_whitespace, count_paragraphs,
    count_sentences, count_words, reading_time_minutes, MetricField, MetricsEngine, TextMetrics,
    DEFAULT_WORDS_PER_MINUTE,
};
pub use presenter::{
    AnimationTicket, DisplaySink, IncrementalPresenter, PresentedValue, StepOutcome,
};
pub use shortcut::{EditorCommand, Modifiers, Shortcut, ShortcutMap};
