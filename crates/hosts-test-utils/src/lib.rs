//! Shared test utilities for the hosts-blocker workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`hosts`]: [`TestHosts`], a temporary hosts file with a matching config
//! - [`fakes`]: in-memory [`Fetcher`](hosts_core::Fetcher) and
//!   [`CacheFlusher`](hosts_core::CacheFlusher) implementations

pub mod fakes;
pub mod hosts;

pub use fakes::{FailingFetcher, RecordingFlusher, StaticFetcher};
pub use hosts::TestHosts;
