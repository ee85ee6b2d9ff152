//! Bundled-resource discovery.
//!
//! This module provides:
//! - Multi-strategy path resolution (`locator`)
//! - The package provider capability (`provider`)
//! - The individual fallback strategies (`strategy`)
//! - Locator configuration (`config`)

pub mod config;
pub mod locator;
pub mod provider;
pub mod strategy;

pub use config::LocatorConfig;
pub use locator::{data_path, resolve, ResolveError, ResourceLocator};
pub use provider::PackageProvider;
pub use strategy::ResolutionStrategy;
