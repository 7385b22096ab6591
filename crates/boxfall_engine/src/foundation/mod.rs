//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Handle collections
//! - Time management and tick pacing
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
