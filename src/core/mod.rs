//! Shared types used across the tool and speech layers.

pub mod tool;
