//! Output adapters for the activity summary

pub mod svg;
pub mod text;
