//! Windows packaging.

pub mod wix;
