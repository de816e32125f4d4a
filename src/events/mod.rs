//! Messages exchanged between the engine and its driver.
//!
//! Submodules:
//! - [`timeline`] – playback lifecycle notifications (wrap, finish)

pub mod timeline;
