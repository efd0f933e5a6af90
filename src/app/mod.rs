//! Application core: the sampling loop and its boundary.
//!
//! The loop in [`service`] talks to hardware only through the **port
//! traits** in [`ports`], takes operator input through [`controls`], and
//! reports through [`events`]. Nothing here depends on a particular HAL.

pub mod commands;
pub mod controls;
pub mod events;
pub mod ports;
pub mod service;
