// src/display/drivers/mod.rs

//! Backend driver implementations.
//!
//! Only the headless driver lives in-tree; native windowing backends
//! implement [`DisplayDriver`](crate::display::driver::DisplayDriver) in
//! their own crates and plug in through `Display::open`.

pub mod headless;
#[cfg(test)]
pub mod mock;

pub use headless::HeadlessDriver;
