// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! This module contains structures and methods for specifying parameters of the averaging.

pub mod averaging;
pub mod plot;

pub use averaging::Averaging;
pub use plot::Plot;
