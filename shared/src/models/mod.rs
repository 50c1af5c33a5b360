//! Domain models for the NurtureWise Agro dashboard

mod analysis;
mod economics;
mod farmer;
mod inference;

pub use analysis::*;
pub use economics::*;
pub use farmer::*;
pub use inference::*;
