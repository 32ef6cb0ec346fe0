#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

pub mod alarm;
pub mod cli;
pub mod config;
pub mod console;
pub mod errors;
pub mod session;
pub mod sound;
/// the egui notification window
pub mod surface;
pub mod time_spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOfDay {
    #[default]
    AM,
    PM,
}

impl TimeOfDay {
    /// the 24-hour clock hour for a 12-hour clock hour (1-12)
    #[must_use]
    pub const fn to_twenty_four_hour(self, hour: u32) -> u32 {
        match (self, hour) {
            (Self::AM, 12) => 0,
            (Self::PM, 12) => 12,
            (Self::AM, hour) => hour,
            (Self::PM, hour) => hour + 12,
        }
    }
}
