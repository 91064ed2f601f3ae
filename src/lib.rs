/*!
    driver side of a turret style tool changer, exchanged once per control cycle over a buffer shared by all modules of a board.

    - [registry] holds the tool changer instances of a board, initialized from the board configuration bytes
    - [encode] packs the host's commands into [frames::WriteFrame]s
    - [decode] turns the device's [frames::ReadFrame]s back into stateful flags
    - [module] is the interface the host drives every cycle
*/
#![no_std]
#[cfg(feature = "std")]
extern crate std;

pub mod frames;
pub mod cursor;
pub mod registry;
pub mod encode;
pub mod decode;
pub mod pins;
pub mod module;

pub use registry::{Toolerator, Instance, Command, Feedback, Boards};
pub use module::{Module, Registration, REGISTRATION};

use thiserror::Error;

/// error regarding toolerator initialization and data exchange
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("out of memory: {requested} items requested, capacity is {capacity}")]
    OutOfMemory {requested: usize, capacity: usize},
    #[error("instance {index} has no tools")]
    NoTools {index: usize},
    #[error("buffer too short: {required} bytes required, {available} available")]
    Buffer {required: usize, available: usize},
    #[error("pin name exceeds maximum length")]
    Name,
    #[error("pin {pin} cannot be written with this value")]
    Pin {pin: &'static str},
}
