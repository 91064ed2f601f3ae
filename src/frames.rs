/*!
    wire layout of the data exchanged with the tool changer firmware

    every frame is 4 bytes wide and packed in instance order, the order of the fields must coincide with the firmware's memory map
*/

use packbytes::{FromBytes, ToBytes, ByteArray};
use bilge::prelude::*;


/// size of the configuration slot of a board, whatever the number of instances
pub const CONFIG_SLOT: usize = 4;
/// size in bytes of one [WriteFrame]
pub const WRITE_FRAME: usize = <WriteFrame as ToBytes>::Bytes::SIZE;
/// size in bytes of one [ReadFrame]
pub const READ_FRAME: usize = <ReadFrame as FromBytes>::Bytes::SIZE;
/// size in bytes of one [ConfigFrame]
pub const CONFIG_FRAME: usize = core::mem::size_of::<ConfigFrame>();


/// per cycle settings sent to the device, currently empty
#[derive(Copy, Clone, Debug, Default)]
pub struct ConfigFrame;

/// data sent to the device for one instance
#[derive(Copy, Clone, FromBytes, ToBytes, Debug, Default, PartialEq, Eq)]
pub struct WriteFrame {
    pub padding: u8,
    /// non zero to enable the tool changer
    pub enable: u8,
    /// non zero to request a tool change
    pub tool_change: u8,
    /// requested tool, always smaller than the instance's tool count
    pub tool_number: u8,
}

/// data received from the device for one instance
#[derive(Copy, Clone, FromBytes, ToBytes, Debug, Default, PartialEq, Eq)]
pub struct ReadFrame {
    pub padding: u8,
    /// tool currently in position
    pub tool_number: u8,
    /// non zero once homing completed
    pub homed: u8,
    /// raw state of the firmware, see [Status]
    pub status: u8,
}
impl ReadFrame {
    pub fn status(&self) -> Status {
        Status::from(self.status)
    }
    pub fn homed(&self) -> bool {
        self.homed != 0
    }
}

/// state reported by the tool changer firmware
#[bitsize(8)]
#[derive(Copy, Clone, FromBits, Debug, PartialEq)]
pub enum Status {
    /// waiting for the first command after power up
    Start = 1,
    /// turning until the home switch triggers
    HomeSearching = 2,
    /// moving away from the home switch
    HomeBackOff = 3,
    /// slowly approaching the home switch
    HomeLatching = 4,
    /// moving from the home switch to the first tool
    HomeMoveToZero = 5,
    /// turning forward past the requested tool
    MovingForward = 6,
    /// turning back to lock the ratchet
    MovingBackward = 7,
    /// idle, ready for a new command
    Ready = 8,
    /// homing failed
    Error = 9,
    /// any code not known by this driver
    #[fallback]
    Unknown = 255,
}
impl Status {
    pub fn is_homing(self) -> bool {
        matches!(self, Self::HomeSearching | Self::HomeBackOff | Self::HomeLatching | Self::HomeMoveToZero)
    }
    pub fn is_moving(self) -> bool {
        matches!(self, Self::MovingForward | Self::MovingBackward)
    }
}
