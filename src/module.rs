/*!
    interface between the host driver and this module

    The host initializes one [Toolerator] per board from the board's configuration, then every cycle calls [Module::prepare_write] before sending the write buffer and [Module::process_read] after receiving the read buffer. All modules of a board share the same buffers, each one consuming exactly the size it declared.
*/

use core::time::Duration;
use crate::{
    Error,
    cursor::{FrameReader, FrameWriter},
    registry::Toolerator,
    };


/// version of a module, a different major or minor means the frames layout changed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}
impl Version {
    /// whether firmware built for `other` exchanges the same frames
    pub fn compatible(&self, other: &Version) -> bool {
        self.major == other.major && self.minor == other.minor
    }
}

/// identification of a module to the host
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// identifier shared with the firmware
    pub id: u32,
    pub name: &'static str,
    pub version: Version,
}

pub const REGISTRATION: Registration = Registration {
    id: 0x4e32796a,
    name: "toolerator",
    version: Version {major: 1, minor: 0, patch: 0},
};


/**
    operations the host runs on a module of a board

    `period` is the duration of a cycle, given to every module but not needed by all
*/
pub trait Module {
    /// bytes consumed by [Module::configure]
    fn required_config_buffer(&self) -> usize;
    /// bytes consumed by [Module::prepare_write]
    fn required_write_buffer(&self) -> usize;
    /// bytes consumed by [Module::process_read]
    fn required_read_buffer(&self) -> usize;

    /// write the module settings, on the first cycle only
    fn configure(&mut self, data: &mut FrameWriter<'_>, period: Duration) -> Result<(), Error>;
    /// write the data sent to the device this cycle
    fn prepare_write(&mut self, data: &mut FrameWriter<'_>, period: Duration) -> Result<(), Error>;
    /// read the data received from the device this cycle
    fn process_read(&mut self, data: &mut FrameReader<'_>, period: Duration) -> Result<(), Error>;
}

impl Module for Toolerator {
    fn required_config_buffer(&self) -> usize {Toolerator::required_config_buffer(self)}
    fn required_write_buffer(&self) -> usize {Toolerator::required_write_buffer(self)}
    fn required_read_buffer(&self) -> usize {Toolerator::required_read_buffer(self)}

    fn configure(&mut self, data: &mut FrameWriter<'_>, _period: Duration) -> Result<(), Error> {
        // no settings yet, only reserve the declared size
        data.section(Toolerator::required_config_buffer(self), |_| Ok(()))
    }
    fn prepare_write(&mut self, data: &mut FrameWriter<'_>, _period: Duration) -> Result<(), Error> {
        Toolerator::prepare_write(self, data)
    }
    fn process_read(&mut self, data: &mut FrameReader<'_>, _period: Duration) -> Result<(), Error> {
        Toolerator::process_read(self, data)
    }
}
