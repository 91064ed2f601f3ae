/*!
    tool changer instances of a board and their configuration

    a board carries one [Toolerator], which holds up to [MAX_INSTANCES] tool changers. Instances are created once from the board configuration bytes and live as long as the driver
*/

use core::ops::Deref;
use heapless::Vec;
use log::*;

use crate::{
    Error,
    cursor::FrameReader,
    frames::{CONFIG_SLOT, CONFIG_FRAME, WRITE_FRAME, READ_FRAME},
    };


/// maximum number of tool changers on one board, bounded by the size of the configuration slot
pub const MAX_INSTANCES: usize = CONFIG_SLOT - 1;
/// maximum number of boards handled by one [Boards]
pub const MAX_BOARDS: usize = 4;


/// control intents, written by the host between cycles
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Command {
    /// enable the tool changer, disabling stops motion and requires homing again
    pub enable: bool,
    /// request a change to `tool_number`
    pub tool_change: bool,
    /// requested tool, wrapped around the tool count when sent
    pub tool_number: u32,
}

/// state reported by the device, only updated by the decoder and kept between cycles
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Feedback {
    /// raw status code of the device
    pub status: u32,
    /// an error occured, never cleared
    pub error: bool,
    /// currently homing
    pub homing: bool,
    /// homing completed
    pub homed: bool,
    /// tool change finished, follows `Command::tool_change` while ready
    pub tool_changed: bool,
    /// tool currently in position
    pub current_tool: u32,
}

/// one tool changer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    tool_count: u8,
    pub command: Command,
    pub(crate) feedback: Feedback,
}
impl Instance {
    /// the tool count must be at least 1
    pub(crate) fn new(tool_count: u8) -> Self {
        Self {
            tool_count,
            command: Command::default(),
            feedback: Feedback::default(),
        }
    }
    /// number of tools in the turret
    pub fn tool_count(&self) -> u32 {u32::from(self.tool_count)}
    /// last state received from the device
    pub fn feedback(&self) -> &Feedback {&self.feedback}
}


/// all tool changers of a board
#[derive(Clone, Debug, Default)]
pub struct Toolerator {
    instances: Vec<Instance, MAX_INSTANCES>,
}
impl Toolerator {
    /// toolerator with the given tool counts, one instance per item
    pub fn new(tool_counts: impl IntoIterator<Item=u8>) -> Result<Self, Error> {
        let mut instances = Vec::new();
        for (index, tool_count) in tool_counts.into_iter().enumerate() {
            if tool_count == 0 {
                return Err(Error::NoTools {index});
            }
            instances.push(Instance::new(tool_count))
                .map_err(|_| Error::OutOfMemory {requested: index + 1, capacity: MAX_INSTANCES})?;
        }
        Ok(Self {instances})
    }
    /**
        create the toolerator from the board configuration

        the configuration slot starts with the number of instances, followed by the tool count of each instance. The reader is moved past the whole slot whatever the number of instances.
    */
    pub fn initialize(config: &mut FrameReader<'_>) -> Result<Self, Error> {
        config.section(CONFIG_SLOT, |slot| {
            let count = usize::from(slot.take::<u8>()?);
            if count > MAX_INSTANCES {
                error!("out of memory: {} toolerator instances requested, {} available", count, MAX_INSTANCES);
                return Err(Error::OutOfMemory {requested: count, capacity: MAX_INSTANCES});
            }
            let mut tool_counts = [0; MAX_INSTANCES];
            for (index, tool_count) in tool_counts[.. count].iter_mut().enumerate() {
                *tool_count = slot.take()?;
                debug!("toolerator instance {}: {} tools", index, tool_count);
            }
            let toolerator = Self::new(tool_counts[.. count].iter().copied())?;
            info!("initialized toolerator with {} instances", toolerator.len());
            Ok(toolerator)
        })
    }

    /// number of instances
    pub fn len(&self) -> usize {self.instances.len()}
    pub fn is_empty(&self) -> bool {self.instances.is_empty()}
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Instance> {self.instances.get_mut(index)}
    pub(crate) fn instances_mut(&mut self) -> &mut [Instance] {&mut self.instances}

    /// bytes of per cycle configuration, nothing is sent for a board without instances
    pub fn required_config_buffer(&self) -> usize {
        if self.is_empty() {0}
        else {CONFIG_FRAME}
    }
    /// bytes written to the device every cycle
    pub fn required_write_buffer(&self) -> usize {
        self.len() * WRITE_FRAME
    }
    /// bytes read from the device every cycle
    pub fn required_read_buffer(&self) -> usize {
        self.len() * READ_FRAME
    }
}
impl Deref for Toolerator {
    type Target = [Instance];
    fn deref(&self) -> &[Instance] {
        &self.instances
    }
}


/// toolerators of all boards, in order of initialization
#[derive(Clone, Debug, Default)]
pub struct Boards {
    boards: Vec<Toolerator, MAX_BOARDS>,
}
impl Boards {
    pub fn new() -> Self {
        Self::default()
    }
    /// initialize the toolerator of one more board, returning its board index
    pub fn initialize(&mut self, config: &mut FrameReader<'_>) -> Result<usize, Error> {
        if self.boards.is_full() {
            error!("out of memory: no room for board {}", self.boards.len());
            return Err(Error::OutOfMemory {requested: self.boards.len() + 1, capacity: MAX_BOARDS});
        }
        let toolerator = Toolerator::initialize(config)?;
        let index = self.boards.len();
        self.boards.push(toolerator)
            .map_err(|_| Error::OutOfMemory {requested: index + 1, capacity: MAX_BOARDS})?;
        Ok(index)
    }
    pub fn len(&self) -> usize {self.boards.len()}
    pub fn is_empty(&self) -> bool {self.boards.is_empty()}
    pub fn get(&self, board: usize) -> Option<&Toolerator> {self.boards.get(board)}
    pub fn get_mut(&mut self, board: usize) -> Option<&mut Toolerator> {self.boards.get_mut(board)}
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Toolerator> {self.boards.iter_mut()}
}
