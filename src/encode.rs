//! packing of the host's commands into the frames sent to the device

use crate::{
    Error,
    cursor::FrameWriter,
    frames::WriteFrame,
    registry::{Instance, Toolerator},
    };


impl WriteFrame {
    /// frame commanding the given instance, the requested tool is wrapped around its tool count
    pub fn from_instance(instance: &Instance) -> Self {
        let command = &instance.command;
        Self {
            padding: 0,
            enable: u8::from(command.enable),
            tool_change: u8::from(command.tool_change),
            // smaller than the tool count, which fits a byte
            tool_number: (command.tool_number % instance.tool_count()) as u8,
        }
    }
}

impl Toolerator {
    /**
        write one frame per instance, in instance order

        the writer is moved by exactly [Toolerator::required_write_buffer], so the modules following in the buffer stay aligned
    */
    pub fn prepare_write(&self, data: &mut FrameWriter<'_>) -> Result<(), Error> {
        data.section(self.required_write_buffer(), |frames| {
            for instance in self.iter() {
                frames.put(WriteFrame::from_instance(instance))?;
            }
            Ok(())
        })
    }
}
