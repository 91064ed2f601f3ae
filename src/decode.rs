/*!
    interpretation of the frames received from the device

    The device reports its internal state as a raw [Status] code. Each code is bucketed into a [Transition] telling which host flags it changes, flags not concerned keep the value they had on the previous cycle. The status is evaluated again every cycle, nothing else than the instance's [Feedback] is remembered.
*/

use log::*;

use crate::{
    Error,
    cursor::FrameReader,
    frames::{ReadFrame, Status},
    registry::{Instance, Feedback, Toolerator},
    };


/// change of one flag of [Feedback]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Update {
    /// keep the value of the previous cycle
    #[default]
    Keep,
    /// force the given value
    Set(bool),
    /// copy the host's tool change request
    Request,
}
impl Update {
    pub fn apply(self, current: bool, request: bool) -> bool {
        match self {
            Self::Keep => current,
            Self::Set(value) => value,
            Self::Request => request,
        }
    }
}

/// changes of the host flags caused by a status code
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub homing: Update,
    pub tool_changed: Update,
    pub error: Update,
}

impl Status {
    /// flags changed when the device reports this status
    pub fn transition(self) -> Transition {
        use Update::*;
        match self {
            status if status.is_homing() => Transition {
                homing: Set(true),
                tool_changed: Set(false),
                error: Keep,
            },
            status if status.is_moving() => Transition {
                homing: Keep,
                tool_changed: Set(false),
                error: Keep,
            },
            // the only place a tool change is acknowledged, as long as the host keeps requesting it
            Status::Ready => Transition {
                homing: Keep,
                tool_changed: Request,
                error: Keep,
            },
            Status::Error => Transition {
                homing: Keep,
                tool_changed: Set(false),
                error: Set(true),
            },
            _ => Transition::default(),
        }
    }
}

impl Feedback {
    /// update with a frame received from the device, `request` is the host's current tool change request
    pub fn update(&mut self, frame: ReadFrame, request: bool) {
        let status = frame.status();
        let transition = status.transition();
        if transition == Transition::default() {
            trace!("status {:#04x} ({:?}) leaves flags unchanged", frame.status, status);
        }
        self.status = u32::from(frame.status);
        self.homed = frame.homed();
        self.current_tool = u32::from(frame.tool_number);
        self.homing = transition.homing.apply(self.homing, request);
        self.tool_changed = transition.tool_changed.apply(self.tool_changed, request);
        self.error = transition.error.apply(self.error, request);
    }
}

impl Instance {
    /// update the feedback with a frame received from the device
    pub fn process(&mut self, frame: ReadFrame) {
        let request = self.command.tool_change;
        self.feedback.update(frame, request);
    }
}

impl Toolerator {
    /**
        read one frame per instance, in the same order as written, and update the instances' feedback

        the reader is moved by exactly [Toolerator::required_read_buffer], so the modules following in the buffer stay aligned
    */
    pub fn process_read(&mut self, data: &mut FrameReader<'_>) -> Result<(), Error> {
        let size = self.required_read_buffer();
        data.section(size, |frames| {
            for instance in self.instances_mut() {
                instance.process(frames.take()?);
            }
            Ok(())
        })
    }
}
