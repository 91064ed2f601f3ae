/*!
    pins and params exposed to the host for every tool changer instance

    the host allocates the actual pin objects, this module only names them and gives typed access to the instance's fields behind them
*/

use core::fmt::Write;
use crate::{Error, registry::Instance};


/// maximum length of a pin name on the host side
pub const NAME_LEN: usize = 47;
/// prefix of this module in pin names
pub const PREFIX: &str = "toolerator";

/// direction of a pin, seen from the driver
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// written by the host
    In,
    /// written by the driver
    Out,
    /// read-only parameter, set at initialization
    Param,
}

/// type of value carried by a pin
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    Bit,
    U32,
}

/// value carried by a pin
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Bit(bool),
    U32(u32),
}

/// pins and params of a tool changer instance
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pin {
    Status,
    Enable,
    Error,
    Homing,
    Homed,
    ToolChange,
    ToolChanged,
    ToolNumber,
    CurrentTool,
    ToolCount,
}
impl Pin {
    pub const ALL: [Pin; 10] = [
        Pin::Status,
        Pin::Enable,
        Pin::Error,
        Pin::Homing,
        Pin::Homed,
        Pin::ToolChange,
        Pin::ToolChanged,
        Pin::ToolNumber,
        Pin::CurrentTool,
        Pin::ToolCount,
    ];

    /// name of the pin, as it ends the full pin name
    pub const fn name(self) -> &'static str {
        match self {
            Pin::Status => "status",
            Pin::Enable => "enable",
            Pin::Error => "error",
            Pin::Homing => "homing",
            Pin::Homed => "homed",
            Pin::ToolChange => "tool-change",
            Pin::ToolChanged => "tool-changed",
            Pin::ToolNumber => "tool-number",
            Pin::CurrentTool => "current-tool",
            Pin::ToolCount => "tool_count",
        }
    }
    pub const fn direction(self) -> Direction {
        match self {
            Pin::Enable | Pin::ToolChange | Pin::ToolNumber => Direction::In,
            Pin::ToolCount => Direction::Param,
            _ => Direction::Out,
        }
    }
    pub const fn kind(self) -> Kind {
        match self {
            Pin::Status | Pin::ToolNumber | Pin::CurrentTool | Pin::ToolCount => Kind::U32,
            _ => Kind::Bit,
        }
    }
}

/// full name of a pin: `<board>.toolerator.<index>.<pin>`
pub fn pin_name(board: &str, index: usize, pin: Pin) -> Result<heapless::String<NAME_LEN>, Error> {
    let mut name = heapless::String::new();
    write!(name, "{}.{}.{}.{}", board, PREFIX, index, pin.name())
        .map_err(|_| Error::Name)?;
    Ok(name)
}

impl Instance {
    /// current value behind a pin
    pub fn read(&self, pin: Pin) -> Value {
        let feedback = self.feedback();
        match pin {
            Pin::Status => Value::U32(feedback.status),
            Pin::Enable => Value::Bit(self.command.enable),
            Pin::Error => Value::Bit(feedback.error),
            Pin::Homing => Value::Bit(feedback.homing),
            Pin::Homed => Value::Bit(feedback.homed),
            Pin::ToolChange => Value::Bit(self.command.tool_change),
            Pin::ToolChanged => Value::Bit(feedback.tool_changed),
            Pin::ToolNumber => Value::U32(self.command.tool_number),
            Pin::CurrentTool => Value::U32(feedback.current_tool),
            Pin::ToolCount => Value::U32(self.tool_count()),
        }
    }
    /// set an input pin, output pins and params are refused
    pub fn write(&mut self, pin: Pin, value: Value) -> Result<(), Error> {
        match (pin, value) {
            (Pin::Enable, Value::Bit(enable)) => self.command.enable = enable,
            (Pin::ToolChange, Value::Bit(request)) => self.command.tool_change = request,
            (Pin::ToolNumber, Value::U32(tool)) => self.command.tool_number = tool,
            _ => return Err(Error::Pin {pin: pin.name()}),
        }
        Ok(())
    }
}
