use core::time::Duration;
use toolerator::{
    Error, Toolerator, Module,
    cursor::{FrameReader, FrameWriter},
    frames::{ReadFrame, Status},
    };


const PERIOD: Duration = Duration::from_millis(1);

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// run one read cycle with the given frames, given as (tool, homed, status)
fn receive(toolerator: &mut Toolerator, frames: &[(u8, u8, u8)]) {
    let mut buffer = [0u8; 16];
    for (chunk, &(tool, homed, status)) in buffer.chunks_mut(4).zip(frames) {
        chunk.copy_from_slice(&[0, tool, homed, status]);
    }
    let mut reader = FrameReader::new(&buffer[.. toolerator.required_read_buffer()]);
    toolerator.process_read(&mut reader).unwrap();
    assert_eq!(reader.remaining(), 0);
}

/// receive a status and return the (homing, tool_changed, error) flags
fn status(toolerator: &mut Toolerator, status: u8) -> (bool, bool, bool) {
    receive(toolerator, &[(0, 1, status)]);
    let feedback = toolerator[0].feedback();
    (feedback.homing, feedback.tool_changed, feedback.error)
}


#[test]
fn encode_wraps_tool_number() {
    init_logger();
    let mut toolerator = Toolerator::new([6]).unwrap();
    let instance = toolerator.get_mut(0).unwrap();
    instance.command.tool_number = 8;

    let mut buffer = [0xff; 4];
    toolerator.prepare_write(&mut FrameWriter::new(&mut buffer)).unwrap();
    assert_eq!(buffer, [0, 0, 0, 2]);
}

#[test]
fn encode_flags() {
    init_logger();
    let mut toolerator = Toolerator::new([8]).unwrap();
    let instance = toolerator.get_mut(0).unwrap();
    instance.command.enable = true;
    instance.command.tool_change = true;
    instance.command.tool_number = 3;

    let mut buffer = [0; 4];
    toolerator.prepare_write(&mut FrameWriter::new(&mut buffer)).unwrap();
    assert_eq!(buffer, [0, 1, 1, 3]);
}

#[test]
fn encode_in_instance_order() {
    init_logger();
    let mut toolerator = Toolerator::new([1, 10]).unwrap();
    toolerator.get_mut(0).unwrap().command.tool_number = 5;
    toolerator.get_mut(1).unwrap().command.tool_number = 5;

    let mut buffer = [0xff; 8];
    toolerator.prepare_write(&mut FrameWriter::new(&mut buffer)).unwrap();
    assert_eq!(buffer, [0, 0, 0, 0,  0, 0, 0, 5]);
}

#[test]
fn encoded_tool_always_valid() {
    for tool_count in [1, 2, 6, 8, 13, 255] {
        let mut toolerator = Toolerator::new([tool_count]).unwrap();
        for requested in [0, 1, 5, 6, 254, 255, 256, 1000, u32::MAX] {
            toolerator.get_mut(0).unwrap().command.tool_number = requested;
            let mut buffer = [0; 4];
            toolerator.prepare_write(&mut FrameWriter::new(&mut buffer)).unwrap();
            assert_eq!(u32::from(buffer[3]), requested % u32::from(tool_count));
            assert!(buffer[3] < tool_count);
        }
    }
}

#[test]
fn encode_short_buffer() {
    let toolerator = Toolerator::new([6, 6]).unwrap();
    let mut buffer = [0; 6];
    let mut writer = FrameWriter::new(&mut buffer);
    assert_eq!(
        toolerator.prepare_write(&mut writer).unwrap_err(),
        Error::Buffer {required: 8, available: 6},
        );
    assert_eq!(writer.position(), 0);
}

#[test]
fn homing_phases() {
    init_logger();
    for code in [2, 3, 4, 5] {
        let mut toolerator = Toolerator::new([6]).unwrap();
        // previous state must not matter
        status(&mut toolerator, 8);
        toolerator.get_mut(0).unwrap().command.tool_change = true;
        assert_eq!(status(&mut toolerator, 8), (false, true, false));
        assert_eq!(status(&mut toolerator, code), (true, false, false));
    }
}

#[test]
fn ready_follows_request() {
    init_logger();
    let mut toolerator = Toolerator::new([6]).unwrap();
    status(&mut toolerator, 2);
    for request in [true, false, true] {
        toolerator.get_mut(0).unwrap().command.tool_change = request;
        let (homing, changed, _) = status(&mut toolerator, 8);
        assert_eq!(changed, request);
        // homing is left as it was
        assert!(homing);
    }
}

#[test]
fn homing_then_ready() {
    init_logger();
    let mut toolerator = Toolerator::new([6]).unwrap();
    toolerator.get_mut(0).unwrap().command.tool_change = true;
    let mut changed = [false; 3];
    let mut homing = [false; 3];
    for (i, code) in [2, 2, 8].into_iter().enumerate() {
        (homing[i], changed[i], _) = status(&mut toolerator, code);
    }
    assert_eq!(changed, [false, false, true]);
    assert_eq!(homing, [true, true, true]);
}

#[test]
fn moving_clears_tool_changed() {
    init_logger();
    let mut toolerator = Toolerator::new([6]).unwrap();
    toolerator.get_mut(0).unwrap().command.tool_change = true;
    assert_eq!(status(&mut toolerator, 8), (false, true, false));
    assert_eq!(status(&mut toolerator, 6), (false, false, false));
    assert_eq!(status(&mut toolerator, 8), (false, true, false));
    assert_eq!(status(&mut toolerator, 7), (false, false, false));
}

#[test]
fn error_is_sticky() {
    init_logger();
    let mut toolerator = Toolerator::new([6]).unwrap();
    toolerator.get_mut(0).unwrap().command.tool_change = true;
    assert_eq!(status(&mut toolerator, 9), (false, false, true));
    assert_eq!(status(&mut toolerator, 6), (false, false, true));
    assert_eq!(status(&mut toolerator, 8), (false, true, true));
    assert_eq!(status(&mut toolerator, 2), (true, false, true));
}

#[test]
fn unmapped_status_keeps_flags() {
    init_logger();
    let mut toolerator = Toolerator::new([6]).unwrap();
    toolerator.get_mut(0).unwrap().command.tool_change = true;
    status(&mut toolerator, 2);
    status(&mut toolerator, 8);
    let before = *toolerator[0].feedback();
    for code in [0, 1, 10, 0x42, 0xff] {
        receive(&mut toolerator, &[(4, 0, code)]);
        let feedback = toolerator[0].feedback();
        assert_eq!(feedback.status, u32::from(code));
        assert_eq!(feedback.current_tool, 4);
        assert!(!feedback.homed);
        assert_eq!(
            (feedback.homing, feedback.tool_changed, feedback.error),
            (before.homing, before.tool_changed, before.error),
            );
    }
}

#[test]
fn decode_is_idempotent() {
    init_logger();
    for code in 0 ..= 10 {
        let mut toolerator = Toolerator::new([6]).unwrap();
        toolerator.get_mut(0).unwrap().command.tool_change = true;
        receive(&mut toolerator, &[(3, 1, code)]);
        let first = *toolerator[0].feedback();
        receive(&mut toolerator, &[(3, 1, code)]);
        assert_eq!(*toolerator[0].feedback(), first);
    }
}

#[test]
fn decode_in_instance_order() {
    init_logger();
    let mut toolerator = Toolerator::new([6, 8, 10]).unwrap();
    receive(&mut toolerator, &[(1, 1, 8), (2, 0, 2), (7, 1, 9)]);

    let feedback = toolerator[0].feedback();
    assert_eq!((feedback.status, feedback.current_tool, feedback.homed), (8, 1, true));
    let feedback = toolerator[1].feedback();
    assert_eq!((feedback.status, feedback.current_tool, feedback.homing), (2, 2, true));
    let feedback = toolerator[2].feedback();
    assert_eq!((feedback.status, feedback.current_tool, feedback.error), (9, 7, true));
}

#[test]
fn status_codes() {
    assert_eq!(ReadFrame {padding: 0, tool_number: 0, homed: 0, status: 8}.status(), Status::Ready);
    assert_eq!(Status::from(1), Status::Start);
    assert_eq!(Status::from(9), Status::Error);
    assert_eq!(Status::from(0), Status::Unknown);
    assert_eq!(Status::from(200), Status::Unknown);
    assert!(Status::HomeLatching.is_homing());
    assert!(Status::MovingBackward.is_moving());
    assert!(!Status::Ready.is_homing());
}

#[test]
fn shared_buffer_alignment() {
    init_logger();
    // two boards' worth of modules packed in the same buffers, around a foreign module's word
    let mut first = Toolerator::new([6, 8]).unwrap();
    let mut second = Toolerator::new([4]).unwrap();
    first.get_mut(1).unwrap().command.tool_number = 9;
    second.get_mut(0).unwrap().command.tool_number = 3;
    second.get_mut(0).unwrap().command.enable = true;

    let mut buffer = [0xee; 16];
    let mut writer = FrameWriter::new(&mut buffer);
    first.configure(&mut writer, PERIOD).unwrap();
    Module::prepare_write(&mut first, &mut writer, PERIOD).unwrap();
    writer.put(0xdeadbeef_u32).unwrap();
    Module::prepare_write(&mut second, &mut writer, PERIOD).unwrap();
    assert_eq!(writer.position(), 16);
    assert_eq!(buffer, [
        0, 0, 0, 0,
        0, 0, 0, 1,
        0xde, 0xad, 0xbe, 0xef,
        0, 1, 0, 3,
        ]);

    let received = [
        0, 5, 1, 8,
        0, 1, 1, 6,
        1, 2, 3, 4,
        0, 3, 1, 9,
        ];
    let mut reader = FrameReader::new(&received);
    Module::process_read(&mut first, &mut reader, PERIOD).unwrap();
    assert_eq!(reader.take::<u32>().unwrap(), 0x01020304);
    Module::process_read(&mut second, &mut reader, PERIOD).unwrap();
    assert_eq!(reader.remaining(), 0);
    assert_eq!(first[0].feedback().current_tool, 5);
    assert_eq!(first[1].feedback().status, 6);
    assert!(second[0].feedback().error);
}

#[test]
fn decode_short_buffer() {
    let mut toolerator = Toolerator::new([6, 6]).unwrap();
    let received = [0, 1, 1, 9, 0, 2];
    let mut reader = FrameReader::new(&received);
    assert_eq!(
        toolerator.process_read(&mut reader).unwrap_err(),
        Error::Buffer {required: 8, available: 6},
        );
    assert_eq!(reader.position(), 0);
    assert!(!toolerator[0].feedback().error);
}
