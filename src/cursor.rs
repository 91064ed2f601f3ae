/*!
    cursors over the byte buffers shared by all modules of a board

    Each module owns a section of the buffer, whose size it declares ahead with its `required_*_buffer` function. A section always moves the cursor by its full declared size, whatever was actually consumed inside, so a module can never shift the data of the modules following it.
*/

use packbytes::{FromBytes, ToBytes, ByteArray};
use crate::Error;


/// reading cursor in a buffer received from the device
#[derive(Debug)]
pub struct FrameReader<'b> {
    buffer: &'b [u8],
    position: usize,
}
impl<'b> FrameReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {buffer, position: 0}
    }
    /// number of bytes already consumed
    pub fn position(&self) -> usize {self.position}
    /// number of bytes left to consume
    pub fn remaining(&self) -> usize {self.buffer.len() - self.position}

    /// read the next value and move after it
    pub fn take<T: FromBytes>(&mut self) -> Result<T, Error> {
        let src = self.advance(T::Bytes::SIZE)?;
        let mut dst = T::Bytes::zeroed();
        dst.as_mut().copy_from_slice(src);
        Ok(T::from_be_bytes(dst))
    }
    /**
        give `read` a reader over the next `size` bytes, then move after them

        the cursor is not moved if the section does not fit or `read` fails
    */
    pub fn section<R>(&mut self, size: usize, read: impl FnOnce(&mut FrameReader<'b>) -> Result<R, Error>) -> Result<R, Error> {
        let start = self.position;
        let mut inner = FrameReader::new(self.advance(size)?);
        match read(&mut inner) {
            Ok(value) => Ok(value),
            Err(error) => {
                self.position = start;
                Err(error)
            },
        }
    }
    fn advance(&mut self, size: usize) -> Result<&'b [u8], Error> {
        let buffer = self.buffer;
        let end = self.position.checked_add(size)
            .filter(|&end| end <= buffer.len())
            .ok_or(Error::Buffer {required: size, available: self.remaining()})?;
        let slice = &buffer[self.position .. end];
        self.position = end;
        Ok(slice)
    }
}


/// writing cursor in a buffer to be sent to the device
#[derive(Debug)]
pub struct FrameWriter<'b> {
    buffer: &'b mut [u8],
    position: usize,
}
impl<'b> FrameWriter<'b> {
    pub fn new(buffer: &'b mut [u8]) -> Self {
        Self {buffer, position: 0}
    }
    /// number of bytes already written
    pub fn position(&self) -> usize {self.position}
    /// number of bytes left to write
    pub fn remaining(&self) -> usize {self.buffer.len() - self.position}

    /// write the given value and move after it
    pub fn put<T: ToBytes>(&mut self, value: T) -> Result<(), Error> {
        let src = value.to_be_bytes();
        self.advance(src.as_ref().len())?.copy_from_slice(src.as_ref());
        Ok(())
    }
    /**
        give `write` a writer over the next `size` bytes, then move after them

        bytes of the section left unwritten keep their previous content. the cursor is not moved if the section does not fit or `write` fails
    */
    pub fn section<R>(&mut self, size: usize, write: impl FnOnce(&mut FrameWriter<'_>) -> Result<R, Error>) -> Result<R, Error> {
        let start = self.position;
        let result = write(&mut FrameWriter::new(self.advance(size)?));
        if result.is_err() {
            self.position = start;
        }
        result
    }
    fn advance(&mut self, size: usize) -> Result<&mut [u8], Error> {
        let available = self.remaining();
        let start = self.position;
        let end = start.checked_add(size)
            .filter(|&end| end <= self.buffer.len())
            .ok_or(Error::Buffer {required: size, available})?;
        self.position = end;
        Ok(&mut self.buffer[start .. end])
    }
}
