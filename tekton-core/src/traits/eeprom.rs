//! Persisted settings storage interface
//!
//! Byte-addressed EEPROM access. Block writes race the motion/timer
//! interrupt path reading settings, so the controller wraps them in a
//! critical section.

pub trait Eeprom {
    /// Copy `buf.len()` bytes starting at `offset` into `buf`
    fn read_block(&self, offset: u16, buf: &mut [u8]);

    /// Write `data` starting at `offset`
    fn write_block(&mut self, offset: u16, data: &[u8]);

    /// Read one byte, substituting `default` for an erased cell
    fn read_u8(&self, offset: u16, default: u8) -> u8 {
        let mut buf = [0u8];
        self.read_block(offset, &mut buf);
        if buf[0] == 0xFF {
            default
        } else {
            buf[0]
        }
    }
}
