//! Removable storage interface
//!
//! Capture redirects inbound action packets into a file; playback
//! feeds a stored file into the command queue instead of the host
//! stream. Directory traversal backs the next-filename query.

use heapless::Vec;

/// Maximum stored file name length, including the terminator byte
/// budgeted on the wire
pub const MAX_FILE_NAME: usize = 32;

/// Storage driver fault codes, reported to the host as a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageError {
    NoCard = 1,
    InitFailed = 2,
    PartitionError = 3,
    FilesystemError = 4,
    DirectoryError = 5,
    FileNotFound = 6,
    Generic = 7,
    /// Card present but write-protected
    CardLocked = 8,
    /// The named entry was a directory; traversal moved into it
    ChangedWorkingDir = 9,
}

/// Error byte for a storage result, 0 on success
pub fn error_code(result: Result<(), StorageError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => e as u8,
    }
}

/// One directory listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: Vec<u8, MAX_FILE_NAME>,
    pub is_dir: bool,
}

pub trait Storage {
    /// Begin capturing subsequent action packets to a named file
    fn start_capture(&mut self, name: &[u8]) -> Result<(), StorageError>;

    /// Append one captured packet
    fn capture_bytes(&mut self, packet: &[u8]);

    /// Stop capturing; returns the number of bytes written
    fn finish_capture(&mut self) -> u32;

    fn is_capturing(&self) -> bool;

    /// Begin playing a stored file into the command queue
    fn start_playback(&mut self, name: &[u8]) -> Result<(), StorageError>;

    fn is_playing(&self) -> bool;

    /// Playback has more commands to deliver
    fn playback_has_next(&self) -> bool;

    /// Rewind directory traversal to the root
    fn directory_reset(&mut self) -> Result<(), StorageError>;

    /// Advance to the next directory entry; None at end of listing
    fn next_directory_entry(&mut self) -> Option<DirEntry>;

    /// Drop any capture/playback state
    fn reset(&mut self);
}
