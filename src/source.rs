//! Where sectors come from.
//!
//! Decoding never touches files directly; it asks a [`SectorSource`] for
//! sectors by index. Plain files and in-memory images are covered by
//! [`StreamSource`] and [`MemorySource`]. Scrambled discs need a source
//! backed by a descrambling library, which callers implement themselves on
//! top of the same trait.
//!
//! [`SectorSource`]: trait.SectorSource.html
//! [`StreamSource`]: struct.StreamSource.html
//! [`MemorySource`]: struct.MemorySource.html
use crate::types::{Sector, SECTOR_SIZE};
use log::trace;
use std::{
    cell::RefCell,
    io::{self, Read, Seek, SeekFrom},
};

/// A random-access supplier of 2048-byte sectors.
///
/// Indices are zero-based and absolute within the stream being read (one
/// IFO or VOB file). A read that cannot deliver a whole sector must fail;
/// short reads are reported as [`io::ErrorKind::UnexpectedEof`].
///
/// Reads take `&self`. Whether a source may be shared between threads is
/// expressed through `Sync`: a source that seeks a single handle before
/// each read (such as [`StreamSource`]) is not `Sync`, and callers that
/// need to share one must serialize access themselves.
///
/// [`io::ErrorKind::UnexpectedEof`]: https://doc.rust-lang.org/std/io/enum.ErrorKind.html#variant.UnexpectedEof
/// [`StreamSource`]: struct.StreamSource.html
pub trait SectorSource {
    fn read_sector(&self, index: u32) -> io::Result<Sector>;
}

impl<T: SectorSource + ?Sized> SectorSource for &T {
    fn read_sector(&self, index: u32) -> io::Result<Sector> {
        (**self).read_sector(index)
    }
}

impl<T: SectorSource + ?Sized> SectorSource for Box<T> {
    fn read_sector(&self, index: u32) -> io::Result<Sector> {
        (**self).read_sector(index)
    }
}

/// A sector source over bytes already in memory, e.g. a whole IFO file.
///
/// A trailing partial sector cannot be read.
#[derive(Debug, Clone)]
pub struct MemorySource<B> {
    bytes: B,
}

impl<B: AsRef<[u8]>> MemorySource<B> {
    pub fn new(bytes: B) -> Self {
        MemorySource { bytes }
    }

    /// Number of whole sectors available.
    pub fn sector_count(&self) -> usize {
        self.bytes.as_ref().len() / SECTOR_SIZE
    }

    pub fn into_inner(self) -> B {
        self.bytes
    }
}

impl<B: AsRef<[u8]>> SectorSource for MemorySource<B> {
    fn read_sector(&self, index: u32) -> io::Result<Sector> {
        let bytes = self.bytes.as_ref();
        let start = (index as usize).checked_mul(SECTOR_SIZE);
        let sector = start
            .and_then(|s| bytes.get(s..s.checked_add(SECTOR_SIZE)?))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "sector {} is past the end of a {}-byte buffer",
                        index,
                        bytes.len()
                    ),
                )
            })?;

        trace!("read sector {} from memory", index);
        let mut buf = [0u8; SECTOR_SIZE];
        buf.copy_from_slice(sector);
        Ok(buf)
    }
}

/// A sector source that seeks and reads an underlying stream, typically a
/// `File`.
///
/// The stream position is shared state, so this type is not
/// `Sync`.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: RefCell<R>,
}

impl<R: Read + Seek> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        StreamSource {
            inner: RefCell::new(inner),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R: Read + Seek> SectorSource for StreamSource<R> {
    fn read_sector(&self, index: u32) -> io::Result<Sector> {
        let mut inner = self.inner.borrow_mut();
        let pos = u64::from(index) * SECTOR_SIZE as u64;
        inner.seek(SeekFrom::Start(pos))?;

        let mut buf = [0u8; SECTOR_SIZE];
        inner.read_exact(&mut buf)?;
        trace!("read sector {} at byte {}", index, pos);
        Ok(buf)
    }
}
