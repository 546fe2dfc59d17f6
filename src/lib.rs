//! A DVD-Video IFO structure decoder.
//!
//! IFO files describe the layout of a DVD-Video disc. `VIDEO_TS.IFO` holds
//! the Video Manager (VMG), which lists every title on the disc in its title
//! search pointer table (TT_SRPT). Each `VTS_xx_0.IFO` holds a Video Title
//! Set (VTS), whose part-of-title table (VTS_PTT_SRPT) maps chapters to
//! program chains. This crate decodes those headers and tables, and can copy
//! the raw IFO extent for backups. It does not descramble content, walk the
//! disc filesystem or interpret video streams.
//!
//! Sectors are read through the [`SectorSource`] trait. [`StreamSource`]
//! wraps any `Read + Seek`, [`MemorySource`] wraps bytes already in memory.
//! Sources that descramble CSS-protected discs are left to the caller; they
//! only need to implement [`SectorSource`].
//!
//! Open a VMG with [`VmgIfo::open`], a VTS with [`VtsIfo::open`], or let
//! [`Ifo::open`] decide from the header's magic. The decoders for single
//! sectors ([`VmgHeader::parse`], [`TitleTable::parse`], ...) can also be
//! used on their own.
//!
//! # Threads
//! Decoding is synchronous and holds no state besides the decoded values.
//! A document can be shared across threads exactly when its source can;
//! [`StreamSource`] seeks a single handle and is therefore not `Sync`.
//!
//! [`SectorSource`]: source/trait.SectorSource.html
//! [`StreamSource`]: source/struct.StreamSource.html
//! [`MemorySource`]: source/struct.MemorySource.html
//! [`VmgIfo::open`]: ifo/struct.VmgIfo.html#method.open
//! [`VtsIfo::open`]: ifo/struct.VtsIfo.html#method.open
//! [`Ifo::open`]: ifo/enum.Ifo.html#method.open
//! [`VmgHeader::parse`]: types/struct.VmgHeader.html#method.parse
//! [`TitleTable::parse`]: types/struct.TitleTable.html#method.parse
//!
//! # Examples
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::fs::File;
//! use dvdifo::{StreamSource, VmgIfo, VtsIfo};
//!
//! // list the titles on the disc
//! let source = StreamSource::new(File::open("VIDEO_TS/VIDEO_TS.IFO")?);
//! let vmg = VmgIfo::open(&source)?;
//! for title in vmg.tt_srpt()?.titles {
//!     println!(
//!         "VTS {} title {}: {} chapters, starting at sector {}",
//!         title.title_set_number, title.title_number, title.chapter_count, title.start_sector
//!     );
//! }
//!
//! // chapters per program chain of the first title set
//! let source = StreamSource::new(File::open("VIDEO_TS/VTS_01_0.IFO")?);
//! let vts = VtsIfo::open(&source)?;
//! for (pgcn, chapters) in vts.vts_ptt_srpt()?.chapters {
//!     println!("PGC {}: {} chapters", pgcn, chapters);
//! }
//! # Ok(())
//! # }
//! ```
#![doc(html_root_url = "https://docs.rs/dvdifo/0.1.0")]

mod error;
pub mod ifo;
mod parser;
pub mod source;
pub mod types;

pub use error::{IfoError, Result};
pub use ifo::{dump, dump_to, Ifo, VmgIfo, VtsIfo};
pub use source::{MemorySource, SectorSource, StreamSource};
pub use types::*;
