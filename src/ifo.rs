use crate::source::SectorSource;
use crate::types::{ChapterTable, IfoHeader, TitleTable, VmgHeader, VtsHeader};
use crate::Result;
use log::debug;
use std::io::Write;

/// Copies the raw IFO structure described by `header`.
///
/// Returns sectors `0..=header.ifo_end_sector()` of `source`, concatenated.
/// The bytes are meant for a verbatim backup and are not decoded.
pub fn dump<S: SectorSource + ?Sized>(source: &S, header: &IfoHeader) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    dump_to(source, header, &mut out)?;
    Ok(out)
}

/// Like [`dump`], but streams the sectors into `writer`.
///
/// Returns the number of sectors written.
///
/// [`dump`]: fn.dump.html
pub fn dump_to<S, W>(source: &S, header: &IfoHeader, writer: &mut W) -> Result<u64>
where
    S: SectorSource + ?Sized,
    W: Write + ?Sized,
{
    let end = header.ifo_end_sector();
    debug!("dumping {} IFO sectors 0..={}", header.kind(), end);

    let mut written = 0;
    for index in 0..=end {
        let sector = source.read_sector(index)?;
        writer.write_all(&sector)?;
        written += 1;
    }
    Ok(written)
}

/// A Video Manager IFO (`VIDEO_TS.IFO`) bound to the source it was read
/// from.
///
/// The source is borrowed, not owned; every table accessor reads from it
/// again.
pub struct VmgIfo<'a, S: ?Sized> {
    source: &'a S,
    header: VmgHeader,
}

impl<'a, S: SectorSource + ?Sized> VmgIfo<'a, S> {
    /// Reads and decodes the VMG header from sector 0.
    pub fn open(source: &'a S) -> Result<Self> {
        let header = VmgHeader::parse(&source.read_sector(0)?)?;
        debug!(
            "VMG header: version {:#06x}, {} title sets, TT_SRPT at sector {}",
            header.version, header.title_set_count, header.tt_srpt_start
        );
        Ok(VmgIfo { source, header })
    }

    pub fn header(&self) -> &VmgHeader {
        &self.header
    }

    /// Reads the title search pointer table.
    pub fn tt_srpt(&self) -> Result<TitleTable> {
        let sector = self.source.read_sector(self.header.tt_srpt_start)?;
        TitleTable::parse(&sector)
    }

    /// Copies the raw IFO structure, see [`dump`](fn.dump.html).
    pub fn dump(&self) -> Result<Vec<u8>> {
        dump(self.source, &self.header.into())
    }

    pub fn dump_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<u64> {
        dump_to(self.source, &self.header.into(), writer)
    }
}

/// A Video Title Set IFO (`VTS_xx_0.IFO`) bound to the source it was read
/// from.
pub struct VtsIfo<'a, S: ?Sized> {
    source: &'a S,
    header: VtsHeader,
}

impl<'a, S: SectorSource + ?Sized> VtsIfo<'a, S> {
    /// Reads and decodes the VTS header from sector 0.
    pub fn open(source: &'a S) -> Result<Self> {
        let header = VtsHeader::parse(&source.read_sector(0)?)?;
        debug!(
            "VTS header: version {:#06x}, VTS_PTT_SRPT at sector {}",
            header.version, header.vts_ptt_srpt_start
        );
        Ok(VtsIfo { source, header })
    }

    pub fn header(&self) -> &VtsHeader {
        &self.header
    }

    /// Reads the part-of-title search pointer table.
    pub fn vts_ptt_srpt(&self) -> Result<ChapterTable> {
        let sector = self.source.read_sector(self.header.vts_ptt_srpt_start)?;
        ChapterTable::parse(&sector)
    }

    /// Copies the raw IFO structure, see [`dump`](fn.dump.html).
    pub fn dump(&self) -> Result<Vec<u8>> {
        dump(self.source, &self.header.into())
    }

    pub fn dump_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<u64> {
        dump_to(self.source, &self.header.into(), writer)
    }
}

/// An IFO file of either kind, as detected from its header.
///
/// Match on it to reach the tables of the kind at hand.
pub enum Ifo<'a, S: ?Sized> {
    Vmg(VmgIfo<'a, S>),
    Vts(VtsIfo<'a, S>),
}

impl<'a, S: SectorSource + ?Sized> Ifo<'a, S> {
    /// Reads sector 0 and opens the IFO as whichever kind its magic names.
    pub fn open(source: &'a S) -> Result<Self> {
        let ifo = match IfoHeader::parse(&source.read_sector(0)?)? {
            IfoHeader::Vmg(header) => Ifo::Vmg(VmgIfo { source, header }),
            IfoHeader::Vts(header) => Ifo::Vts(VtsIfo { source, header }),
        };
        debug!("opened {} IFO", ifo.header().kind());
        Ok(ifo)
    }

    pub fn header(&self) -> IfoHeader {
        match self {
            Ifo::Vmg(vmg) => vmg.header.into(),
            Ifo::Vts(vts) => vts.header.into(),
        }
    }

    pub fn dump(&self) -> Result<Vec<u8>> {
        match self {
            Ifo::Vmg(vmg) => vmg.dump(),
            Ifo::Vts(vts) => vts.dump(),
        }
    }
}
