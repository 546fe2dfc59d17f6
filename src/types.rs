use crate::parser;
use crate::{IfoError, Result};
use log::{debug, warn};
use nom::IResult;
use std::{
    collections::BTreeMap,
    fmt::Display,
    iter::StepBy,
    ops::Range,
};

/// Size in bytes of a DVD sector.
pub const SECTOR_SIZE: usize = 2048;

/// One raw sector, as handed out by a [`SectorSource`].
///
/// [`SectorSource`]: ../source/trait.SectorSource.html
pub type Sector = [u8; SECTOR_SIZE];

pub const MAGIC_LEN: usize = 12;

/// The 12-byte ASCII identifier at the start of every IFO file.
pub type Magic = [u8; MAGIC_LEN];

pub const VMG_MAGIC: &Magic = b"DVDVIDEO-VMG";
pub const VTS_MAGIC: &Magic = b"DVDVIDEO-VTS";

const TITLE_ENTRY_LEN: usize = 12;
const CHAPTER_ENTRY_LEN: usize = 4;
const TT_SRPT_HEADER_LEN: usize = 8;
const VTS_PTT_SRPT_HEADER_LEN: usize = 12;
const TITLE_OFFSETS_START: usize = 8;

/// Which kind of IFO file a header belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IfoKind {
    /// Video Manager (`VIDEO_TS.IFO`).
    Vmg,
    /// Video Title Set (`VTS_xx_0.IFO`).
    Vts,
}

impl IfoKind {
    /// The magic identifier a header of this kind must start with.
    pub fn magic(&self) -> &'static Magic {
        match self {
            IfoKind::Vmg => VMG_MAGIC,
            IfoKind::Vts => VTS_MAGIC,
        }
    }

    /// Identifies the kind of IFO file from its magic, if it is a known one.
    pub fn from_magic(magic: &Magic) -> Option<IfoKind> {
        match magic {
            m if m == VMG_MAGIC => Some(IfoKind::Vmg),
            m if m == VTS_MAGIC => Some(IfoKind::Vts),
            _ => None,
        }
    }
}

impl Display for IfoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IfoKind::Vmg => write!(f, "VMG"),
            IfoKind::Vts => write!(f, "VTS"),
        }
    }
}

/// The on-disc structure a decoding error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Table {
    /// The IFO header in sector 0.
    Header,
    /// The VMG title search pointer table.
    TtSrpt,
    /// The VTS part-of-title search pointer table.
    VtsPttSrpt,
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::Header => write!(f, "IFO header"),
            Table::TtSrpt => write!(f, "TT_SRPT"),
            Table::VtsPttSrpt => write!(f, "VTS_PTT_SRPT"),
        }
    }
}

/// The decoded header (sector 0) of an IFO file.
///
/// Callers that know which file they opened can use [`VmgHeader::parse`]
/// or [`VtsHeader::parse`] directly; [`IfoHeader::parse`] picks the variant
/// from the magic identifier.
///
/// [`VmgHeader::parse`]: struct.VmgHeader.html#method.parse
/// [`VtsHeader::parse`]: struct.VtsHeader.html#method.parse
/// [`IfoHeader::parse`]: #method.parse
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IfoHeader {
    Vmg(VmgHeader),
    Vts(VtsHeader),
}

/// The Video Manager information header (VMGI_MAT).
///
/// All `*_start` fields are absolute sector indices within the IFO file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VmgHeader {
    pub magic: Magic,
    /// Last sector of the backup copy (`VIDEO_TS.BUP`).
    pub bup_end_sector: u32,
    /// Last sector of the IFO structure itself.
    pub ifo_end_sector: u32,
    pub version: u16,
    pub category: u32,
    pub title_set_count: u16,
    pub pos_code: u64,
    /// Byte address of the end of VMGI_MAT.
    pub vmgi_mat_end: u32,
    /// Byte address of the first-play program chain.
    pub first_play_pgc: u32,
    pub menu_vob_start: u32,
    pub tt_srpt_start: u32,
    pub vmgm_pgci_ut_start: u32,
    pub vmgm3_start: u32,
    pub vmgm4_start: u32,
    pub vmgm5_start: u32,
    pub vmgm6_start: u32,
    pub vmgm7_start: u32,
}

/// The Video Title Set information header (VTSI_MAT).
///
/// All `*_start` fields are absolute sector indices within the IFO file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VtsHeader {
    pub magic: Magic,
    /// Last sector of the backup copy (`VTS_xx_0.BUP`).
    pub bup_end_sector: u32,
    /// Last sector of the IFO structure itself.
    pub ifo_end_sector: u32,
    pub version: u16,
    pub category: u32,
    /// Byte address of the end of VTSI_MAT.
    pub vts_mat_end: u32,
    pub menu_vob_start: u32,
    pub title_vob_start: u32,
    pub vts_ptt_srpt_start: u32,
    pub vts_pgci_start: u32,
    pub vtsm3_start: u32,
    pub vtsm4_start: u32,
    pub vtsm5_start: u32,
    pub vtsm6_start: u32,
    pub vtsm7_start: u32,
    pub vtsm8_start: u32,
}

/// Runs `parser` over the `len` bytes at `at`, failing with an overrun if
/// they do not fit into the sector.
fn decode<'a, T, P>(
    sector: &'a Sector,
    table: Table,
    at: usize,
    len: usize,
    parser: P,
) -> Result<T>
where
    P: Fn(&'a [u8]) -> IResult<&'a [u8], T>,
{
    let end = at.saturating_add(len);
    let overrun = || IfoError::StructuralOverrun {
        table,
        end,
        limit: SECTOR_SIZE,
    };
    let bytes = sector.get(at..end).ok_or_else(overrun)?;
    parser(bytes).map(|(_, v)| v).map_err(|_| overrun())
}

fn check_magic(kind: IfoKind, magic: &Magic) -> Result<()> {
    if magic == kind.magic() {
        Ok(())
    } else {
        Err(IfoError::MalformedHeader {
            expected: Some(kind),
            found: *magic,
        })
    }
}

impl VmgHeader {
    /// Decodes a VMG header from sector 0 of `VIDEO_TS.IFO`.
    ///
    /// Fails with [`IfoError::MalformedHeader`] unless the sector starts
    /// with `DVDVIDEO-VMG`.
    ///
    /// [`IfoError::MalformedHeader`]: ../enum.IfoError.html#variant.MalformedHeader
    pub fn parse(sector: &Sector) -> Result<VmgHeader> {
        let header = decode(sector, Table::Header, 0, SECTOR_SIZE, parser::vmg_header)?;
        check_magic(IfoKind::Vmg, &header.magic)?;
        Ok(header)
    }
}

impl VtsHeader {
    /// Decodes a VTS header from sector 0 of a `VTS_xx_0.IFO`.
    ///
    /// Fails with [`IfoError::MalformedHeader`] unless the sector starts
    /// with `DVDVIDEO-VTS`.
    ///
    /// [`IfoError::MalformedHeader`]: ../enum.IfoError.html#variant.MalformedHeader
    pub fn parse(sector: &Sector) -> Result<VtsHeader> {
        let header = decode(sector, Table::Header, 0, SECTOR_SIZE, parser::vts_header)?;
        check_magic(IfoKind::Vts, &header.magic)?;
        Ok(header)
    }
}

impl IfoHeader {
    /// Decodes either header variant, chosen by the sector's magic.
    pub fn parse(sector: &Sector) -> Result<IfoHeader> {
        let magic = decode(sector, Table::Header, 0, MAGIC_LEN, parser::magic)?;
        match IfoKind::from_magic(&magic) {
            Some(IfoKind::Vmg) => VmgHeader::parse(sector).map(IfoHeader::Vmg),
            Some(IfoKind::Vts) => VtsHeader::parse(sector).map(IfoHeader::Vts),
            None => Err(IfoError::MalformedHeader {
                expected: None,
                found: magic,
            }),
        }
    }

    pub fn kind(&self) -> IfoKind {
        match self {
            IfoHeader::Vmg(_) => IfoKind::Vmg,
            IfoHeader::Vts(_) => IfoKind::Vts,
        }
    }

    pub fn magic(&self) -> &Magic {
        match self {
            IfoHeader::Vmg(h) => &h.magic,
            IfoHeader::Vts(h) => &h.magic,
        }
    }

    pub fn version(&self) -> u16 {
        match self {
            IfoHeader::Vmg(h) => h.version,
            IfoHeader::Vts(h) => h.version,
        }
    }

    pub fn bup_end_sector(&self) -> u32 {
        match self {
            IfoHeader::Vmg(h) => h.bup_end_sector,
            IfoHeader::Vts(h) => h.bup_end_sector,
        }
    }

    pub fn ifo_end_sector(&self) -> u32 {
        match self {
            IfoHeader::Vmg(h) => h.ifo_end_sector,
            IfoHeader::Vts(h) => h.ifo_end_sector,
        }
    }

    /// Number of sectors making up the IFO structure, header included.
    pub fn ifo_sector_count(&self) -> u64 {
        u64::from(self.ifo_end_sector()) + 1
    }

    pub fn as_vmg(&self) -> Option<&VmgHeader> {
        match self {
            IfoHeader::Vmg(h) => Some(h),
            IfoHeader::Vts(_) => None,
        }
    }

    pub fn as_vts(&self) -> Option<&VtsHeader> {
        match self {
            IfoHeader::Vts(h) => Some(h),
            IfoHeader::Vmg(_) => None,
        }
    }
}

impl From<VmgHeader> for IfoHeader {
    fn from(header: VmgHeader) -> Self {
        IfoHeader::Vmg(header)
    }
}

impl From<VtsHeader> for IfoHeader {
    fn from(header: VtsHeader) -> Self {
        IfoHeader::Vts(header)
    }
}

/// Byte offsets of the `stride`-sized records between `first` and
/// `end_address`.
///
/// `end_address` is the exclusive end of the region: a record is only read
/// if it ends at or before it, and nothing at or past it is touched.
fn record_offsets(
    table: Table,
    first: usize,
    end_address: u32,
    stride: usize,
) -> Result<StepBy<Range<usize>>> {
    let end = end_address as usize;
    if end > SECTOR_SIZE {
        return Err(IfoError::StructuralOverrun {
            table,
            end,
            limit: SECTOR_SIZE,
        });
    }

    let stop = if end >= stride { end - stride + 1 } else { 0 };

    let span = end.saturating_sub(first);
    if first < end && span % stride != 0 {
        warn!(
            "{}: region {}..{} is not a whole number of {}-byte records, ignoring the tail",
            table, first, end, stride
        );
    }

    Ok((first..stop).step_by(stride))
}

/// A row of the title search pointer table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    pub title_type: u8,
    pub angle_count: i8,
    pub chapter_count: u16,
    pub parental_mask: i16,
    /// The VTS (`VTS_xx_0.IFO`) this title lives in.
    pub title_set_number: i8,
    /// The title's number within its VTS.
    pub title_number: i8,
    pub start_sector: u32,
}

/// The title search pointer table (TT_SRPT) of a VMG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTable {
    /// Number of titles as stated by the table header.
    ///
    /// This is not checked against `titles.len()`.
    pub title_count: u16,
    pub end_address: u32,
    /// The table rows, in on-disc order.
    pub titles: Vec<TitleEntry>,
}

impl TitleTable {
    /// Decodes the TT_SRPT from the sector its header pointer refers to.
    pub fn parse(sector: &Sector) -> Result<TitleTable> {
        let (title_count, end_address) = decode(
            sector,
            Table::TtSrpt,
            0,
            TT_SRPT_HEADER_LEN,
            parser::tt_srpt_header,
        )?;

        let titles = record_offsets(
            Table::TtSrpt,
            TT_SRPT_HEADER_LEN,
            end_address,
            TITLE_ENTRY_LEN,
        )?
        .map(|pos| decode(sector, Table::TtSrpt, pos, TITLE_ENTRY_LEN, parser::title_entry))
        .collect::<Result<Vec<_>>>()?;

        debug!(
            "TT_SRPT: {} titles declared, {} decoded (end address {})",
            title_count,
            titles.len(),
            end_address
        );

        Ok(TitleTable {
            title_count,
            end_address,
            titles,
        })
    }

    /// Gets the titles stored in the given VTS.
    pub fn titles_in_title_set(&self, title_set_number: i8) -> Vec<&TitleEntry> {
        self.titles
            .iter()
            .filter(|t| t.title_set_number == title_set_number)
            .collect()
    }
}

/// A row of the part-of-title search pointer table: one chapter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    pub program_chain_number: i16,
    pub program_number: i16,
}

/// The part-of-title search pointer table (VTS_PTT_SRPT) of a VTS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterTable {
    /// Number of titles in this VTS as stated by the table header.
    pub title_count: u16,
    pub end_address: u32,
    /// Byte offset of the first chapter row.
    pub first_offset: u32,
    /// Per-title byte offsets found between the table header and
    /// `first_offset`.
    pub title_offsets: Vec<u32>,
    /// All chapter rows, in on-disc order.
    pub entries: Vec<ChapterEntry>,
    /// The highest program number seen for each program chain.
    ///
    /// Rows are merged across titles: two titles playing the same program
    /// chain share one entry here. Use [`parts_by_title`] for a per-title
    /// view.
    ///
    /// [`parts_by_title`]: #method.parts_by_title
    pub chapters: BTreeMap<i16, i16>,
}

impl ChapterTable {
    /// Decodes the VTS_PTT_SRPT from the sector its header pointer refers to.
    pub fn parse(sector: &Sector) -> Result<ChapterTable> {
        let (title_count, end_address, first_offset) = decode(
            sector,
            Table::VtsPttSrpt,
            0,
            VTS_PTT_SRPT_HEADER_LEN,
            parser::vts_ptt_srpt_header,
        )?;

        let entries = record_offsets(
            Table::VtsPttSrpt,
            first_offset as usize,
            end_address,
            CHAPTER_ENTRY_LEN,
        )?
        .map(|pos| {
            decode(
                sector,
                Table::VtsPttSrpt,
                pos,
                CHAPTER_ENTRY_LEN,
                parser::chapter_entry,
            )
        })
        .collect::<Result<Vec<_>>>()?;

        let mut chapters = BTreeMap::new();
        for entry in entries.iter() {
            let max = chapters
                .entry(entry.program_chain_number)
                .or_insert(entry.program_number);
            if entry.program_number > *max {
                *max = entry.program_number;
            }
        }

        let title_offsets = Self::title_offsets(sector, title_count, first_offset as usize);

        debug!(
            "VTS_PTT_SRPT: {} titles, {} chapter rows over {} program chains",
            title_count,
            entries.len(),
            chapters.len()
        );

        Ok(ChapterTable {
            title_count,
            end_address,
            first_offset,
            title_offsets,
            entries,
            chapters,
        })
    }

    // the offset table sits between the header and the first row; whatever
    // part of it is readable is kept
    fn title_offsets(sector: &Sector, title_count: u16, first_offset: usize) -> Vec<u32> {
        let limit = first_offset.min(SECTOR_SIZE);
        (TITLE_OFFSETS_START..limit)
            .step_by(4)
            .take_while(|pos| pos + 4 <= limit)
            .take(title_count as usize)
            .filter_map(|pos| parser::offset(&sector[pos..pos + 4]).ok().map(|(_, o)| o))
            .collect()
    }

    /// Groups the chapter rows by the title they belong to.
    ///
    /// Title `n` (1-based) is at index `n - 1`. Titles whose offsets point
    /// outside the decoded rows get an empty slice.
    pub fn parts_by_title(&self) -> Vec<&[ChapterEntry]> {
        let first = self.first_offset as usize;
        let n = self.entries.len();
        let index_of =
            |offset: u32| ((offset as usize).saturating_sub(first) / CHAPTER_ENTRY_LEN).min(n);

        self.title_offsets
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let from = index_of(start);
                let to = self
                    .title_offsets
                    .get(i + 1)
                    .map_or(n, |&next| index_of(next));
                &self.entries[from..to.max(from)]
            })
            .collect()
    }

    /// Gets the number of chapters recorded for a program chain.
    pub fn chapter_count(&self, program_chain_number: i16) -> Option<i16> {
        self.chapters.get(&program_chain_number).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(first: usize, end: u32, stride: usize) -> Vec<usize> {
        record_offsets(Table::TtSrpt, first, end, stride)
            .unwrap()
            .collect()
    }

    #[test]
    fn record_offsets_exclusive_end() {
        assert_eq!(offsets(8, 8 + 12 * 3, 12), vec![8, 20, 32]);
    }

    #[test]
    fn record_offsets_last_byte_end() {
        // a record ending on end_address itself would read that byte
        assert_eq!(offsets(8, 8 + 12 * 3 - 1, 12), vec![8, 20]);
    }

    #[test]
    fn record_offsets_stop_before_end_address() {
        assert_eq!(offsets(12, 15, 4), Vec::<usize>::new());
        assert_eq!(offsets(12, 16, 4), vec![12]);
        for pos in offsets(8, 8 + 12 * 4 + 11, 12) {
            assert!(pos + 12 <= 8 + 12 * 4 + 11);
        }
    }

    #[test]
    fn record_offsets_misaligned_end() {
        assert_eq!(offsets(8, 8 + 12 * 2 + 5, 12), vec![8, 20]);
    }

    #[test]
    fn record_offsets_empty() {
        assert!(offsets(8, 8, 12).is_empty());
        assert!(offsets(8, 0, 12).is_empty());
        assert!(offsets(100, 20, 4).is_empty());
    }

    #[test]
    fn record_offsets_sector_bound() {
        let all = offsets(8, SECTOR_SIZE as u32, 4);
        assert_eq!(all.last(), Some(&(SECTOR_SIZE - 4)));
    }

    #[test]
    fn record_offsets_past_sector() {
        let res = record_offsets(Table::VtsPttSrpt, 12, SECTOR_SIZE as u32 + 1, 4);
        match res {
            Err(IfoError::StructuralOverrun { table, end, limit }) => {
                assert_eq!(table, Table::VtsPttSrpt);
                assert_eq!(end, SECTOR_SIZE + 1);
                assert_eq!(limit, SECTOR_SIZE);
            }
            _ => panic!("expected an overrun"),
        }
    }

    #[test]
    fn kind_from_magic() {
        assert_eq!(IfoKind::from_magic(b"DVDVIDEO-VMG"), Some(IfoKind::Vmg));
        assert_eq!(IfoKind::from_magic(b"DVDVIDEO-VTS"), Some(IfoKind::Vts));
        assert_eq!(IfoKind::from_magic(b"DVDVIDEO-VTX"), None);
    }
}
