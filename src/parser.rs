use super::types;
use nom::{
    bytes::complete::take,
    combinator::map,
    do_parse,
    number::complete::{be_i16, be_i8, be_u16, be_u32, be_u64, be_u8},
    sequence::tuple,
    take, IResult,
};
use types::{ChapterEntry, Magic, TitleEntry, VmgHeader, VtsHeader, MAGIC_LEN};

// the 12-byte identifier at the start of every IFO file; checked by the caller
pub fn magic(input: &[u8]) -> IResult<&[u8], Magic> {
    map(take(MAGIC_LEN), |id: &[u8]| {
        let mut magic = [0u8; MAGIC_LEN];
        magic.copy_from_slice(id);
        magic
    })(input)
}

// sector pointers and byte addresses are both plain big-endian u32s
pub fn offset(input: &[u8]) -> IResult<&[u8], u32> {
    be_u32(input)
}

pub fn vmg_header(input: &[u8]) -> IResult<&[u8], VmgHeader> {
    do_parse!(
        input,
        magic: magic
            >> bup_end_sector: offset
            >> take!(12usize)
            >> ifo_end_sector: offset
            >> version: be_u16
            >> category: be_u32
            >> take!(24usize)
            >> title_set_count: be_u16
            // provider id
            >> take!(32usize)
            >> pos_code: be_u64
            >> take!(24usize)
            >> vmgi_mat_end: offset
            >> first_play_pgc: offset
            >> take!(56usize)
            >> menu_vob_start: offset
            >> tt_srpt_start: offset
            >> vmgm_pgci_ut_start: offset
            >> vmgm3_start: offset
            >> vmgm4_start: offset
            >> vmgm5_start: offset
            >> vmgm6_start: offset
            >> vmgm7_start: offset
            >> take!(32usize)
            >> take!(1792usize)
            >> (VmgHeader {
                magic,
                bup_end_sector,
                ifo_end_sector,
                version,
                category,
                title_set_count,
                pos_code,
                vmgi_mat_end,
                first_play_pgc,
                menu_vob_start,
                tt_srpt_start,
                vmgm_pgci_ut_start,
                vmgm3_start,
                vmgm4_start,
                vmgm5_start,
                vmgm6_start,
                vmgm7_start,
            })
    )
}

pub fn vts_header(input: &[u8]) -> IResult<&[u8], VtsHeader> {
    do_parse!(
        input,
        magic: magic
            >> bup_end_sector: offset
            >> take!(12usize)
            >> ifo_end_sector: offset
            >> version: be_u16
            >> category: be_u32
            >> take!(90usize)
            >> vts_mat_end: offset
            >> take!(60usize)
            >> menu_vob_start: offset
            >> title_vob_start: offset
            >> vts_ptt_srpt_start: offset
            >> vts_pgci_start: offset
            >> vtsm3_start: offset
            >> vtsm4_start: offset
            >> vtsm5_start: offset
            >> vtsm6_start: offset
            >> vtsm7_start: offset
            >> vtsm8_start: offset
            >> take!(24usize)
            >> take!(1792usize)
            >> (VtsHeader {
                magic,
                bup_end_sector,
                ifo_end_sector,
                version,
                category,
                vts_mat_end,
                menu_vob_start,
                title_vob_start,
                vts_ptt_srpt_start,
                vts_pgci_start,
                vtsm3_start,
                vtsm4_start,
                vtsm5_start,
                vtsm6_start,
                vtsm7_start,
                vtsm8_start,
            })
    )
}

// (title_count, end_address)
pub fn tt_srpt_header(input: &[u8]) -> IResult<&[u8], (u16, u32)> {
    let (input, (title_count, _, end_address)) = tuple((be_u16, take(2usize), offset))(input)?;
    Ok((input, (title_count, end_address)))
}

pub fn title_entry(input: &[u8]) -> IResult<&[u8], TitleEntry> {
    do_parse!(
        input,
        title_type: be_u8
            >> angle_count: be_i8
            >> chapter_count: be_u16
            >> parental_mask: be_i16
            >> title_set_number: be_i8
            >> title_number: be_i8
            >> start_sector: offset
            >> (TitleEntry {
                title_type,
                angle_count,
                chapter_count,
                parental_mask,
                title_set_number,
                title_number,
                start_sector,
            })
    )
}

// (title_count, end_address, first_offset)
pub fn vts_ptt_srpt_header(input: &[u8]) -> IResult<&[u8], (u16, u32, u32)> {
    let (input, (title_count, _, end_address, first_offset)) =
        tuple((be_u16, take(2usize), offset, offset))(input)?;
    Ok((input, (title_count, end_address, first_offset)))
}

pub fn chapter_entry(input: &[u8]) -> IResult<&[u8], ChapterEntry> {
    map(tuple((be_i16, be_i16)), |(pgcn, pgn)| ChapterEntry {
        program_chain_number: pgcn,
        program_number: pgn,
    })(input)
}
