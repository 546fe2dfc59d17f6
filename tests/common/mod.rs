#![allow(dead_code)]

use dvdifo::{Sector, SECTOR_SIZE};

pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .try_init();
}

pub fn put_u16(sector: &mut Sector, at: usize, v: u16) {
    sector[at..at + 2].copy_from_slice(&v.to_be_bytes());
}

pub fn put_u32(sector: &mut Sector, at: usize, v: u32) {
    sector[at..at + 4].copy_from_slice(&v.to_be_bytes());
}

pub fn put_u64(sector: &mut Sector, at: usize, v: u64) {
    sector[at..at + 8].copy_from_slice(&v.to_be_bytes());
}

/// A VMG header sector with a few recognizable field values.
pub fn vmg_sector(tt_srpt_start: u32, ifo_end_sector: u32) -> Sector {
    let mut s = [0u8; SECTOR_SIZE];
    s[..12].copy_from_slice(b"DVDVIDEO-VMG");
    put_u32(&mut s, 0x0C, ifo_end_sector * 2 + 1);
    put_u32(&mut s, 0x1C, ifo_end_sector);
    put_u16(&mut s, 0x20, 0x0011);
    put_u32(&mut s, 0x22, 0x0001_fe00);
    put_u16(&mut s, 0x3E, 3);
    put_u64(&mut s, 0x60, 0x0102_0304_0506_0708);
    put_u32(&mut s, 0x80, 0x3ff);
    put_u32(&mut s, 0x84, 0x400);
    put_u32(&mut s, 0xC0, 40);
    put_u32(&mut s, 0xC4, tt_srpt_start);
    put_u32(&mut s, 0xC8, 5);
    for (i, at) in (0xCC..=0xDC).step_by(4).enumerate() {
        put_u32(&mut s, at, 100 + i as u32);
    }
    s
}

/// A VTS header sector with a few recognizable field values.
pub fn vts_sector(vts_ptt_srpt_start: u32, ifo_end_sector: u32) -> Sector {
    let mut s = [0u8; SECTOR_SIZE];
    s[..12].copy_from_slice(b"DVDVIDEO-VTS");
    put_u32(&mut s, 0x0C, ifo_end_sector * 2 + 1);
    put_u32(&mut s, 0x1C, ifo_end_sector);
    put_u16(&mut s, 0x20, 0x0101);
    put_u32(&mut s, 0x22, 0x0000_0042);
    put_u32(&mut s, 0x80, 0x3d7);
    put_u32(&mut s, 0xC0, 10);
    put_u32(&mut s, 0xC4, 20);
    put_u32(&mut s, 0xC8, vts_ptt_srpt_start);
    put_u32(&mut s, 0xCC, 4);
    for (i, at) in (0xD0..=0xE4).step_by(4).enumerate() {
        put_u32(&mut s, at, 200 + i as u32);
    }
    s
}

/// Raw fields of a TT_SRPT row, in on-disc order.
pub type TitleRow = (u8, i8, u16, i16, i8, i8, u32);

pub fn tt_srpt_sector(title_count: u16, end_address: u32, rows: &[TitleRow]) -> Sector {
    let mut s = [0u8; SECTOR_SIZE];
    put_u16(&mut s, 0, title_count);
    put_u32(&mut s, 4, end_address);
    for (i, &(ty, angles, chapters, parental, vtsn, ttn, start)) in rows.iter().enumerate() {
        let at = 8 + 12 * i;
        s[at] = ty;
        s[at + 1] = angles as u8;
        put_u16(&mut s, at + 2, chapters);
        put_u16(&mut s, at + 4, parental as u16);
        s[at + 6] = vtsn as u8;
        s[at + 7] = ttn as u8;
        put_u32(&mut s, at + 8, start);
    }
    s
}

/// A VTS_PTT_SRPT laid out like on a disc: title offsets right after the
/// header, then each title's (pgcn, pgn) rows. `end_address` is the
/// exclusive end of the rows.
pub fn ptt_sector(titles: &[&[(i16, i16)]]) -> Sector {
    let mut s = [0u8; SECTOR_SIZE];
    put_u16(&mut s, 0, titles.len() as u16);

    let mut at = 8 + 4 * titles.len();
    for (i, rows) in titles.iter().enumerate() {
        put_u32(&mut s, 8 + 4 * i, at as u32);
        for &(pgcn, pgn) in rows.iter() {
            put_u16(&mut s, at, pgcn as u16);
            put_u16(&mut s, at + 2, pgn as u16);
            at += 4;
        }
    }
    put_u32(&mut s, 4, at as u32);
    s
}

/// Lays out sectors back to back, as an IFO file would be on disc.
pub fn image(sectors: &[(u32, Sector)], len: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; len as usize * SECTOR_SIZE];
    for (index, sector) in sectors {
        let at = *index as usize * SECTOR_SIZE;
        bytes[at..at + SECTOR_SIZE].copy_from_slice(sector);
    }
    bytes
}
