use std::error::Error;
use std::fmt;
use std::io::{self, ErrorKind, Read};

const CONTINUE_MASK: u8 = 0x80;
const VALUE_MASK: u8 = 0x7F;
const SIGN_MASK: u8 = 0x40;

/// A 32 bit value never takes more than ceil(32/7) bytes.
pub const MAX_VARUINT32_BYTES: usize = 5;

#[derive(Debug)]
pub enum LebError {
    UnexpectedEnd,
    Overflow,
    Io(io::Error),
}

impl fmt::Display for LebError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LebError::UnexpectedEnd => write!(f, "unexpected end of input"),
            LebError::Overflow => write!(f, "integer too large for 32 bits"),
            LebError::Io(ref e) => write!(f, "{}", e),
        }
    }
}

impl Error for LebError {}

impl From<io::Error> for LebError {
    fn from(err: io::Error) -> LebError {
        match err.kind() {
            ErrorKind::UnexpectedEof => LebError::UnexpectedEnd,
            _ => LebError::Io(err),
        }
    }
}

fn next_byte<R: Read + ?Sized>(reader: &mut R) -> Result<u8, LebError> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

pub trait ReadLEB {
    fn read_varuint32(&mut self) -> Result<u32, LebError>;
    fn read_varint32(&mut self) -> Result<i32, LebError>;
}

impl<R: Read + ?Sized> ReadLEB for R {
    fn read_varuint32(&mut self) -> Result<u32, LebError> {
        let mut result: u32 = 0;
        for i in 0..MAX_VARUINT32_BYTES {
            let byte = next_byte(self)?;
            // only the low 4 bits of the last byte fit in a u32
            if i == MAX_VARUINT32_BYTES - 1 && byte & 0x70 != 0 {
                return Err(LebError::Overflow);
            }
            result |= ((byte & VALUE_MASK) as u32) << (7 * i);
            if byte & CONTINUE_MASK == 0 {
                return Ok(result);
            }
        }
        Err(LebError::Overflow)
    }

    fn read_varint32(&mut self) -> Result<i32, LebError> {
        let mut result: i64 = 0;
        let mut shift = 0;
        for _ in 0..MAX_VARUINT32_BYTES {
            let byte = next_byte(self)?;
            result |= ((byte & VALUE_MASK) as i64) << shift;
            shift += 7;
            if byte & CONTINUE_MASK == 0 {
                if byte & SIGN_MASK != 0 {
                    result |= -1i64 << shift;
                }
                if result < i32::MIN as i64 || result > i32::MAX as i64 {
                    return Err(LebError::Overflow);
                }
                return Ok(result as i32);
            }
        }
        Err(LebError::Overflow)
    }
}

/// Decodes a varuint32 at `pos`, advancing `pos` past it.
pub fn read_varuint32_at(buffer: &[u8], pos: &mut usize) -> Result<u32, LebError> {
    let mut rest = buffer.get(*pos..).ok_or(LebError::UnexpectedEnd)?;
    let available = rest.len();
    let value = rest.read_varuint32()?;
    *pos += available - rest.len();
    Ok(value)
}

/// Always five bytes wide, so the value can later be patched in place.
pub fn encode_fixed5(value: u32) -> [u8; 5] {
    [
        ((value & 0x7f) as u8) | CONTINUE_MASK,
        (((value >> 7) & 0x7f) as u8) | CONTINUE_MASK,
        (((value >> 14) & 0x7f) as u8) | CONTINUE_MASK,
        (((value >> 21) & 0x7f) as u8) | CONTINUE_MASK,
        ((value >> 28) & 0x0f) as u8,
    ]
}

pub fn patch_fixed5(buffer: &mut [u8], pos: usize, value: u32) -> Result<(), LebError> {
    let slot = buffer
        .get_mut(pos..pos + MAX_VARUINT32_BYTES)
        .ok_or(LebError::UnexpectedEnd)?;
    slot.copy_from_slice(&encode_fixed5(value));
    Ok(())
}

pub fn write_varuint32(out: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & VALUE_MASK as u32) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | CONTINUE_MASK);
    }
}

pub fn write_varint32(out: &mut Vec<u8>, mut value: i32) {
    loop {
        let byte = (value as u8) & VALUE_MASK;
        value >>= 7;
        let done = (value == 0 && byte & SIGN_MASK == 0) || (value == -1 && byte & SIGN_MASK != 0);
        if done {
            out.push(byte);
            return;
        }
        out.push(byte | CONTINUE_MASK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn x(bytes: Vec<u8>) -> Cursor<Vec<u8>> {
        Cursor::new(bytes)
    }

    #[test]
    fn unsigned_reads_1() {
        let mut buff = x(vec![1]);
        assert!(buff.read_varuint32().unwrap() == 1);
    }

    #[test]
    fn unsigned_reads_500() {
        let mut buff = x(vec![0b1111_0100u8, 0b0000_0011u8]);
        assert!(buff.read_varuint32().unwrap() == 500);
        assert_eq!(buff.position(), 2);
    }

    #[test]
    fn unsigned_reads_padded_zero() {
        let mut buff = x(vec![0x80, 0x80, 0x80, 0x80, 0x00]);
        assert_eq!(buff.read_varuint32().unwrap(), 0);
    }

    #[test]
    fn unsigned_reads_max() {
        let mut buff = x(vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
        assert_eq!(buff.read_varuint32().unwrap(), u32::MAX);
    }

    #[test]
    fn unsigned_rejects_unterminated() {
        let mut buff = x(vec![0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);
        assert!(matches!(buff.read_varuint32(), Err(LebError::Overflow)));
        // never looked past the fifth byte
        assert_eq!(buff.position(), 5);
    }

    #[test]
    fn unsigned_rejects_bits_past_32() {
        let mut buff = x(vec![0xff, 0xff, 0xff, 0xff, 0x1f]);
        assert!(matches!(buff.read_varuint32(), Err(LebError::Overflow)));
    }

    #[test]
    fn unsigned_rejects_truncated() {
        let mut buff = x(vec![0x80, 0x80]);
        assert!(matches!(buff.read_varuint32(), Err(LebError::UnexpectedEnd)));
        let mut empty = x(vec![]);
        assert!(matches!(empty.read_varuint32(), Err(LebError::UnexpectedEnd)));
    }

    #[test]
    fn signed_reads_small() {
        assert_eq!(x(vec![1]).read_varint32().unwrap(), 1);
        assert_eq!(x(vec![0x7f]).read_varint32().unwrap(), -1);
        assert_eq!(x(vec![0xc0, 0x00]).read_varint32().unwrap(), 64);
        assert_eq!(x(vec![0x80, 0x7f]).read_varint32().unwrap(), -128);
    }

    #[test]
    fn signed_reads_extremes() {
        let mut out = vec![];
        write_varint32(&mut out, i32::MIN);
        assert_eq!(x(out).read_varint32().unwrap(), i32::MIN);
        let mut out = vec![];
        write_varint32(&mut out, i32::MAX);
        assert_eq!(x(out).read_varint32().unwrap(), i32::MAX);
    }

    #[test]
    fn signed_rejects_out_of_range() {
        let mut buff = x(vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
        assert!(matches!(buff.read_varint32(), Err(LebError::Overflow)));
    }

    #[test]
    fn fixed5_round_trips_boundaries() {
        for &value in &[0, 1, 127, 128, 16383, 16384, 1 << 28, i32::MAX as u32, u32::MAX - 1, u32::MAX] {
            let encoded = encode_fixed5(value);
            let mut pos = 0;
            assert_eq!(read_varuint32_at(&encoded, &mut pos).unwrap(), value);
            assert_eq!(pos, 5);
        }
    }

    #[test]
    fn patch_overwrites_in_place() {
        let mut buffer = vec![0xaa];
        buffer.extend_from_slice(&encode_fixed5(3));
        buffer.push(0xbb);
        patch_fixed5(&mut buffer, 1, 70000).unwrap();
        let mut pos = 1;
        assert_eq!(read_varuint32_at(&buffer, &mut pos).unwrap(), 70000);
        assert_eq!(buffer[6], 0xbb);
        assert!(patch_fixed5(&mut buffer, 3, 1).is_err());
    }

    #[test]
    fn read_at_advances_position() {
        let buffer = vec![0x05, 0xe5, 0x8e, 0x26];
        let mut pos = 1;
        assert_eq!(read_varuint32_at(&buffer, &mut pos).unwrap(), 624485);
        assert_eq!(pos, 4);
        assert!(matches!(read_varuint32_at(&buffer, &mut pos), Err(LebError::UnexpectedEnd)));
        let mut past = 9;
        assert!(read_varuint32_at(&buffer, &mut past).is_err());
    }

    #[test]
    fn minimal_encoding_is_short() {
        let mut out = vec![];
        write_varuint32(&mut out, 624485);
        assert_eq!(out, vec![0xe5, 0x8e, 0x26]);
        let mut out = vec![];
        write_varint32(&mut out, -123456);
        assert_eq!(out, vec![0xc0, 0xbb, 0x78]);
    }
}
