use byteorder::ReadBytesExt;
use leb::ReadLEB;

use std::io::Cursor;
use std::str;

use crate::parser::ParseError;
use crate::tree::language_types::ResizableLimits;
use crate::tree::Span;

const I32_CONST: u8 = 0x41;
const END: u8 = 0x0b;

/// A cursor whose underlying slice stops at the end of the current section.
pub type Reader<'a> = Cursor<&'a [u8]>;

pub fn end_of(reader: &Reader) -> usize {
    reader.get_ref().len()
}

pub fn position(reader: &Reader) -> usize {
    reader.position() as usize
}

pub fn read_u8(reader: &mut Reader) -> Result<u8, ParseError> {
    reader.read_u8().map_err(|_| ParseError::UnexpectedEnd)
}

pub fn read_varuint32(reader: &mut Reader) -> Result<u32, ParseError> {
    Ok(reader.read_varuint32()?)
}

pub fn read_varint32(reader: &mut Reader) -> Result<i32, ParseError> {
    Ok(reader.read_varint32()?)
}

/// Skips `len` bytes, which must all lie in the section.
pub fn skip(reader: &mut Reader, len: usize) -> Result<usize, ParseError> {
    let begin = position(reader);
    let end = begin.checked_add(len).filter(|&end| end <= end_of(reader)).ok_or(ParseError::UnexpectedEnd)?;
    reader.set_position(end as u64);
    Ok(begin)
}

/// Length-prefixed name, borrowed from the buffer.
pub fn read_string<'a>(reader: &mut Reader<'a>) -> Result<(Span, &'a str), ParseError> {
    let len = read_varuint32(reader)? as usize;
    let begin = skip(reader, len)?;
    let binary: &'a [u8] = *reader.get_ref();
    let name = str::from_utf8(&binary[begin..begin + len]).map_err(|_| ParseError::InvalidUtf8)?;
    Ok((Span::new(begin, begin + len), name))
}

/// Only `i32.const <n>; end` is accepted.
pub fn read_init_expr_i32(reader: &mut Reader) -> Result<u32, ParseError> {
    if read_u8(reader)? != I32_CONST {
        return Err(ParseError::InitExprNotI32Const);
    }
    let value = read_varint32(reader)? as u32;
    if read_u8(reader)? != END {
        return Err(ParseError::InitExprMissingEnd);
    }
    Ok(value)
}

pub fn read_limits(reader: &mut Reader) -> Result<ResizableLimits, ParseError> {
    let max_present = read_varuint32(reader)? & 1 != 0;
    let initial = read_varuint32(reader)?;
    let maximum = if max_present { Some(read_varuint32(reader)?) } else { None };
    Ok(ResizableLimits { initial, maximum })
}
