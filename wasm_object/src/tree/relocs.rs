use std::fmt;

use crate::tree::section::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocKind {
    FunctionIndexLeb = 0,
    TableIndexSleb = 1,
    TableIndexI32 = 2,
    MemoryAddrLeb = 3,
    MemoryAddrSleb = 4,
    MemoryAddrI32 = 5,
    TypeIndexLeb = 6,
    GlobalIndexLeb = 7,
}

impl RelocKind {
    pub fn from_u32(kind: u32) -> Option<RelocKind> {
        let kind = match kind {
            0 => RelocKind::FunctionIndexLeb,
            1 => RelocKind::TableIndexSleb,
            2 => RelocKind::TableIndexI32,
            3 => RelocKind::MemoryAddrLeb,
            4 => RelocKind::MemoryAddrSleb,
            5 => RelocKind::MemoryAddrI32,
            6 => RelocKind::TypeIndexLeb,
            7 => RelocKind::GlobalIndexLeb,
            _ => return None,
        };
        Some(kind)
    }

    pub fn has_addend(self) -> bool {
        match self {
            RelocKind::MemoryAddrLeb | RelocKind::MemoryAddrSleb | RelocKind::MemoryAddrI32 => true,
            _ => false,
        }
    }
}

impl fmt::Display for RelocKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            RelocKind::FunctionIndexLeb => "R_WEBASSEMBLY_FUNCTION_INDEX_LEB",
            RelocKind::TableIndexSleb => "R_WEBASSEMBLY_TABLE_INDEX_SLEB",
            RelocKind::TableIndexI32 => "R_WEBASSEMBLY_TABLE_INDEX_I32",
            RelocKind::MemoryAddrLeb => "R_WEBASSEMBLY_MEMORY_ADDR_LEB",
            RelocKind::MemoryAddrSleb => "R_WEBASSEMBLY_MEMORY_ADDR_SLEB",
            RelocKind::MemoryAddrI32 => "R_WEBASSEMBLY_MEMORY_ADDR_I32",
            RelocKind::TypeIndexLeb => "R_WEBASSEMBLY_TYPE_INDEX_LEB",
            RelocKind::GlobalIndexLeb => "R_WEBASSEMBLY_GLOBAL_INDEX_LEB",
        };
        f.write_str(name)
    }
}

/// A patch to apply to the code or data section once final indices are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reloc {
    pub section: SectionId,
    pub kind: RelocKind,
    pub offset: u32,
    pub index: u32,
    pub addend: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_memory_addresses_carry_addends() {
        let with: Vec<u32> = (0..8)
            .filter(|&k| RelocKind::from_u32(k).map_or(false, RelocKind::has_addend))
            .collect();
        assert_eq!(with, vec![3, 4, 5]);
        assert!(RelocKind::from_u32(8).is_none());
    }
}
