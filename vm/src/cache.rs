use crate::{
    memory::PhysicalMemory, CACHE_INDEX_BITS, CACHE_LINE_SIZE, CACHE_OFFSET_BITS, CACHE_SIZE,
};

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct CacheLine {
    /// Só tem significado se `valid`.
    pub tag: u8,
    pub data: [u8; CACHE_LINE_SIZE],
    pub valid: bool,
}

/// Um endereço físico quebrado nos campos que a cache usa.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CacheAddress {
    pub tag: u8,
    pub index: usize,
    pub offset: usize,
}

impl CacheAddress {
    pub fn decompose(physical_addr: u16) -> Self {
        let addr = physical_addr as usize;

        CacheAddress {
            tag: (addr >> (CACHE_OFFSET_BITS + CACHE_INDEX_BITS)) as u8,
            index: (addr >> CACHE_OFFSET_BITS) & (CACHE_SIZE - 1),
            offset: addr & (CACHE_LINE_SIZE - 1),
        }
    }

    /// Início do bloco alinhado que contém o endereço.
    pub fn block_start(physical_addr: u16) -> usize {
        physical_addr as usize & !(CACHE_LINE_SIZE - 1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CacheAccess {
    pub value: u8,
    pub hit: bool,
    pub address: CacheAddress,
}

/// Cache de mapeamento direto, somente leitura (sem write-back).
pub struct Cache {
    lines: [CacheLine; CACHE_SIZE],
}

impl Cache {
    pub fn new() -> Self {
        Cache {
            lines: [CacheLine::default(); CACHE_SIZE],
        }
    }

    pub fn access(&mut self, physical_addr: u16, memory: &PhysicalMemory) -> CacheAccess {
        let address = CacheAddress::decompose(physical_addr);
        let line = &mut self.lines[address.index];

        let hit = line.valid && line.tag == address.tag;

        if !hit {
            let block_start = CacheAddress::block_start(physical_addr);

            log::trace!(
                "cache: preenchendo linha {} com bloco [{:#06X}; {:#06X})",
                address.index,
                block_start,
                block_start + CACHE_LINE_SIZE
            );

            line.data.copy_from_slice(memory.block(block_start));
            line.tag = address.tag;
            line.valid = true;
        }

        CacheAccess {
            value: line.data[address.offset],
            hit,
            address,
        }
    }

    pub fn line(&self, index: usize) -> &CacheLine {
        &self.lines[index]
    }

    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}
