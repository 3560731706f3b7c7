use std::ops::Range;

use rand::Rng;

use crate::{CACHE_LINE_SIZE, MEMORY_SIZE, PAGE_SIZE};

/// A "RAM" simulada: um array de `MEMORY_SIZE` bytes.
pub struct PhysicalMemory {
    bytes: Box<[u8]>,
}

impl PhysicalMemory {
    /// Cria a memória preenchendo cada byte com um valor uniforme em [0, 255].
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = vec![0u8; MEMORY_SIZE].into_boxed_slice();
        rng.fill(&mut bytes[..]);

        PhysicalMemory { bytes }
    }

    pub fn read(&self, address: usize) -> u8 {
        assert!(
            address < MEMORY_SIZE,
            "leitura fora da memória física: {:#06X}",
            address
        );

        self.bytes[address]
    }

    pub fn write(&mut self, address: usize, value: u8) {
        assert!(
            address < MEMORY_SIZE,
            "escrita fora da memória física: {:#06X}",
            address
        );

        self.bytes[address] = value;
    }

    pub fn frame_idx_to_range(frame_idx: usize) -> Range<usize> {
        Range {
            start: frame_idx * PAGE_SIZE,
            end: (frame_idx + 1) * PAGE_SIZE,
        }
    }

    /// O frame inteiro, para o page loader escrever a página nele.
    pub fn frame_mut(&mut self, frame_idx: usize) -> &mut [u8] {
        let range = Self::frame_idx_to_range(frame_idx);
        assert!(range.end <= MEMORY_SIZE, "frame {:#04X} inexistente", frame_idx);

        &mut self.bytes[range]
    }

    /// O bloco de `CACHE_LINE_SIZE` bytes que começa em `block_start`.
    pub fn block(&self, block_start: usize) -> &[u8] {
        assert_eq!(block_start % CACHE_LINE_SIZE, 0, "bloco desalinhado");
        assert!(
            block_start + CACHE_LINE_SIZE <= MEMORY_SIZE,
            "bloco fora da memória física: {:#06X}",
            block_start
        );

        &self.bytes[block_start..block_start + CACHE_LINE_SIZE]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn read_back_written_byte() {
        let mut memory = PhysicalMemory::new(&mut StdRng::seed_from_u64(1));

        memory.write(0x1234, 0xAB);
        memory.write(MEMORY_SIZE - 1, 0x01);

        assert_eq!(memory.read(0x1234), 0xAB);
        assert_eq!(memory.read(MEMORY_SIZE - 1), 0x01);
    }

    #[test]
    fn same_seed_same_content() {
        let a = PhysicalMemory::new(&mut StdRng::seed_from_u64(42));
        let b = PhysicalMemory::new(&mut StdRng::seed_from_u64(42));

        assert_eq!(a.as_slice().len(), MEMORY_SIZE);
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    #[should_panic(expected = "leitura fora da memória física")]
    fn out_of_bounds_read_panics() {
        let memory = PhysicalMemory::new(&mut StdRng::seed_from_u64(1));
        memory.read(MEMORY_SIZE);
    }

    #[test]
    fn frame_covers_one_page() {
        let mut memory = PhysicalMemory::new(&mut StdRng::seed_from_u64(1));

        memory.frame_mut(3).fill(0x7);

        assert_eq!(memory.read(3 * PAGE_SIZE), 0x7);
        assert_eq!(memory.read(4 * PAGE_SIZE - 1), 0x7);
        assert_eq!(memory.block(3 * PAGE_SIZE), &[0x7u8; CACHE_LINE_SIZE]);
    }
}
