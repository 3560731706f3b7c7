use crate::NUM_PAGES;

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct PageTableEntry {
    pub frame_index: u8,
}

/// Tabela de páginas de um nível só, indexada diretamente pelo page number.
///
/// Entradas só são criadas pelo tratamento de page fault e nunca removidas.
pub struct PageTable {
    table: [Option<PageTableEntry>; NUM_PAGES],
    resident: usize,
}

impl PageTable {
    pub fn new() -> Self {
        PageTable {
            table: [None; NUM_PAGES],
            resident: 0,
        }
    }

    pub fn set(&mut self, page_number: u8, frame_index: u8) {
        let slot = &mut self.table[page_number as usize];

        if slot.is_none() {
            self.resident += 1;
        }

        *slot = Some(PageTableEntry { frame_index });
    }

    pub fn get(&self, page_number: u8) -> Option<PageTableEntry> {
        self.table[page_number as usize]
    }

    /// Número de páginas residentes.
    pub fn len(&self) -> usize {
        self.resident
    }

    pub fn is_empty(&self) -> bool {
        self.resident == 0
    }

    /// Frame que o próximo page fault vai receber.
    ///
    /// A alocação é só uma contagem: `páginas residentes mod NUM_PAGES`. Não
    /// há lista de frames livres nem política de substituição, então depois
    /// de NUM_PAGES páginas o frame 0 volta a ser entregue e a página antiga
    /// continua mapeada para ele (aliasing).
    pub fn next_frame(&self) -> u8 {
        (self.resident % NUM_PAGES) as u8
    }

    /// Entradas presentes, em ordem de page number.
    pub fn iter(&self) -> impl Iterator<Item = (u8, PageTableEntry)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter_map(|(page, entry)| entry.map(|entry| (page as u8, entry)))
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_misses() {
        let table = PageTable::new();

        assert!(table.is_empty());
        assert_eq!(table.get(0x00), None);
        assert_eq!(table.get(0xFF), None);
        assert_eq!(table.next_frame(), 0);
    }

    #[test]
    fn frames_assigned_by_count() {
        let mut table = PageTable::new();

        for page in [0x10u8, 0x02, 0xFF] {
            let frame = table.next_frame();
            table.set(page, frame);
        }

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0x10).map(|e| e.frame_index), Some(0));
        assert_eq!(table.get(0x02).map(|e| e.frame_index), Some(1));
        assert_eq!(table.get(0xFF).map(|e| e.frame_index), Some(2));
        assert_eq!(table.next_frame(), 3);
    }

    #[test]
    fn iter_is_ordered_by_page() {
        let mut table = PageTable::new();
        table.set(0x30, 0);
        table.set(0x01, 1);

        let pages: Vec<u8> = table.iter().map(|(page, _)| page).collect();

        assert_eq!(pages, vec![0x01, 0x30]);
    }

    #[test]
    fn full_table_wraps_to_frame_zero() {
        let mut table = PageTable::new();

        for page in 0..=u8::MAX {
            let frame = table.next_frame();
            table.set(page, frame);
        }

        assert_eq!(table.len(), NUM_PAGES);
        assert_eq!(table.next_frame(), 0);
    }
}
