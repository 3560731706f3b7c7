use std::collections::{HashMap, VecDeque};

use crate::TLB_SIZE;

/// TLB com substituição FIFO.
///
/// `fifo` guarda os page numbers em ordem de inserção (o mais antigo na
/// frente) e sempre tem exatamente as mesmas chaves que `entries`. Um hit
/// não mexe na fila: isso é FIFO, não LRU.
pub struct Tlb {
    entries: HashMap<u8, u8>,
    fifo: VecDeque<u8>,
}

impl Tlb {
    pub fn new() -> Self {
        Tlb {
            entries: HashMap::with_capacity(TLB_SIZE),
            fifo: VecDeque::with_capacity(TLB_SIZE),
        }
    }

    pub fn lookup(&self, page_number: u8) -> Option<u8> {
        self.entries.get(&page_number).copied()
    }

    /// Insere a tradução `page_number -> frame_index`.
    ///
    /// Se a página já estiver na TLB nada muda. Se a TLB estiver cheia, a
    /// entrada mais antiga é removida e devolvida.
    pub fn insert(&mut self, page_number: u8, frame_index: u8) -> Option<(u8, u8)> {
        if self.entries.contains_key(&page_number) {
            return None;
        }

        let evicted = if self.entries.len() >= TLB_SIZE {
            self.pick_replacement_page()
        } else {
            None
        };

        self.entries.insert(page_number, frame_index);
        self.fifo.push_back(page_number);

        self.check_invariants();

        evicted
    }

    fn pick_replacement_page(&mut self) -> Option<(u8, u8)> {
        let oldest = self.fifo.pop_front()?;
        let frame = self
            .entries
            .remove(&oldest)
            .expect("fila da TLB divergiu do mapeamento");

        Some((oldest, frame))
    }

    fn check_invariants(&self) {
        assert!(self.entries.len() <= TLB_SIZE, "TLB acima da capacidade");
        assert_eq!(
            self.entries.len(),
            self.fifo.len(),
            "fila da TLB divergiu do mapeamento"
        );
        debug_assert!(self.fifo.iter().all(|page| self.entries.contains_key(page)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entradas em ordem FIFO, da mais antiga para a mais nova.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.fifo.iter().map(|page| (*page, self.entries[page]))
    }
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn lookup_after_insert() {
        let mut tlb = Tlb::new();

        assert_eq!(tlb.lookup(0x12), None);
        assert_eq!(tlb.insert(0x12, 0x03), None);
        assert_eq!(tlb.lookup(0x12), Some(0x03));
    }

    #[test]
    fn seventeenth_insert_evicts_first() {
        let mut tlb = Tlb::new();

        for page in 0..16u8 {
            assert_eq!(tlb.insert(page, page + 100), None);
        }
        assert_eq!(tlb.len(), TLB_SIZE);

        assert_eq!(tlb.insert(16, 116), Some((0, 100)));

        assert_eq!(tlb.len(), TLB_SIZE);
        assert_eq!(tlb.lookup(0), None);
        for page in 1..=16u8 {
            assert_eq!(tlb.lookup(page), Some(page + 100));
        }
    }

    #[test]
    fn hits_do_not_refresh_position() {
        let mut tlb = Tlb::new();

        for page in 0..16u8 {
            tlb.insert(page, page);
        }
        for _ in 0..10 {
            assert_eq!(tlb.lookup(0), Some(0));
        }

        assert_eq!(tlb.insert(0xAA, 0x01), Some((0, 0)));
    }

    #[test]
    fn duplicate_insert_is_noop() {
        let mut tlb = Tlb::new();

        tlb.insert(0x05, 0x01);
        assert_eq!(tlb.insert(0x05, 0x09), None);

        assert_eq!(tlb.len(), 1);
        assert_eq!(tlb.lookup(0x05), Some(0x01));
    }

    #[test]
    fn iter_is_fifo_order() {
        let mut tlb = Tlb::new();

        tlb.insert(0x30, 0);
        tlb.insert(0x01, 1);
        tlb.insert(0x20, 2);

        assert_eq!(
            tlb.iter().collect::<Vec<_>>(),
            vec![(0x30, 0), (0x01, 1), (0x20, 2)]
        );
    }

    proptest! {
        #[test]
        fn prop_capacity_and_key_sets(pages in proptest::collection::vec(any::<u8>(), 0..200)) {
            let mut tlb = Tlb::new();

            for page in pages {
                tlb.insert(page, page);

                prop_assert!(tlb.len() <= TLB_SIZE);
                let queued: HashSet<u8> = tlb.fifo.iter().copied().collect();
                let mapped: HashSet<u8> = tlb.entries.keys().copied().collect();
                prop_assert_eq!(queued.len(), tlb.fifo.len());
                prop_assert_eq!(queued, mapped);
            }
        }
    }
}
