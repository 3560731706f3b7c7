use std::fmt;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    cache::Cache,
    memory::PhysicalMemory,
    page_loader::{PageLoader, PatternPageLoader},
    page_table::PageTable,
    stats::Stats,
    tlb::Tlb,
    CACHE_LINE_SIZE, PAGE_OFFSET_BITS,
};

/// Uma decisão tomada durante a tradução de um endereço.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    TlbHit { page: u8, frame: u8 },
    TlbMiss { page: u8 },
    PageTableHit { frame: u8 },
    PageFault { page: u8, frame: u8 },
    TlbUpdate { page: u8, frame: u8 },
    PhysicalAddress(u16),
    CacheHit { value: u8 },
    CacheMiss { value: u8 },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Step::TlbHit { page, frame } => {
                write!(f, "TLB HIT: Page {:#04X} -> Frame {:#04X}", page, frame)
            }
            Step::TlbMiss { page } => write!(f, "TLB MISS: Page {:#04X}", page),
            Step::PageTableHit { frame } => write!(f, "PAGE TABLE HIT: Frame {:#04X}", frame),
            Step::PageFault { page, frame } => write!(
                f,
                "PAGE FAULT: Loading Page {:#04X} to Frame {:#04X}",
                page, frame
            ),
            Step::TlbUpdate { page, frame } => write!(
                f,
                "TLB UPDATE: Added (Page {:#04X} -> Frame {:#04X})",
                page, frame
            ),
            Step::PhysicalAddress(addr) => write!(f, "Physical Address: {:#06X}", addr),
            Step::CacheHit { value } => write!(f, "CACHE HIT: Value = {}", value),
            Step::CacheMiss { value } => {
                write!(f, "CACHE MISS: Loaded from memory, Value = {}", value)
            }
        }
    }
}

/// Tudo o que aconteceu num acesso.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationResult {
    pub virtual_addr: u16,
    pub physical_addr: u16,
    pub value: u8,
    pub page_num: u8,
    pub frame_num: u8,
    pub tlb_hit: bool,
    pub cache_hit: bool,
    /// Página que a inserção na TLB expulsou, se houve.
    pub tlb_evicted: Option<u8>,
    pub steps: Vec<Step>,
}

impl TranslationResult {
    /// As linhas do trace, na ordem em que os passos aconteceram.
    pub fn log(&self) -> Vec<String> {
        self.steps.iter().map(Step::to_string).collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageStatus {
    /// Página do acesso mais recente.
    Used,
    Loaded,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PageTableRow {
    pub page: u8,
    pub frame: u8,
    pub status: PageStatus,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CacheLineView {
    pub index: usize,
    pub valid: bool,
    /// `None` se a linha for inválida.
    pub tag: Option<u8>,
    pub data: [u8; CACHE_LINE_SIZE],
}

/// O simulador: memória física, tabela de páginas, TLB, cache e estatísticas
/// de uma instância só. Instâncias diferentes não compartilham nada.
pub struct Mmu<LOADER: PageLoader = PatternPageLoader> {
    memory: PhysicalMemory,
    page_table: PageTable,
    tlb: Tlb,
    cache: Cache,
    stats: Stats,
    last_page: Option<u8>,
    rng: StdRng,
    loader: LOADER,
}

impl Mmu<PatternPageLoader> {
    /// Memória inicial aleatória a partir de entropia do sistema.
    pub fn new() -> Self {
        Self::from_rng(PatternPageLoader, StdRng::from_entropy())
    }

    /// Memória inicial reprodutível.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_loader(PatternPageLoader, seed)
    }
}

impl Default for Mmu<PatternPageLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<LOADER: PageLoader> Mmu<LOADER> {
    pub fn with_loader(loader: LOADER, seed: u64) -> Self {
        Self::from_rng(loader, StdRng::seed_from_u64(seed))
    }

    fn from_rng(loader: LOADER, mut rng: StdRng) -> Self {
        Mmu {
            memory: PhysicalMemory::new(&mut rng),
            page_table: PageTable::new(),
            tlb: Tlb::new(),
            cache: Cache::new(),
            stats: Stats::default(),
            last_page: None,
            rng,
            loader,
        }
    }

    /// Volta ao estado inicial: memória aleatória nova, tabela de páginas e
    /// TLB vazias, cache toda inválida e contadores zerados. O loader é
    /// mantido.
    pub fn reset(&mut self) {
        self.memory = PhysicalMemory::new(&mut self.rng);
        self.page_table = PageTable::new();
        self.tlb = Tlb::new();
        self.cache = Cache::new();
        self.stats = Stats::default();
        self.last_page = None;

        log::info!("mmu: simulador resetado");
    }

    fn handle_page_fault(&mut self, page_number: u8) -> u8 {
        self.stats.page_faults += 1;

        let frame_idx = self.page_table.next_frame();

        if let Some((old_page, _)) = self
            .page_table
            .iter()
            .find(|(_, entry)| entry.frame_index == frame_idx)
        {
            log::warn!(
                "mmu: frame {:#04X} já pertence à página {:#04X}, sobrescrevendo",
                frame_idx,
                old_page
            );
        }

        self.loader
            .load_page_into(page_number, self.memory.frame_mut(frame_idx as usize));

        self.page_table.set(page_number, frame_idx);

        frame_idx
    }

    fn record(steps: &mut Vec<Step>, step: Step) {
        log::debug!("mmu: {}", step);
        steps.push(step);
    }

    /// Leva `virtual_addr` pela TLB, tabela de páginas e cache, devolvendo o
    /// byte lido e o trace de cada decisão.
    pub fn translate(&mut self, virtual_addr: u16) -> TranslationResult {
        self.stats.total_accesses += 1;

        let page_num = (virtual_addr >> PAGE_OFFSET_BITS) as u8; // top 8 bits
        let offset = (virtual_addr & 0x00FF) as u8; // bottom 8 bits

        log::trace!(
            "mmu: acesso addr {:#06X} page_num={:#04X} offset={:#04X}",
            virtual_addr,
            page_num,
            offset
        );

        let mut steps = Vec::with_capacity(6);

        let mut tlb_evicted = None;

        let tlb_entry = self.tlb.lookup(page_num);
        self.stats.record_tlb(tlb_entry.is_some());

        let frame_num = match tlb_entry {
            Some(frame) => {
                Self::record(&mut steps, Step::TlbHit { page: page_num, frame });
                frame
            }
            None => {
                Self::record(&mut steps, Step::TlbMiss { page: page_num });

                let frame = match self.page_table.get(page_num) {
                    Some(entry) => {
                        Self::record(&mut steps, Step::PageTableHit { frame: entry.frame_index });
                        entry.frame_index
                    }
                    None => {
                        let frame = self.handle_page_fault(page_num);
                        Self::record(&mut steps, Step::PageFault { page: page_num, frame });
                        frame
                    }
                };

                if let Some((evicted, _)) = self.tlb.insert(page_num, frame) {
                    log::debug!("mmu: TLB cheia, página {:#04X} expulsa", evicted);
                    tlb_evicted = Some(evicted);
                }
                Self::record(&mut steps, Step::TlbUpdate { page: page_num, frame });

                frame
            }
        };

        let physical_addr = ((frame_num as u16) << PAGE_OFFSET_BITS) | offset as u16;
        Self::record(&mut steps, Step::PhysicalAddress(physical_addr));

        let access = self.cache.access(physical_addr, &self.memory);
        self.stats.record_cache(access.hit);

        let value = access.value;
        if access.hit {
            Self::record(&mut steps, Step::CacheHit { value });
        } else {
            Self::record(&mut steps, Step::CacheMiss { value });
        }

        self.last_page = Some(page_num);

        TranslationResult {
            virtual_addr,
            physical_addr,
            value,
            page_num,
            frame_num,
            tlb_hit: tlb_entry.is_some(),
            cache_hit: access.hit,
            tlb_evicted,
            steps,
        }
    }

    /// Conteúdo da TLB em ordem FIFO (mais antiga primeiro).
    pub fn tlb_snapshot(&self) -> Vec<(u8, u8)> {
        self.tlb.iter().collect()
    }

    pub fn page_table_snapshot(&self) -> Vec<PageTableRow> {
        self.page_table
            .iter()
            .map(|(page, entry)| PageTableRow {
                page,
                frame: entry.frame_index,
                status: if self.last_page == Some(page) {
                    PageStatus::Used
                } else {
                    PageStatus::Loaded
                },
            })
            .collect()
    }

    pub fn cache_snapshot(&self) -> Vec<CacheLineView> {
        self.cache
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CacheLineView {
                index,
                valid: line.valid,
                tag: line.valid.then_some(line.tag),
                data: line.data,
            })
            .collect()
    }

    pub fn stats_snapshot(&self) -> Stats {
        self.stats
    }

    pub fn resident_pages(&self) -> usize {
        self.page_table.len()
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }
}
