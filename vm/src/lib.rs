//! Simulador didático de um pipeline de acesso à memória: TLB, tabela de
//! páginas com carregamento sob demanda e uma cache de mapeamento direto sobre
//! uma memória física simulada.
//!
//! O ponto de entrada é [`mmu::Mmu::translate`], que leva um endereço virtual
//! por todas as estruturas e devolve o valor lido junto com o trace de cada
//! decisão de hit/miss.

pub mod cache;
pub mod memory;
pub mod mmu;
pub mod page_loader;
pub mod page_table;
pub mod stats;
pub mod tlb;

/// Tamanho da memória física em bytes (64 KiB).
pub const MEMORY_SIZE: usize = 65536;
/// Tamanho de uma página (e de um frame).
pub const PAGE_SIZE: usize = 256;
/// Número de entradas da TLB.
pub const TLB_SIZE: usize = 16;
/// Número de linhas da cache.
pub const CACHE_SIZE: usize = 64;
/// Bytes por linha de cache.
pub const CACHE_LINE_SIZE: usize = 8;
/// Número de páginas virtuais e de frames físicos.
pub const NUM_PAGES: usize = MEMORY_SIZE / PAGE_SIZE;
/// Maior endereço virtual válido.
pub const VIRTUAL_ADDRESS_MAX: u16 = 0xFFFF;

pub const PAGE_OFFSET_BITS: u32 = PAGE_SIZE.trailing_zeros();
pub const CACHE_OFFSET_BITS: u32 = CACHE_LINE_SIZE.trailing_zeros();
pub const CACHE_INDEX_BITS: u32 = CACHE_SIZE.trailing_zeros();
pub const CACHE_TAG_BITS: u32 = 16 - CACHE_INDEX_BITS - CACHE_OFFSET_BITS;

pub use mmu::{Mmu, Step, TranslationResult};
pub use stats::Stats;
