use std::fmt;

/// Contadores acumulados desde a criação (ou o último reset) do simulador.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Stats {
    pub tlb_hits: u64,
    pub tlb_misses: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub page_faults: u64,
    pub total_accesses: u64,
}

fn rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;

    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

impl Stats {
    pub fn record_tlb(&mut self, hit: bool) {
        if hit {
            self.tlb_hits += 1;
        } else {
            self.tlb_misses += 1;
        }
    }

    pub fn record_cache(&mut self, hit: bool) {
        if hit {
            self.cache_hits += 1;
        } else {
            self.cache_misses += 1;
        }
    }

    /// Em porcentagem; 0 se não houve nenhum acesso.
    pub fn tlb_hit_rate(&self) -> f64 {
        rate(self.tlb_hits, self.tlb_misses)
    }

    /// Em porcentagem; 0 se não houve nenhum acesso.
    pub fn cache_hit_rate(&self) -> f64 {
        rate(self.cache_hits, self.cache_misses)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MEMORY MANAGEMENT STATISTICS")?;
        writeln!(f)?;
        writeln!(f, "TLB Performance:")?;
        writeln!(f, "  Hits: {}", self.tlb_hits)?;
        writeln!(f, "  Misses: {}", self.tlb_misses)?;
        writeln!(f, "  Hit Rate: {:.1}%", self.tlb_hit_rate())?;
        writeln!(f)?;
        writeln!(f, "Cache Performance:")?;
        writeln!(f, "  Hits: {}", self.cache_hits)?;
        writeln!(f, "  Misses: {}", self.cache_misses)?;
        writeln!(f, "  Hit Rate: {:.1}%", self.cache_hit_rate())?;
        writeln!(f)?;
        writeln!(f, "System Events:")?;
        writeln!(f, "  Page Faults: {}", self.page_faults)?;
        write!(f, "  Total Accesses: {}", self.total_accesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_without_accesses_are_zero() {
        let stats = Stats::default();

        assert_eq!(stats.tlb_hit_rate(), 0.0);
        assert_eq!(stats.cache_hit_rate(), 0.0);
    }

    #[test]
    fn rates_are_percentages() {
        let mut stats = Stats::default();

        stats.record_tlb(true);
        stats.record_tlb(false);
        stats.record_tlb(false);
        stats.record_tlb(false);
        stats.record_cache(true);

        assert_eq!(stats.tlb_hit_rate(), 25.0);
        assert_eq!(stats.cache_hit_rate(), 100.0);
    }

    #[test]
    fn report_mentions_every_counter() {
        let stats = Stats {
            tlb_hits: 3,
            tlb_misses: 1,
            cache_hits: 2,
            cache_misses: 2,
            page_faults: 1,
            total_accesses: 4,
        };

        let report = stats.to_string();

        assert!(report.contains("Hit Rate: 75.0%"));
        assert!(report.contains("Hit Rate: 50.0%"));
        assert!(report.contains("Page Faults: 1"));
        assert!(report.contains("Total Accesses: 4"));
    }
}
