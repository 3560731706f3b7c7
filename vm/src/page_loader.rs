/// Fonte do conteúdo das páginas carregadas num page fault.
pub trait PageLoader {
    fn load_page_into(&mut self, page_number: u8, target: &mut [u8]);
}

/// Loader padrão: não existe disco, então a página é sintetizada com o
/// padrão `byte[i] = (page_number + i) mod 256`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternPageLoader;

impl PageLoader for PatternPageLoader {
    fn load_page_into(&mut self, page_number: u8, target: &mut [u8]) {
        for (i, byte) in target.iter_mut().enumerate() {
            *byte = page_number.wrapping_add(i as u8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PAGE_SIZE;

    #[test]
    fn pattern_wraps_around() {
        let mut page = [0u8; PAGE_SIZE];

        PatternPageLoader.load_page_into(0xF0, &mut page);

        assert_eq!(page[0], 0xF0);
        assert_eq!(page[0x0F], 0xFF);
        assert_eq!(page[0x10], 0x00);
        assert_eq!(page[PAGE_SIZE - 1], 0xEF);
    }

    #[test]
    fn page_zero_is_identity() {
        let mut page = [0xAAu8; PAGE_SIZE];

        PatternPageLoader.load_page_into(0, &mut page);

        for (i, byte) in page.iter().enumerate() {
            assert_eq!(*byte as usize, i);
        }
    }
}
