pub const TEXT_SIZES: [u32; 5] = [14, 16, 18, 20, 22];
pub const DEFAULT_TEXT_SIZE_INDEX: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextSize {
    index: usize,
}

impl TextSize {
    pub fn from_index(index: usize) -> Self {
        TextSize {
            index: index.min(TEXT_SIZES.len() - 1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn points(&self) -> u32 {
        TEXT_SIZES[self.index]
    }

    pub fn grow(self) -> Self {
        TextSize::from_index(self.index + 1)
    }

    pub fn shrink(self) -> Self {
        TextSize::from_index(self.index.saturating_sub(1))
    }
}

impl Default for TextSize {
    fn default() -> Self {
        TextSize::from_index(DEFAULT_TEXT_SIZE_INDEX)
    }
}
