/// Row-major storage for one value per maze cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Box<[T]>,
    width: u16,
    height: u16,
}

impl<T: Copy> Grid<T> {
    pub fn new(width: u16, height: u16, value: T) -> Self {
        let data = vec![value; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    fn ravel_index(&self, row: u16, col: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        row as usize * self.width as usize + col as usize
    }

    /// Overwrites every value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.data.iter().copied()
    }

    /// Iterates over `((row, col), value)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = ((u16, u16), T)> + '_ {
        let width = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (((i / width) as u16, (i % width) as u16), v))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.width as usize)
    }
}

impl<T: Copy> std::ops::Index<(u16, u16)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl<T: Copy> std::ops::IndexMut<(u16, u16)> for Grid<T> {
    fn index_mut(&mut self, index: (u16, u16)) -> &mut Self::Output {
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}
