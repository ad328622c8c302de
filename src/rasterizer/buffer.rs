//! Owned element storage backing every pipeline binding: vertex data, index
//! data, color targets, and depth targets.

use std::cell::RefCell;
use std::rc::Rc;

use bytemuck::Pod;

use super::error::RenderError;

/// A buffer shared between the driver and the rasterizer. A draw call spans
/// the buffer's lifetime across many triangles while the driver keeps its own
/// handle for the final save, so ownership is reference counted.
pub type SharedBuffer<T> = Rc<RefCell<Buffer<T>>>;

/// Wrap a buffer for shared ownership
pub fn shared<T>(buffer: Buffer<T>) -> SharedBuffer<T> {
    Rc::new(RefCell::new(buffer))
}

/// A fixed-size 1D or 2D array of elements, row-major, addressable by linear
/// index or by (x, y)
#[derive(Debug, Clone)]
pub struct Buffer<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Clone + Default> Buffer<T> {
    /// Allocate `count` default-initialized elements
    pub fn new(count: usize) -> Result<Self, RenderError> {
        Self::new_2d(count, 1)
    }

    /// Allocate a `width` x `height` grid of default-initialized elements
    pub fn new_2d(width: usize, height: usize) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data: vec![T::default(); width * height],
            width,
            height,
        })
    }
}

impl<T> Buffer<T> {
    /// Take ownership of existing elements as a 1D buffer
    pub fn from_vec(data: Vec<T>) -> Result<Self, RenderError> {
        let width = data.len();
        if width == 0 {
            return Err(RenderError::InvalidDimensions { width, height: 1 });
        }
        Ok(Self { data, width, height: 1 })
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.data.get_mut(i)
    }

    pub fn get_xy(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_xy_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    /// Overwrite every element
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }
}

impl<T: Pod> Buffer<T> {
    /// Raw byte view of the whole buffer, for bulk upload or image encoding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Rgba;

    #[test]
    fn test_new_rejects_zero_count() {
        assert_eq!(
            Buffer::<f32>::new(0).unwrap_err(),
            RenderError::InvalidDimensions { width: 0, height: 1 }
        );
    }

    #[test]
    fn test_new_2d_rejects_zero_dimension() {
        assert!(Buffer::<f32>::new_2d(4, 0).is_err());
        assert!(Buffer::<f32>::new_2d(0, 4).is_err());
    }

    #[test]
    fn test_linear_and_xy_access_agree() {
        let mut buffer = Buffer::<u32>::new_2d(3, 2).unwrap();
        *buffer.get_xy_mut(2, 1).unwrap() = 42;
        assert_eq!(buffer.get(5), Some(&42));
        assert_eq!(buffer.count(), 6);
    }

    #[test]
    fn test_out_of_range_access_is_none() {
        let buffer = Buffer::<u32>::new_2d(3, 2).unwrap();
        assert!(buffer.get(6).is_none());
        assert!(buffer.get_xy(3, 0).is_none());
        assert!(buffer.get_xy(0, 2).is_none());
    }

    #[test]
    fn test_as_bytes_covers_every_element() {
        let buffer = Buffer::<Rgba>::new_2d(4, 4).unwrap();
        assert_eq!(buffer.as_bytes().len(), 4 * 4 * 4);
    }

    #[test]
    fn test_fill() {
        let mut buffer = Buffer::<f32>::new(5).unwrap();
        buffer.fill(1.5);
        assert!((0..5).all(|i| *buffer.get(i).unwrap() == 1.5));
    }
}
