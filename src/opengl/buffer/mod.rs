use super::OpenGLObject;
use std::mem::size_of;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferDraw {
    Static = 35044,
}

/// An immutable-size GL buffer object holding `data_len` elements of `T`.
pub struct Buffer<T: Copy> {
    handle: u32,
    data_len: usize,
    marker: std::marker::PhantomData<T>,
}

impl<T: Copy> Buffer<T> {
    pub fn new() -> Self {
        let mut handle = 0;

        unsafe { gl::CreateBuffers(1, &mut handle) };
        debug!("Created buffer #{}.", handle);

        Self {
            handle,
            data_len: 0,
            marker: std::marker::PhantomData,
        }
    }

    pub fn new_data(data: &[T], draw: BufferDraw) -> Self {
        let mut buffer = Self::new();
        buffer.set_data(data, draw);

        buffer
    }

    pub fn data_len(&self) -> usize {
        self.data_len
    }

    pub fn byte_len(&self) -> usize {
        byte_len::<T>(self.data_len())
    }

    pub fn set_data(&mut self, data: &[T], draw: BufferDraw) {
        self.data_len = data.len();

        unsafe {
            gl::NamedBufferData(
                self.handle(),
                self.byte_len() as isize,
                data.as_ptr() as *const _,
                draw as u32,
            )
        };
    }
}

impl<T: Copy> OpenGLObject for Buffer<T> {
    fn handle(&self) -> u32 {
        self.handle
    }
}

impl<T: Copy> Drop for Buffer<T> {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.handle) };
    }
}

fn byte_len<T>(data_len: usize) -> usize {
    data_len * size_of::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_len_scales_by_element_size() {
        assert_eq!(byte_len::<f32>(9), 36);
        assert_eq!(byte_len::<u32>(6), 24);
        assert_eq!(byte_len::<[f32; 3]>(4), 48);
    }

    #[test]
    fn draw_hints_match_gl() {
        assert_eq!(BufferDraw::Static as u32, gl::STATIC_DRAW);
    }
}
