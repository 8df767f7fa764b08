mod material;

pub mod mesh;

pub use material::*;

use glam::Vec4;

bitflags::bitflags! {
    pub struct ClearMask : u32 {
        const COLOR = gl::COLOR_BUFFER_BIT;
        const DEPTH = gl::DEPTH_BUFFER_BIT;
        const STENCIL = gl::STENCIL_BUFFER_BIT;
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill = 6914,
    Line = 6913,
}

impl PolygonMode {
    pub fn apply(self) {
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, self as u32) };
    }
}

pub fn clear(color: Vec4, mask: ClearMask) {
    unsafe {
        gl::ClearColor(color.x, color.y, color.z, color.w);
        gl::Clear(mask.bits());
    }
}

pub fn set_viewport(width: u32, height: u32) {
    unsafe { gl::Viewport(0, 0, width as i32, height as i32) };
}
