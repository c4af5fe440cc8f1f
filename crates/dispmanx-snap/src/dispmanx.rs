//! DispmanX frame source: FFI to the Broadcom host library.
//!
//! Call sequence per capture: open the display, query its mode, create
//! a VideoCore resource at the capture size, snapshot the composed
//! screen into it, read the pixels back at the aligned pitch, then
//! delete the resource. The display handle is held for the lifetime of
//! the source and closed on drop.

#![allow(unsafe_code)]

use std::error::Error;
use std::ffi::c_void;
use std::fmt;

use vc_raster::{CapturedRaster, PixelFormat, Transform, aligned_pitch};

use crate::source::{DisplayInfo, FrameSource};

#[repr(C)]
struct ModeInfo {
    width: i32,
    height: i32,
    transform: u32,
    input_format: u32,
    display_num: u32,
}

#[repr(C)]
struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[link(name = "bcm_host")]
unsafe extern "C" {
    fn bcm_host_init();
    fn vc_dispmanx_display_open(device: u32) -> u32;
    fn vc_dispmanx_display_get_info(display: u32, info: *mut ModeInfo) -> i32;
    fn vc_dispmanx_resource_create(
        image_type: u32,
        width: u32,
        height: u32,
        native_image_handle: *mut u32,
    ) -> u32;
    fn vc_dispmanx_snapshot(display: u32, snapshot_resource: u32, transform: u32) -> i32;
    fn vc_dispmanx_rect_set(rect: *mut Rect, x: u32, y: u32, width: u32, height: u32) -> i32;
    fn vc_dispmanx_resource_read_data(
        handle: u32,
        rect: *const Rect,
        dst_address: *mut c_void,
        dst_pitch: u32,
    ) -> i32;
    fn vc_dispmanx_resource_delete(res: u32) -> i32;
    fn vc_dispmanx_display_close(display: u32) -> i32;
}

/// VC_IMAGE_TYPE_T codes for the formats a snapshot can request.
const fn vc_image_type(format: PixelFormat) -> u32 {
    match format {
        PixelFormat::Rgb565 => 1,
        PixelFormat::Rgb888 => 5,
        PixelFormat::Rgba8888 => 15, // VC_IMAGE_RGBA32
        PixelFormat::Rgba4444 => 18, // VC_IMAGE_RGBA16
    }
}

#[derive(Debug)]
pub enum DispmanxError {
    OpenFailed(u32),
    GetInfoFailed,
    ResourceCreateFailed,
    SnapshotFailed,
    ReadDataFailed,
}

impl fmt::Display for DispmanxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFailed(display) => write!(f, "unable to open display {display}"),
            Self::GetInfoFailed => write!(f, "unable to get display information"),
            Self::ResourceCreateFailed => write!(f, "unable to create screen resource"),
            Self::SnapshotFailed => write!(f, "display snapshot failed"),
            Self::ReadDataFailed => write!(f, "unable to read snapshot data"),
        }
    }
}

impl Error for DispmanxError {}

/// An open DispmanX display. Closed when dropped.
pub struct DispmanxSource {
    handle: u32,
}

impl DispmanxSource {
    /// Initialise the host library and open the given display number.
    pub fn open(display: u32) -> Result<Self, DispmanxError> {
        let handle = unsafe {
            bcm_host_init();
            vc_dispmanx_display_open(display)
        };
        if handle == 0 {
            return Err(DispmanxError::OpenFailed(display));
        }
        Ok(Self { handle })
    }
}

impl FrameSource for DispmanxSource {
    fn display_info(&mut self) -> Result<DisplayInfo, Box<dyn Error>> {
        let mut info = ModeInfo {
            width: 0,
            height: 0,
            transform: 0,
            input_format: 0,
            display_num: 0,
        };
        let result = unsafe { vc_dispmanx_display_get_info(self.handle, &raw mut info) };
        if result != 0 {
            return Err(Box::new(DispmanxError::GetInfoFailed));
        }
        Ok(DisplayInfo {
            width: info.width as u32,
            height: info.height as u32,
            transform_code: info.transform,
        })
    }

    fn capture(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<CapturedRaster, Box<dyn Error>> {
        let info = self.display_info()?;
        // odd rotation quadrants compose with swapped axes
        let (cap_w, cap_h) = if Transform::from_code(info.transform_code).swaps_axes() {
            (height, width)
        } else {
            (width, height)
        };
        let pitch = aligned_pitch(format, cap_w);
        let mut buffer = vec![0u8; pitch * cap_h as usize];

        let mut vc_image_ptr = 0u32;
        let resource =
            unsafe { vc_dispmanx_resource_create(vc_image_type(format), cap_w, cap_h, &raw mut vc_image_ptr) };
        if resource == 0 {
            return Err(Box::new(DispmanxError::ResourceCreateFailed));
        }

        let result = unsafe { vc_dispmanx_snapshot(self.handle, resource, 0) };
        if result != 0 {
            unsafe { vc_dispmanx_resource_delete(resource) };
            return Err(Box::new(DispmanxError::SnapshotFailed));
        }

        let mut rect = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
        };
        let result = unsafe {
            vc_dispmanx_rect_set(&raw mut rect, 0, 0, cap_w, cap_h);
            vc_dispmanx_resource_read_data(
                resource,
                &raw const rect,
                buffer.as_mut_ptr().cast::<c_void>(),
                pitch as u32,
            )
        };
        unsafe { vc_dispmanx_resource_delete(resource) };
        if result != 0 {
            return Err(Box::new(DispmanxError::ReadDataFailed));
        }

        Ok(CapturedRaster::new(buffer, cap_w, cap_h, pitch, format)?)
    }
}

impl Drop for DispmanxSource {
    fn drop(&mut self) {
        unsafe {
            vc_dispmanx_display_close(self.handle);
        }
    }
}
