//! Display timing mode and the registry it is published to.

use core::fmt::{self, Write};

use bitflags::bitflags;
use embedded_graphics::geometry::Size;

use crate::error::Error;

bitflags! {
    /// Origin of a display mode.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModeType: u32 {
        const PREFERRED = 1 << 3;
        /// Mode defined by the panel driver
        const DRIVER = 1 << 6;
    }
}

const NAME_LEN: usize = 32;

/// Short printable mode name, e.g. `1080x1920`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ModeName {
    buf: [u8; NAME_LEN],
    len: usize,
}

impl ModeName {
    pub const fn empty() -> Self {
        Self {
            buf: [0; NAME_LEN],
            len: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl Write for ModeName {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > NAME_LEN {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl fmt::Debug for ModeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// A display timing, all horizontal/vertical values in pixels/lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    /// Pixel clock in kHz
    pub clock: u32,
    pub hdisplay: u16,
    pub hsync_start: u16,
    pub hsync_end: u16,
    pub htotal: u16,
    pub vdisplay: u16,
    pub vsync_start: u16,
    pub vsync_end: u16,
    pub vtotal: u16,
    /// Nominal refresh rate in Hz
    pub vrefresh: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub interlaced: bool,
    pub mode_type: ModeType,
    pub name: ModeName,
}

impl DisplayMode {
    /// Name the mode after its active area.
    pub fn set_name(&mut self) {
        let mut name = ModeName::empty();
        // "65535x65535i" always fits
        let _ = write!(
            name,
            "{}x{}{}",
            self.hdisplay,
            self.vdisplay,
            if self.interlaced { "i" } else { "" }
        );
        self.name = name;
    }

    /// Active area in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.hdisplay as u32, self.vdisplay as u32)
    }

    /// Physical size in millimeters.
    pub fn physical_size(&self) -> Size {
        Size::new(self.width_mm, self.height_mm)
    }
}

const HDISPLAY: u16 = 1080;
const HFP: u16 = 216;
const HSYNC: u16 = 16;
const HBP: u16 = 52;

const VDISPLAY: u16 = 1920;
const VFP: u16 = 4;
const VSYNC: u16 = 1;
const VBP: u16 = 3;

const VREFRESH: u32 = 57;

/// The one mode the S6D6FA1 runs at.
pub const S6D6FA1_MODE: DisplayMode = DisplayMode {
    clock: (HDISPLAY + HFP + HSYNC + HBP) as u32 * (VDISPLAY + VFP + VSYNC + VBP) as u32 * VREFRESH
        / 1000,
    hdisplay: HDISPLAY,
    hsync_start: HDISPLAY + HFP,
    hsync_end: HDISPLAY + HFP + HSYNC,
    htotal: HDISPLAY + HFP + HSYNC + HBP,
    vdisplay: VDISPLAY,
    vsync_start: VDISPLAY + VFP,
    vsync_end: VDISPLAY + VFP + VSYNC,
    vtotal: VDISPLAY + VFP + VSYNC + VBP,
    vrefresh: VREFRESH,
    width_mm: 62,
    height_mm: 110,
    interlaced: false,
    mode_type: ModeType::empty(),
    name: ModeName::empty(),
};

/// Physical properties of the attached display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayInfo {
    pub width_mm: u32,
    pub height_mm: u32,
}

/// Mode registry of the display output the panel is connected to.
pub trait Connector {
    /// Take ownership of a mode. Fails with [`Error::OutOfMemory`]
    /// when there is no room left.
    fn add_mode(&mut self, mode: DisplayMode) -> Result<(), Error>;

    fn display_info_mut(&mut self) -> &mut DisplayInfo;
}
