//! Driver for the S6D6FA1 1080x1920 MIPI-DSI video mode panel.
//!
//! The panel is brought up with a hardware reset followed by a vendor
//! register script over the DSI command interface. Brightness is controlled
//! through the DCS brightness register, so there is no separate backlight
//! device to wire up.
//!
//! ```ignore
//! let mut panel = S6D6FA1::new(dsi, reset_pin);
//! panel.attach()?;
//! panel.prepare(&mut delay)?;
//! panel.enable()?;
//! panel.backlight().set_brightness(128)?;
//! ```
#![cfg_attr(not(test), no_std)]

// must come first, the other modules use its macros
mod fmt;

pub mod backlight;
pub mod command;
pub mod error;
pub mod interface;
pub mod mode;
pub mod sequence;

#[cfg(test)]
mod mock;

use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use backlight::{BacklightProperties, DcsBacklight};
pub use error::Error;
use interface::{DsiConfig, ModeFlags, PixelFormat};
pub use interface::DsiInterface;
use mode::{Connector, ModeType, S6D6FA1_MODE};

/// Power lifecycle of a panel, driven by the display pipeline.
///
/// `prepare` powers the panel and runs its init script, `enable` turns the
/// backlight on. Calls are expected in pairs: prepare, enable, disable,
/// unprepare. Repeating a call for a state already reached does nothing.
pub trait PanelLifecycle {
    type Error;

    fn prepare<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), Self::Error>;

    fn unprepare<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), Self::Error>;

    fn enable(&mut self) -> Result<(), Self::Error>;

    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Publish the supported modes to `connector`, returning how many.
    fn get_modes<C: Connector>(&mut self, connector: &mut C) -> Result<usize, Self::Error>;
}

pub struct S6D6FA1<DI, RST> {
    interface: DI,
    reset: RST,
    backlight: BacklightProperties,
    prepared: bool,
    enabled: bool,
}

impl<DI, RST> S6D6FA1<DI, RST>
where
    DI: DsiInterface,
    RST: OutputPin,
{
    pub const DSI_CONFIG: DsiConfig = DsiConfig {
        lanes: 4,
        format: PixelFormat::Rgb888,
        mode_flags: ModeFlags::VIDEO
            .union(ModeFlags::VIDEO_BURST)
            .union(ModeFlags::VIDEO_HSE)
            .union(ModeFlags::EOT_PACKET)
            .union(ModeFlags::CLOCK_NON_CONTINUOUS),
    };

    /// Take over the interface and reset line. Reset is driven low.
    pub fn new(mut interface: DI, mut reset: RST) -> Self {
        reset.set_low().ok();
        interface.set_mode_flags(Self::DSI_CONFIG.mode_flags);

        Self {
            interface,
            reset,
            backlight: BacklightProperties::default(),
            prepared: false,
            enabled: false,
        }
    }

    /// Register with the DSI host.
    pub fn attach(&mut self) -> Result<(), Error> {
        self.interface
            .attach(&Self::DSI_CONFIG)
            .inspect_err(|e| error!("Failed to attach to DSI host: {}", e.code()))
    }

    pub fn detach(&mut self) -> Result<(), Error> {
        self.interface
            .detach()
            .inspect_err(|e| error!("Failed to detach from DSI host: {}", e.code()))
    }

    pub fn backlight(&mut self) -> DcsBacklight<'_, DI> {
        DcsBacklight::new(&mut self.interface, &mut self.backlight)
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Consume the driver and return the interface and reset pin.
    pub fn release(self) -> (DI, RST) {
        (self.interface, self.reset)
    }
}

impl<DI, RST> PanelLifecycle for S6D6FA1<DI, RST>
where
    DI: DsiInterface,
    RST: OutputPin,
{
    type Error = Error;

    fn prepare<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), Error> {
        if self.prepared {
            return Ok(());
        }

        sequence::reset(&mut self.reset, delay);

        if let Err(e) = sequence::power_on(&mut self.interface, delay) {
            error!("Failed to initialize panel: {}", e.code());
            self.reset.set_low().ok();
            return Err(e);
        }

        self.prepared = true;
        Ok(())
    }

    fn unprepare<DELAY: DelayNs>(&mut self, delay: &mut DELAY) -> Result<(), Error> {
        if !self.prepared {
            return Ok(());
        }

        if let Err(e) = sequence::power_off(&mut self.interface, delay) {
            error!("Failed to un-initialize panel: {}", e.code());
        }

        self.reset.set_low().ok();

        self.prepared = false;
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Error> {
        if self.enabled {
            return Ok(());
        }
        if !self.prepared {
            warn!("enabling backlight on an unprepared panel");
        }

        self.backlight()
            .enable()
            .inspect_err(|e| error!("Failed to enable backlight: {}", e.code()))?;

        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Error> {
        if !self.enabled {
            return Ok(());
        }

        self.backlight()
            .disable()
            .inspect_err(|e| error!("Failed to disable backlight: {}", e.code()))?;

        self.enabled = false;
        Ok(())
    }

    fn get_modes<C: Connector>(&mut self, connector: &mut C) -> Result<usize, Error> {
        let mut mode = S6D6FA1_MODE;
        mode.set_name();
        mode.mode_type = ModeType::DRIVER | ModeType::PREFERRED;

        let (width_mm, height_mm) = (mode.width_mm, mode.height_mm);
        connector.add_mode(mode)?;

        let info = connector.display_info_mut();
        info.width_mm = width_mm;
        info.height_mm = height_mm;

        Ok(1)
    }
}

impl<DI, RST> OriginDimensions for S6D6FA1<DI, RST> {
    fn size(&self) -> Size {
        S6D6FA1_MODE.size()
    }
}
