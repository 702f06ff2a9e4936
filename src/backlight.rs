//! Backlight driven through the DCS brightness register.

use crate::error::Error;
use crate::interface::DsiInterface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightType {
    /// Brightness is written straight to a hardware register
    Raw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightPower {
    On,
    Off,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightProperties {
    pub kind: BacklightType,
    pub brightness: u16,
    pub max_brightness: u16,
    pub power: BacklightPower,
}

impl Default for BacklightProperties {
    fn default() -> Self {
        Self {
            kind: BacklightType::Raw,
            brightness: 255,
            max_brightness: 255,
            power: BacklightPower::On,
        }
    }
}

impl BacklightProperties {
    /// Brightness to put on the wire, zero while powered down.
    pub fn effective_brightness(&self) -> u16 {
        match self.power {
            BacklightPower::On => self.brightness,
            BacklightPower::Off => 0,
        }
    }
}

/// Backlight handle borrowing the panel's command interface.
///
/// Every transfer runs in high speed mode: [`ModeFlags::LPM`] is cleared
/// before and set again after a successful transfer. After a failed one the
/// flag stays cleared.
///
/// [`ModeFlags::LPM`]: crate::interface::ModeFlags::LPM
pub struct DcsBacklight<'a, DI> {
    di: &'a mut DI,
    props: &'a mut BacklightProperties,
}

impl<'a, DI: DsiInterface> DcsBacklight<'a, DI> {
    pub fn new(di: &'a mut DI, props: &'a mut BacklightProperties) -> Self {
        Self { di, props }
    }

    pub fn properties(&self) -> &BacklightProperties {
        &*self.props
    }

    /// Read back the brightness register, low byte only.
    pub fn get_brightness(&mut self) -> Result<u8, Error> {
        self.di.set_low_power(false);
        let brightness = self.di.get_display_brightness()?;
        self.di.set_low_power(true);

        Ok((brightness & 0xff) as u8)
    }

    pub fn set_brightness(&mut self, brightness: u16) -> Result<(), Error> {
        if brightness > self.props.max_brightness {
            return Err(Error::InvalidBrightness(brightness));
        }
        self.props.brightness = brightness;
        self.update_status()
    }

    /// Push the current properties to the panel.
    pub fn update_status(&mut self) -> Result<(), Error> {
        let brightness = self.props.effective_brightness();
        debug!("backlight: brightness {}", brightness);

        self.di.set_low_power(false);
        self.di.set_display_brightness(brightness)?;
        self.di.set_low_power(true);

        Ok(())
    }

    pub fn enable(&mut self) -> Result<(), Error> {
        self.set_power(BacklightPower::On)
    }

    pub fn disable(&mut self) -> Result<(), Error> {
        self.set_power(BacklightPower::Off)
    }

    /// Switch power and push it out. The previous power state is kept if the
    /// write fails.
    fn set_power(&mut self, power: BacklightPower) -> Result<(), Error> {
        let old = self.props.power;
        self.props.power = power;
        self.update_status().inspect_err(|_| self.props.power = old)
    }
}
