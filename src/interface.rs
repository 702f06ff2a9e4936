//! The MIPI-DSI command interface for video mode panels.

use bitflags::bitflags;

use crate::command::{DcsCommand, TearMode};
use crate::error::Error;

bitflags! {
    /// DSI peripheral operation mode flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModeFlags: u32 {
        /// Video mode
        const VIDEO = 1 << 0;
        /// Video burst mode
        const VIDEO_BURST = 1 << 1;
        /// Video pulse mode
        const VIDEO_SYNC_PULSE = 1 << 2;
        /// Enable auto vertical count mode
        const VIDEO_AUTO_VERT = 1 << 3;
        /// Enable hsync-end packets in vsync-pulse and v-porch area
        const VIDEO_HSE = 1 << 4;
        /// Disable hfront-porch area
        const VIDEO_HFP = 1 << 5;
        /// Disable hback-porch area
        const VIDEO_HBP = 1 << 6;
        /// Disable hsync-active area
        const VIDEO_HSA = 1 << 7;
        /// Flush display FIFO on vsync pulse
        const VSYNC_FLUSH = 1 << 8;
        /// Disable EoT packets in HS mode
        const EOT_PACKET = 1 << 9;
        /// Device supports non-continuous clock behavior
        const CLOCK_NON_CONTINUOUS = 1 << 10;
        /// Transmit data in low power
        const LPM = 1 << 11;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ModeFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ModeFlags({=u32:#x})", self.bits())
    }
}

/// Pixel format on the DSI video stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    Rgb888,
    Rgb666,
    Rgb666Packed,
    Rgb565,
}

/// Link parameters handed to the DSI host on attach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DsiConfig {
    /// Number of active data lanes
    pub lanes: u8,
    pub format: PixelFormat,
    pub mode_flags: ModeFlags,
}

/// Trait implemented by DSI hosts to carry panel commands.
///
/// Transfers are synchronous and blocking. The mode flags are owned by the
/// interface and consulted by the host on every transfer, so toggling
/// [`ModeFlags::LPM`] selects low power or high speed transmission for the
/// commands that follow.
pub trait DsiInterface {
    /// Send a generic write packet, payload verbatim.
    fn generic_write(&mut self, payload: &[u8]) -> Result<(), Error>;

    /// Send a DCS command with its parameters.
    fn dcs_write(&mut self, command: u8, params: &[u8]) -> Result<(), Error>;

    /// Issue a DCS read, returning the number of bytes received.
    fn dcs_read(&mut self, command: u8, buf: &mut [u8]) -> Result<usize, Error>;

    fn mode_flags(&self) -> ModeFlags;

    fn set_mode_flags(&mut self, flags: ModeFlags);

    /// Register the peripheral with the host using `config`.
    fn attach(&mut self, _config: &DsiConfig) -> Result<(), Error> {
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Send a raw DCS buffer. The first byte is the command.
    fn dcs_write_buffer(&mut self, data: &[u8]) -> Result<(), Error> {
        match data.split_first() {
            Some((&command, params)) => self.dcs_write(command, params),
            None => Err(Error::InvalidPayload),
        }
    }

    fn set_low_power(&mut self, enabled: bool) {
        let mut flags = self.mode_flags();
        flags.set(ModeFlags::LPM, enabled);
        self.set_mode_flags(flags);
    }

    fn set_display_brightness(&mut self, brightness: u16) -> Result<(), Error> {
        self.dcs_write(
            DcsCommand::SetDisplayBrightness as u8,
            &brightness.to_le_bytes(),
        )
    }

    fn get_display_brightness(&mut self) -> Result<u16, Error> {
        let mut buf = [0u8; 2];
        match self.dcs_read(DcsCommand::GetDisplayBrightness as u8, &mut buf)? {
            0 => Err(Error::NoData),
            _ => Ok(u16::from_le_bytes(buf)),
        }
    }

    fn write_control_display(&mut self, value: u8) -> Result<(), Error> {
        self.dcs_write_buffer(&[DcsCommand::WriteControlDisplay as u8, value])
    }

    fn write_power_save(&mut self, value: u8) -> Result<(), Error> {
        self.dcs_write_buffer(&[DcsCommand::WritePowerSave as u8, value])
    }

    fn set_tear_on(&mut self, mode: TearMode) -> Result<(), Error> {
        self.dcs_write(DcsCommand::SetTearOn as u8, &[mode as u8])
    }

    fn exit_sleep_mode(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::ExitSleepMode as u8, &[])
    }

    fn enter_sleep_mode(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::EnterSleepMode as u8, &[])
    }

    fn set_display_on(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::SetDisplayOn as u8, &[])
    }

    fn set_display_off(&mut self) -> Result<(), Error> {
        self.dcs_write(DcsCommand::SetDisplayOff as u8, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Event, MockBus};

    #[test]
    fn brightness_is_sent_low_byte_first() {
        let bus = MockBus::new();
        let mut dsi = bus.dsi();
        dsi.set_display_brightness(0x00ff).unwrap();
        dsi.set_display_brightness(0x1234).unwrap();
        assert_eq!(
            bus.events(),
            [
                Event::Dcs(vec![0x51, 0xff, 0x00]),
                Event::Dcs(vec![0x51, 0x34, 0x12]),
            ]
        );
        assert_eq!(dsi.get_display_brightness(), Ok(0x1234));
    }

    #[test]
    fn empty_read_is_no_data() {
        let bus = MockBus::new();
        let mut dsi = bus.dsi();
        dsi.short_read = true;
        assert_eq!(dsi.get_display_brightness(), Err(Error::NoData));
    }

    #[test]
    fn empty_dcs_buffer_is_rejected() {
        let bus = MockBus::new();
        let mut dsi = bus.dsi();
        assert_eq!(dsi.dcs_write_buffer(&[]), Err(Error::InvalidPayload));
        dsi.dcs_write_buffer(&[0x53, 0x2c]).unwrap();
        assert_eq!(bus.events(), [Event::Dcs(vec![0x53, 0x2c])]);
    }

    #[test]
    fn vendor_dcs_writes_carry_one_parameter() {
        let bus = MockBus::new();
        let mut dsi = bus.dsi();
        dsi.write_control_display(0x2c).unwrap();
        dsi.write_power_save(0x00).unwrap();
        assert_eq!(
            bus.events(),
            [Event::Dcs(vec![0x53, 0x2c]), Event::Dcs(vec![0x55, 0x00])]
        );
    }

    #[test]
    fn low_power_toggles_only_lpm() {
        let bus = MockBus::new();
        let mut dsi = bus.dsi();
        dsi.set_mode_flags(ModeFlags::VIDEO | ModeFlags::EOT_PACKET);
        dsi.set_low_power(true);
        assert_eq!(
            dsi.mode_flags(),
            ModeFlags::VIDEO | ModeFlags::EOT_PACKET | ModeFlags::LPM
        );
        dsi.set_low_power(false);
        assert_eq!(dsi.mode_flags(), ModeFlags::VIDEO | ModeFlags::EOT_PACKET);
    }
}
