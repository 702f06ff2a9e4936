//! S6D6FA1 power sequences.
//!
//! The register tables come from the panel vendor and are written verbatim.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::command::TearMode;
use crate::error::Error;
use crate::interface::DsiInterface;

/// Width of each phase of the reset pulse.
pub const RESET_PULSE_MS: u32 = 10;
/// Pacing after brightness, control display, power save and tear on.
pub const COMMAND_PACING_MS: u32 = 1;
pub const EXIT_SLEEP_SETTLE_MS: u32 = 120;
pub const DISPLAY_ON_SETTLE_MS: u32 = 40;
pub const DISPLAY_OFF_SETTLE_MS: u32 = 20;
pub const ENTER_SLEEP_SETTLE_MS: u32 = 80;

/// Brightness programmed during power on, full scale.
pub const INITIAL_BRIGHTNESS: u16 = 0x00ff;
/// BCTRL | DD | BL
pub const CONTROL_DISPLAY: u8 = 0x2c;
/// CABC off
pub const POWER_SAVE: u8 = 0x00;

/// Unlock vendor command levels 2, 3 and MTP.
pub static UNLOCK: [&[u8]; 3] = [
    &[0xf0, 0x5a, 0x5a],
    &[0xf1, 0x5a, 0x5a],
    &[0xfc, 0x5a, 0x5a],
];

/// Relock the vendor command levels.
pub static LOCK: [&[u8]; 3] = [
    &[0xf0, 0xa5, 0xa5],
    &[0xf1, 0xa5, 0xa5],
    &[0xfc, 0xa5, 0xa5],
];

#[rustfmt::skip]
pub static VENDOR_TABLE: [&[u8]; 20] = [
    &[0xf5, 0x10, 0x18, 0x00, 0xd1, 0xa7, 0x11, 0x08],
    &[0xb3, 0x10, 0xf0, 0x00, 0xbb, 0x04, 0x08],
    &[0xb6, 0x29, 0x10, 0x2c, 0x64, 0x64, 0x01],
    &[0xb7,
      0x00, 0x00, 0x00, 0x00, 0x00, 0xc0, 0x00, 0x09,
      0x03, 0xf5, 0x00, 0x00, 0x00, 0x00],
    &[0xb8,
      0x3b, 0x00, 0x18, 0x18, 0x03, 0x21, 0x11, 0x00,
      0x83, 0xf4, 0xbb, 0x00, 0x03, 0x1e, 0x21, 0x00,
      0xbe, 0xbb, 0x0b, 0xe0, 0x70, 0xff, 0xff, 0x00,
      0x20, 0x00, 0x00],
    &[0xb9,
      0x1d, 0x00, 0x18, 0x18, 0x03, 0x00, 0x11, 0x00,
      0x02, 0xf4, 0xbb, 0x00, 0x03, 0x00, 0x00, 0x11,
      0x86, 0x83, 0x18, 0x61, 0x20, 0xff, 0xff, 0x00,
      0x40, 0x00, 0x00],
    &[0xba,
      0x3b, 0x00, 0x18, 0x18, 0x03, 0x21, 0x11, 0x00,
      0x83, 0xf4, 0xbb, 0x00, 0x03, 0x1e, 0x21, 0x00,
      0xbe, 0xbb, 0x0b, 0xe0, 0x70, 0xff, 0xff, 0x00,
      0x20, 0x00, 0x00],
    &[0xbb,
      0x3b, 0x00, 0x18, 0x18, 0x03, 0x21, 0x11, 0x00,
      0x83, 0xf4, 0xbb, 0x00, 0x03, 0x1e, 0x21, 0x00,
      0xbe, 0xbb, 0x0b, 0xe0, 0x70, 0xff, 0xff, 0x00,
      0x20, 0x00, 0x00],
    &[0xbc,
      0x20, 0x80, 0x3c, 0x19, 0x01, 0x02, 0x06, 0x00,
      0x00, 0x2d, 0x06, 0x0f, 0x13, 0x0b, 0x1e, 0x04,
      0x02, 0x2a, 0x00, 0x00, 0x02, 0x00, 0x99],
    &[0xbd,
      0x01, 0x07, 0x07, 0x07, 0x00, 0x00, 0x00, 0x00,
      0x05, 0x01, 0x00, 0x00, 0x00, 0x40, 0x00, 0x05,
      0x2d, 0x05, 0x05, 0x05],
    &[0xbe,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x0b,
      0x0a, 0x0b, 0x07, 0x0b, 0x04, 0x06, 0x02, 0x01,
      0x00, 0x09, 0x0b, 0x0e, 0x0d, 0x0c, 0x11, 0x10,
      0x0f, 0x0b, 0x0b, 0x0b, 0x0b, 0x12, 0x03, 0x05,
      0x02, 0x01, 0x00, 0x08, 0x0b, 0x0e, 0x0d, 0x0c,
      0x11, 0x10, 0x0f],
    &[0xbf,
      0x00, 0x00, 0x00, 0x00, 0x0c, 0xcc, 0xcc, 0xcc,
      0xcc, 0x0c, 0xc6, 0xcc, 0xc7, 0xcc],
    &[0xd0, 0x08],
    &[0xe3, 0x22],
    &[0xe8, 0x00, 0x03, 0x10, 0x04, 0x02, 0x06, 0xd0],
    &[0xf2, 0x46, 0x43, 0x13, 0x33, 0xc1, 0x16],
    &[0xf4,
      0x50, 0x50, 0x70, 0x14, 0x14, 0x14, 0x14, 0x06,
      0x16, 0x26, 0x00, 0x6e, 0x1f, 0x14, 0x0e, 0xc9,
      0x02, 0x55, 0x35, 0x54, 0xaa, 0x55, 0x05, 0x04,
      0x44, 0x48, 0x30],
    &[0xf7, 0x00, 0x00, 0x3f, 0xff],
    // gamma
    &[0xfa,
      0x05, 0x7c, 0x19, 0x21, 0x2d, 0x39, 0x3f, 0x45,
      0x48, 0x48, 0x56, 0x5b, 0x3c, 0x3d, 0x3d, 0x46,
      0x43, 0x3e, 0x41, 0x3d, 0x3a, 0x3a, 0x23, 0x23,
      0x26, 0x2b, 0x1a, 0x05, 0x7c, 0x19, 0x22, 0x2e,
      0x3a, 0x40, 0x45, 0x48, 0x48, 0x56, 0x5b, 0x3c,
      0x3d, 0x3d, 0x46, 0x44, 0x3f, 0x42, 0x3e, 0x3b,
      0x3b, 0x25, 0x24, 0x27, 0x2c, 0x1a, 0x05, 0x7c,
      0x22, 0x2f, 0x39, 0x43, 0x48, 0x4c, 0x4d, 0x4c,
      0x5a, 0x5e, 0x3e, 0x3f, 0x3e, 0x46, 0x44, 0x3e,
      0x41, 0x3d, 0x3a, 0x3a, 0x23, 0x22, 0x25, 0x2b,
      0x1a, 0x00],
    &[0xfb,
      0x05, 0x7c, 0x19, 0x21, 0x2d, 0x39, 0x3f, 0x45,
      0x48, 0x48, 0x56, 0x5b, 0x3c, 0x3d, 0x3d, 0x46,
      0x43, 0x3e, 0x41, 0x3d, 0x3a, 0x3a, 0x23, 0x23,
      0x26, 0x2b, 0x1a, 0x05, 0x7c, 0x19, 0x22, 0x2e,
      0x3a, 0x40, 0x45, 0x48, 0x48, 0x56, 0x5b, 0x3c,
      0x3d, 0x3d, 0x46, 0x44, 0x3f, 0x42, 0x3e, 0x3b,
      0x3b, 0x25, 0x24, 0x27, 0x2c, 0x1a, 0x05, 0x7c,
      0x22, 0x2f, 0x39, 0x43, 0x48, 0x4c, 0x4d, 0x4c,
      0x5a, 0x5e, 0x3e, 0x3f, 0x3e, 0x46, 0x44, 0x3e,
      0x41, 0x3d, 0x3a, 0x3a, 0x23, 0x22, 0x25, 0x2b,
      0x1a],
];

/// Hard reset: high, low, high, 10ms each.
pub fn reset<RST, DELAY>(rst: &mut RST, delay: &mut DELAY)
where
    RST: OutputPin,
    DELAY: DelayNs,
{
    rst.set_high().ok();
    delay.delay_ms(RESET_PULSE_MS);
    rst.set_low().ok();
    delay.delay_ms(RESET_PULSE_MS);
    rst.set_high().ok();
    delay.delay_ms(RESET_PULSE_MS);
}

/// Bring-up script. Stops at the first failed transfer.
pub fn power_on<DI, DELAY>(di: &mut DI, delay: &mut DELAY) -> Result<(), Error>
where
    DI: DsiInterface,
    DELAY: DelayNs,
{
    di.set_low_power(true);

    for seq in UNLOCK.iter().chain(VENDOR_TABLE.iter()).chain(LOCK.iter()) {
        di.generic_write(seq)?;
    }

    di.set_display_brightness(INITIAL_BRIGHTNESS)
        .inspect_err(|e| error!("Failed to set display brightness: {}", e.code()))?;
    delay.delay_ms(COMMAND_PACING_MS);

    di.write_control_display(CONTROL_DISPLAY)?;
    delay.delay_ms(COMMAND_PACING_MS);
    di.write_power_save(POWER_SAVE)?;
    delay.delay_ms(COMMAND_PACING_MS);

    di.set_tear_on(TearMode::Vblank)
        .inspect_err(|e| error!("Failed to set tear on: {}", e.code()))?;
    delay.delay_ms(COMMAND_PACING_MS);

    di.exit_sleep_mode()
        .inspect_err(|e| error!("Failed to exit sleep mode: {}", e.code()))?;
    delay.delay_ms(EXIT_SLEEP_SETTLE_MS);

    di.set_display_on()
        .inspect_err(|e| error!("Failed to set display on: {}", e.code()))?;
    delay.delay_ms(DISPLAY_ON_SETTLE_MS);

    Ok(())
}

/// Teardown script. Returns the first failure; the caller decides whether to go on.
pub fn power_off<DI, DELAY>(di: &mut DI, delay: &mut DELAY) -> Result<(), Error>
where
    DI: DsiInterface,
    DELAY: DelayNs,
{
    di.set_low_power(false);

    di.set_display_off()
        .inspect_err(|e| error!("Failed to set display off: {}", e.code()))?;
    delay.delay_ms(DISPLAY_OFF_SETTLE_MS);

    di.enter_sleep_mode()
        .inspect_err(|e| error!("Failed to enter sleep mode: {}", e.code()))?;
    delay.delay_ms(ENTER_SLEEP_SETTLE_MS);

    Ok(())
}
