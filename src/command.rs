//! DCS Command Table

/// The MIPI Display Command Set commands used by this panel.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DcsCommand {
    /// Enter the minimum power consumption mode.
    ///
    /// DC/DC converter, internal oscillator and panel scanning are stopped.
    EnterSleepMode = 0x10,
    /// Leave sleep mode.
    ///
    /// The controller needs 120ms before the next command.
    ExitSleepMode = 0x11,
    /// Stop showing frame memory content. The frame memory is kept.
    SetDisplayOff = 0x28,
    SetDisplayOn = 0x29,
    /// Turn on the tearing effect output.
    ///
    /// <<0:b7, M:b1>>
    SetTearOn = 0x35,
    /// <<DBV[7:0]:u8, DBV[15:8]:u8>>
    SetDisplayBrightness = 0x51,
    GetDisplayBrightness = 0x52,
    /// <<0:b2, BCTRL:b1, 0:b1, DD:b1, BL:b1, 0:b2>>
    WriteControlDisplay = 0x53,
    /// Content adaptive brightness control
    WritePowerSave = 0x55,
}

/// Tearing effect output line mode.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TearMode {
    /// V-Blanking information only
    Vblank = 0,
    /// Both V-Blanking and H-Blanking information
    VHblank = 1,
}
