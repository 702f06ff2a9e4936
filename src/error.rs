use core::fmt;

const ENOMEM: i32 = 12;
const EINVAL: i32 = 22;
const ENODATA: i32 = 61;

/// Errors reported by the panel driver and its command interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The DSI host failed a transfer. Carries the host's error code.
    Transport(i32),
    /// A DCS read completed without returning any bytes.
    NoData,
    /// A DCS write was requested without a command byte.
    InvalidPayload,
    /// Requested brightness is above the backlight's maximum.
    InvalidBrightness(u16),
    /// The mode registry could not store another mode.
    OutOfMemory,
}

impl Error {
    /// Negative errno-style code, as used in log lines.
    pub const fn code(&self) -> i32 {
        match *self {
            Error::Transport(code) => code,
            Error::NoData => -ENODATA,
            Error::InvalidPayload | Error::InvalidBrightness(_) => -EINVAL,
            Error::OutOfMemory => -ENOMEM,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(code) => write!(f, "DSI transfer failed: {}", code),
            Error::NoData => f.write_str("DCS read returned no data"),
            Error::InvalidPayload => f.write_str("empty DCS payload"),
            Error::InvalidBrightness(value) => write!(f, "brightness {} out of range", value),
            Error::OutOfMemory => f.write_str("out of memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn codes_are_negative_errno() {
        assert_eq!(Error::Transport(-5).code(), -5);
        assert_eq!(Error::NoData.code(), -61);
        assert_eq!(Error::InvalidBrightness(300).code(), -22);
        assert_eq!(Error::OutOfMemory.code(), -12);
    }

    #[test]
    fn display_format() {
        assert_eq!(Error::Transport(-110).to_string(), "DSI transfer failed: -110");
        assert_eq!(
            Error::InvalidBrightness(256).to_string(),
            "brightness 256 out of range"
        );
    }
}
