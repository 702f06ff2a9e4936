//! Recording stand-ins for the DSI host, reset GPIO and delay.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::error::Error;
use crate::interface::{DsiConfig, DsiInterface, ModeFlags};
use crate::mode::{Connector, DisplayInfo, DisplayMode};

pub const EIO: i32 = -5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Generic(Vec<u8>),
    Dcs(Vec<u8>),
    Read(u8),
    Reset(bool),
    DelayMs(u32),
    DelayNs(u32),
}

/// Shared event log, one per test.
#[derive(Clone, Default)]
pub struct MockBus {
    log: Rc<RefCell<Vec<Event>>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dsi(&self) -> MockDsi {
        MockDsi {
            log: self.log.clone(),
            flags: ModeFlags::empty(),
            fail_on: None,
            fail_skip: 0,
            short_read: false,
            brightness: 0,
            attached: None,
            attach_error: None,
        }
    }

    pub fn pin(&self) -> MockPin {
        MockPin {
            log: self.log.clone(),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            log: self.log.clone(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }
}

pub struct MockDsi {
    log: Rc<RefCell<Vec<Event>>>,
    pub flags: ModeFlags,
    /// Fail the first transfer whose command byte matches.
    pub fail_on: Option<u8>,
    /// Matching transfers to let through before `fail_on` fires.
    pub fail_skip: usize,
    pub short_read: bool,
    /// Backing store for the brightness register.
    pub brightness: u16,
    pub attached: Option<DsiConfig>,
    pub attach_error: Option<Error>,
}

impl MockDsi {
    fn transfer(&mut self, command: u8, event: Event) -> Result<(), Error> {
        self.log.borrow_mut().push(event);
        if self.fail_on == Some(command) {
            if self.fail_skip > 0 {
                self.fail_skip -= 1;
                return Ok(());
            }
            self.fail_on = None;
            return Err(Error::Transport(EIO));
        }
        Ok(())
    }
}

impl DsiInterface for MockDsi {
    fn generic_write(&mut self, payload: &[u8]) -> Result<(), Error> {
        self.transfer(payload[0], Event::Generic(payload.to_vec()))
    }

    fn dcs_write(&mut self, command: u8, params: &[u8]) -> Result<(), Error> {
        let mut bytes = vec![command];
        bytes.extend_from_slice(params);
        self.transfer(command, Event::Dcs(bytes))?;
        if command == 0x51 {
            let mut raw = [0u8; 2];
            raw[..params.len()].copy_from_slice(params);
            self.brightness = u16::from_le_bytes(raw);
        }
        Ok(())
    }

    fn dcs_read(&mut self, command: u8, buf: &mut [u8]) -> Result<usize, Error> {
        self.transfer(command, Event::Read(command))?;
        if self.short_read {
            return Ok(0);
        }
        let raw = self.brightness.to_le_bytes();
        let n = buf.len().min(raw.len());
        buf[..n].copy_from_slice(&raw[..n]);
        Ok(n)
    }

    fn mode_flags(&self) -> ModeFlags {
        self.flags
    }

    fn set_mode_flags(&mut self, flags: ModeFlags) {
        self.flags = flags;
    }

    fn attach(&mut self, config: &DsiConfig) -> Result<(), Error> {
        if let Some(err) = self.attach_error {
            return Err(err);
        }
        self.attached = Some(*config);
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Error> {
        match self.attached.take() {
            Some(_) => Ok(()),
            None => Err(Error::Transport(EIO)),
        }
    }
}

pub struct MockPin {
    log: Rc<RefCell<Vec<Event>>>,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(Event::Reset(true));
        Ok(())
    }
}

pub struct MockDelay {
    log: Rc<RefCell<Vec<Event>>>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}

/// Connector with room for `capacity` modes.
pub struct MockConnector {
    pub modes: Vec<DisplayMode>,
    pub capacity: usize,
    pub info: DisplayInfo,
}

impl MockConnector {
    pub fn new(capacity: usize) -> Self {
        Self {
            modes: Vec::new(),
            capacity,
            info: DisplayInfo::default(),
        }
    }
}

impl Connector for MockConnector {
    fn add_mode(&mut self, mode: DisplayMode) -> Result<(), Error> {
        if self.modes.len() >= self.capacity {
            return Err(Error::OutOfMemory);
        }
        self.modes.push(mode);
        Ok(())
    }

    fn display_info_mut(&mut self) -> &mut DisplayInfo {
        &mut self.info
    }
}
