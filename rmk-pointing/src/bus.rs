//! Shared I2C bus access for pointing device modules.
//!
//! Several modules may talk to peripherals on the same physical bus. Every transaction
//! goes through [`SharedBus::acquire`], which hands out a [`BusTransaction`] guard. The
//! bus is released when the guard is dropped, so a failed transfer can never leave the
//! bus locked.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_async::i2c::I2c;

/// Error reported by the underlying bus transport (NACK, timeout, arbitration loss...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusError {
    /// Address of the peripheral the failed transaction was sent to
    pub address: u8,
    /// Error kind reported by the bus
    pub kind: ErrorKind,
}

impl BusError {
    fn from_transport<E: embedded_hal::i2c::Error>(address: u8, err: E) -> Self {
        Self {
            address,
            kind: err.kind(),
        }
    }
}

/// A bus shared by all modules which address peripherals on it.
pub struct SharedBus<M: RawMutex, BUS> {
    bus: Mutex<M, BUS>,
}

impl<M: RawMutex, BUS: I2c> SharedBus<M, BUS> {
    pub const fn new(bus: BUS) -> Self {
        Self { bus: Mutex::new(bus) }
    }

    /// Wait until the bus is free and take exclusive access to it.
    pub async fn acquire(&self) -> BusTransaction<'_, M, BUS> {
        BusTransaction {
            bus: self.bus.lock().await,
        }
    }

    /// Take exclusive access to the bus if nobody else holds it.
    pub fn try_acquire(&self) -> Option<BusTransaction<'_, M, BUS>> {
        self.bus.try_lock().ok().map(|bus| BusTransaction { bus })
    }

    /// Consume the shared bus and give back the raw bus.
    pub fn into_inner(self) -> BUS {
        self.bus.into_inner()
    }
}

/// Exclusive access to a [`SharedBus`], released on drop.
pub struct BusTransaction<'a, M: RawMutex, BUS> {
    bus: MutexGuard<'a, M, BUS>,
}

impl<M: RawMutex, BUS: I2c> BusTransaction<'_, M, BUS> {
    /// Write `write` to `address` and read `read.len()` bytes back in one bus transaction.
    pub async fn write_then_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), BusError> {
        self.bus
            .write_read(address, write, read)
            .await
            .map_err(|e| BusError::from_transport(address, e))
    }

    /// Plain write to `address`.
    pub async fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), BusError> {
        self.bus
            .write(address, bytes)
            .await
            .map_err(|e| BusError::from_transport(address, e))
    }
}

/// A peripheral at a fixed address on a [`SharedBus`].
///
/// Each call acquires the bus, runs exactly one transaction and releases the bus again.
pub struct BusDevice<'a, M: RawMutex, BUS> {
    bus: &'a SharedBus<M, BUS>,
    address: u8,
}

impl<'a, M: RawMutex, BUS: I2c> BusDevice<'a, M, BUS> {
    pub const fn new(bus: &'a SharedBus<M, BUS>, address: u8) -> Self {
        Self { bus, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub async fn write_then_read(&self, write: &[u8], read: &mut [u8]) -> Result<(), BusError> {
        let mut transaction = self.bus.acquire().await;
        transaction.write_then_read(self.address, write, read).await
    }

    pub async fn write(&self, bytes: &[u8]) -> Result<(), BusError> {
        let mut transaction = self.bus.acquire().await;
        transaction.write(self.address, bytes).await
    }
}
