// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for Daikin `SkyFi` units.
//!
//! A [`SkyfiDevice`] fronts the synchronization engine with the operations
//! accessory-facing callers actually use: snapshot reads, fire-and-forget
//! mutations, zone switches and power subscriptions.
//!
//! # Read/Write Behavior
//!
//! Reads are served from a short-lived cache where possible and degrade to
//! the last known good value when the controller misbehaves, so once a
//! value has been seen a read keeps succeeding. Mutations are staged
//! locally, coalesced over a quiet window into a single device write, then
//! verified in the background; their eventual outcome is only observable
//! through later reads.
//!
//! ```no_run
//! use skyfi_lib::{Mode, SkyfiDevice};
//!
//! # async fn example() -> skyfi_lib::Result<()> {
//! let device = SkyfiDevice::builder("192.168.1.40").build()?;
//!
//! device.set_mode(Mode::Cool).await?;
//! device.set_cooling_temp(24.0).await?;
//!
//! let state = device.state().await?;
//! println!("{} at {:.1}C", state.mode, state.current_temp);
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::SkyfiDeviceBuilder;

use std::sync::Arc;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::state::{AcModel, AcState, TempThreshold};
use crate::subscription::{CallbackRegistry, SubscriptionId};
use crate::types::{FanSpeed, Mode};

/// A Daikin `SkyFi` ducted air conditioner.
///
/// Create one with [`SkyfiDevice::builder`]. All methods take `&self`; the
/// device can be shared across tasks behind an `Arc`.
#[derive(Debug)]
pub struct SkyfiDevice {
    engine: Arc<Engine>,
    callbacks: CallbackRegistry,
    /// Serial substitute for adapters that report no MAC, stable for the
    /// lifetime of this instance.
    fallback_serial: String,
}

impl SkyfiDevice {
    /// Creates a builder for the unit at the given host.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use skyfi_lib::SkyfiDevice;
    ///
    /// # fn example() -> skyfi_lib::Result<()> {
    /// let device = SkyfiDevice::builder("192.168.1.40").build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn builder(host: impl Into<String>) -> SkyfiDeviceBuilder {
        SkyfiDeviceBuilder::new(host)
    }

    pub(crate) fn new(engine: Engine, callbacks: CallbackRegistry, fallback_serial: String) -> Self {
        Self {
            engine: Arc::new(engine),
            callbacks,
            fallback_serial,
        }
    }

    // ========== Reads ==========

    /// Returns the unit's operating state.
    ///
    /// While a mutation is pending this reflects the intended state, not
    /// what the device last confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] only before the first successful read
    /// of the underlying resources.
    pub async fn state(&self) -> Result<AcState> {
        let control = self.engine.read_control(true).await?;
        let sensor = self.engine.read_sensor(true).await?;
        Ok(AcState::project(&control, &sensor))
    }

    /// Returns the indoor temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] only before the first successful
    /// sensor read.
    pub async fn current_temperature(&self) -> Result<f64> {
        Ok(self.engine.read_sensor(true).await?.htemp)
    }

    /// Returns the unit's identity and temperature limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] only before the first successful read
    /// of the underlying resources.
    pub async fn model(&self) -> Result<AcModel> {
        let basic = self.engine.read_basic(true).await?;
        let model = self.engine.read_model(true).await?;
        Ok(AcModel::project(&basic, &model, &self.fallback_serial))
    }

    /// Returns the accepted cooling target range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] only before the first successful
    /// model read.
    pub async fn cooling_threshold(&self) -> Result<TempThreshold> {
        let model = self.engine.read_model(true).await?;
        Ok(TempThreshold {
            min: model.cool_low,
            max: model.cool_high,
        })
    }

    /// Returns the accepted heating target range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] only before the first successful
    /// model read.
    pub async fn heating_threshold(&self) -> Result<TempThreshold> {
        let model = self.engine.read_model(true).await?;
        Ok(TempThreshold {
            min: model.heat_low,
            max: model.heat_high,
        })
    }

    /// Returns the zone display names, in zone order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] only before the first successful
    /// zone read.
    pub async fn zone_names(&self) -> Result<Vec<String>> {
        Ok(self.engine.read_zone(true).await?.names)
    }

    /// Returns whether a zone's damper is open (zones are 1-indexed).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] before the first successful zone
    /// read, or a [`ValueError`](crate::error::ValueError) for a zone the
    /// device does not have.
    pub async fn zone_status(&self, zone: usize) -> Result<bool> {
        let info = self.engine.read_zone(true).await?;
        Ok(info.switches.get(zone)?)
    }

    // ========== Mutations ==========
    //
    // All of these stage an edit and return; the device write happens after
    // the coalescing window, in the background. The only error a caller can
    // see is failing to obtain a baseline to edit.

    /// Switches the unit on or off.
    ///
    /// Power subscribers are notified synchronously once the edit is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns an error when no baseline state could be obtained.
    pub async fn set_power(&self, on: bool) -> Result<()> {
        Arc::clone(&self.engine)
            .mutate(
                |engine| &engine.control,
                |control| {
                    control.set_power(on);
                    Ok(())
                },
            )
            .await?;
        self.callbacks.dispatch_power(on);
        Ok(())
    }

    /// Sets the operating mode.
    ///
    /// Switching to heat or cool also snaps the active target temperature
    /// to the stored per-mode target, the way the unit's own remote does.
    ///
    /// # Errors
    ///
    /// Returns an error when no baseline state could be obtained.
    pub async fn set_mode(&self, mode: Mode) -> Result<()> {
        Arc::clone(&self.engine)
            .mutate(
                |engine| &engine.control,
                move |control| {
                    control.set_mode(mode);
                    Ok(())
                },
            )
            .await
    }

    /// Sets the heating target temperature.
    ///
    /// # Errors
    ///
    /// Returns an error when no baseline state could be obtained.
    pub async fn set_heating_temp(&self, temp: f64) -> Result<()> {
        Arc::clone(&self.engine)
            .mutate(
                |engine| &engine.control,
                move |control| {
                    control.set_heating_temp(temp);
                    Ok(())
                },
            )
            .await
    }

    /// Sets the cooling target temperature.
    ///
    /// # Errors
    ///
    /// Returns an error when no baseline state could be obtained.
    pub async fn set_cooling_temp(&self, temp: f64) -> Result<()> {
        Arc::clone(&self.engine)
            .mutate(
                |engine| &engine.control,
                move |control| {
                    control.set_cooling_temp(temp);
                    Ok(())
                },
            )
            .await
    }

    /// Sets the fan speed: 1-5, or [`FanSpeed::AIRSIDE`] to hand the fan to
    /// the airside economizer.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`](crate::error::ValueError) for other speeds,
    /// or an error when no baseline state could be obtained.
    pub async fn set_fan_speed(&self, speed: u8) -> Result<()> {
        let speed = FanSpeed::new(speed).map_err(Error::Value)?;
        Arc::clone(&self.engine)
            .mutate(
                |engine| &engine.control,
                move |control| {
                    control.set_fan_speed(speed);
                    Ok(())
                },
            )
            .await
    }

    /// Enables or disables automatic fan control.
    ///
    /// # Errors
    ///
    /// Returns an error when no baseline state could be obtained.
    pub async fn set_fan_auto(&self, auto: bool) -> Result<()> {
        Arc::clone(&self.engine)
            .mutate(
                |engine| &engine.control,
                move |control| {
                    control.set_fan_auto(auto);
                    Ok(())
                },
            )
            .await
    }

    /// Opens or closes a zone's damper (zones are 1-indexed).
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`](crate::error::ValueError) for a zone the
    /// device does not have, or an error when no baseline state could be
    /// obtained.
    pub async fn set_zone_status(&self, zone: usize, active: bool) -> Result<()> {
        Arc::clone(&self.engine)
            .mutate(
                |engine| &engine.zone,
                move |info| info.switches.set(zone, active),
            )
            .await
    }

    // ========== Subscriptions ==========

    /// Registers a callback fired synchronously whenever a power mutation
    /// is accepted.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use skyfi_lib::SkyfiDevice;
    ///
    /// # fn example() -> skyfi_lib::Result<()> {
    /// let device = SkyfiDevice::builder("192.168.1.40").build()?;
    /// let id = device.on_power_changed(|on| {
    ///     println!("power is now {}", if on { "on" } else { "off" });
    /// });
    /// device.unsubscribe(id);
    /// # Ok(())
    /// # }
    /// ```
    pub fn on_power_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.callbacks.on_power_changed(callback)
    }

    /// Removes a subscription. Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }
}
