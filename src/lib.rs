// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `SkyFi` Lib - A Rust library to control Daikin `SkyFi` ducted air
//! conditioners over their local HTTP API.
//!
//! The `SkyFi` WiFi adapter is a difficult peer: it tolerates about one
//! request per second, takes hundreds of milliseconds to answer, sometimes
//! returns stale or self-contradictory data, and silently drops some
//! writes. This library wraps it in a state synchronization engine so
//! callers get a simple, well-behaved device:
//!
//! - **Cached reads**: recently read state answers from memory; when the
//!   device stops responding, the last known good value is served instead
//!   of an error.
//! - **Coalesced writes**: rapid successive edits (a temperature slider
//!   being dragged, say) merge into a single device write issued after a
//!   short quiet period.
//! - **Verified writes**: every flushed write is checked against a re-read
//!   and retried when the device quietly ignored it.
//! - **Rate-limited transport**: all requests are serialized with a
//!   minimum gap, and transient failures retry with exponential backoff.
//!
//! # Quick Start
//!
//! ```no_run
//! use skyfi_lib::{Mode, SkyfiDevice};
//!
//! #[tokio::main]
//! async fn main() -> skyfi_lib::Result<()> {
//!     let device = SkyfiDevice::builder("192.168.1.40").build()?;
//!
//!     // Reads are cached and degrade gracefully.
//!     let state = device.state().await?;
//!     println!("currently {:.1}C, mode {}", state.current_temp, state.mode);
//!
//!     // Mutations are staged and flushed as one device write.
//!     device.set_mode(Mode::Cool).await?;
//!     device.set_cooling_temp(24.0).await?;
//!     device.set_fan_speed(3).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Zones
//!
//! Ducted units route air through named zones whose dampers open and close
//! individually. Zones are 1-indexed, matching the controller's own wall
//! panel:
//!
//! ```no_run
//! use skyfi_lib::SkyfiDevice;
//!
//! # async fn example() -> skyfi_lib::Result<()> {
//! let device = SkyfiDevice::builder("192.168.1.40").build()?;
//!
//! for (i, name) in device.zone_names().await?.iter().enumerate() {
//!     let open = device.zone_status(i + 1).await?;
//!     println!("zone {}: {} ({})", i + 1, name, if open { "open" } else { "closed" });
//! }
//!
//! device.set_zone_status(2, true).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Power Subscriptions
//!
//! Collaborators that derive their own state from the unit's power flag can
//! subscribe to accepted power mutations:
//!
//! ```no_run
//! use skyfi_lib::SkyfiDevice;
//!
//! # fn example() -> skyfi_lib::Result<()> {
//! let device = SkyfiDevice::builder("192.168.1.40").build()?;
//! device.on_power_changed(|on| println!("power: {on}"));
//! # Ok(())
//! # }
//! ```

mod device;
mod engine;
pub mod error;
mod protocol;
mod resource;
mod retry;
pub mod state;
mod subscription;
pub mod types;

pub use device::{SkyfiDevice, SkyfiDeviceBuilder};
pub use error::{Error, ProtocolError, Result, TransportError, ValueError};
pub use state::{AcModel, AcState, TempThreshold};
pub use subscription::SubscriptionId;
pub use types::{FanSpeed, Mode, ZoneSwitches};
