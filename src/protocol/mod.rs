// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device protocol plumbing: the `key=value` wire codec and the
//! rate-limited HTTP transport.

mod transport;
pub(crate) mod wire;

pub(crate) use transport::Transport;
