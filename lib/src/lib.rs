// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Ledger Cardano API Library
//!
//! Provides a [DeviceHandle] for executing transaction signing ceremonies
//! against a connected device over any [ledger_lib::Exchange] transport.
//!
//! ```no_run
//! # async fn sign<T: ledger_ada::Exchange + Send>(t: T) -> Result<(), ledger_ada::Error> {
//! use ledger_ada::{tx::SigningRequest, DeviceHandle};
//!
//! let d = DeviceHandle::from(t);
//!
//! let v = d.app_version().await?;
//! println!("Cardano app {}", v.version());
//!
//! let signed = d.sign_tx(&SigningRequest::default()).await?;
//! println!("tx hash: {}", hex::encode(signed.tx_hash));
//! # Ok(())
//! # }
//! ```

pub use ledger_lib::Exchange;

/// Re-export `ledger-ada-apdu` for consumers
pub use ledger_ada_apdu::{self as apdu};

/// Re-export transaction model and ceremony from `ledger-ada-core`
pub use ledger_ada_core::{tx, Bip32Path, Ceremony};

mod handle;
pub use handle::DeviceHandle;

mod error;
pub use error::Error;
