// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Handle for connected ledger devices
//!
//! This provides methods for interacting with the Cardano application
//! and is generic over [ledger_lib::Exchange]

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use encdec::Decode;
use ledger_lib::Exchange;
use log::{debug, trace, warn};
use tokio::sync::Mutex;

use ledger_ada_apdu::{
    status::split_status,
    tx::{Message, OutputStep, PoolStep, Stage, SubStage, VotingStep},
    version::{AppFlags, Version, VersionReq, VersionResp},
    SW_OK,
};
use ledger_ada_core::{
    tx::{SignedTx, SigningRequest},
    Ceremony,
};

use crate::Error;

/// Default timeout for APDU requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Default timeout for requests awaiting on-device approval
pub const DEFAULT_USER_TIMEOUT: Duration = Duration::from_secs(30);

/// Cardano handle for a connected ledger device.
///
/// This is generic over [Exchange] types to support different
/// underlying transports / providers
pub struct DeviceHandle<T: Exchange> {
    /// Device handle for communication
    t: Arc<Mutex<T>>,
    /// Timeout for user acknowledgements
    user_timeout: Duration,
    /// Timeout for APDU requests
    request_timeout: Duration,
}

/// Create a [DeviceHandle] wrapper from a type implementing [Exchange]
impl<T: Exchange> From<T> for DeviceHandle<T> {
    fn from(t: T) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
            user_timeout: DEFAULT_USER_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl<T: Exchange> Clone for DeviceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            t: self.t.clone(),
            user_timeout: self.user_timeout,
            request_timeout: self.request_timeout,
        }
    }
}

impl<T: Exchange + Send> DeviceHandle<T> {
    /// Set the timeout for APDU requests
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the timeout for requests awaiting user approval
    pub fn with_user_timeout(mut self, timeout: Duration) -> Self {
        self.user_timeout = timeout;
        self
    }

    /// Fetch Cardano application version and flags
    pub async fn app_version(&self) -> Result<VersionResp, Error> {
        debug!("Requesting app version");

        let apdu = VersionReq.to_apdu()?;

        let mut t = self.t.lock().await;
        let resp = exchange(&mut *t, &apdu, self.request_timeout, false).await?;

        if resp.len() != VersionReq::RESP_LEN {
            return Err(Error::UnexpectedResponse);
        }

        let (v, _) = VersionResp::decode(&resp)?;

        debug!("App version: {} (flags: {:?})", v.version(), v.flags);

        Ok(v)
    }

    /// Sign a transaction, fetching the application version to select
    /// the capability set
    pub async fn sign_tx(&self, req: &SigningRequest) -> Result<SignedTx, Error> {
        let v = self.app_version().await?;

        self.sign_tx_with_version(&v.version(), v.flags, req).await
    }

    /// Sign a transaction against a known application version
    ///
    /// The device is held for the whole ceremony so concurrent callers
    /// sharing this handle cannot interleave messages.
    pub async fn sign_tx_with_version(
        &self,
        version: &Version,
        flags: AppFlags,
        req: &SigningRequest,
    ) -> Result<SignedTx, Error> {
        let mut c = Ceremony::new(version, flags, req)?;

        let mut t = self.t.lock().await;

        while let Some(m) = c.next_message()? {
            let user = awaits_user(&m);
            let timeout = match user {
                true => self.user_timeout,
                false => self.request_timeout,
            };

            let resp = exchange(&mut *t, &m.to_apdu()?, timeout, user).await?;

            c.resume(&resp)?;
        }

        let signed = c.finish()?;

        debug!(
            "Signed tx {} ({} witnesses)",
            hex::encode(signed.tx_hash),
            signed.witnesses.len()
        );

        Ok(signed)
    }
}

/// Check whether a message waits on on-device approval
fn awaits_user(m: &Message) -> bool {
    matches!(
        (m.stage, m.sub_stage),
        (Stage::Confirm, _)
            | (_, SubStage::Output(OutputStep::Confirm))
            | (_, SubStage::Pool(PoolStep::Confirm))
            | (_, SubStage::Voting(VotingStep::Confirm))
    )
}

/// Exchange a raw APDU, checking and stripping the status word
async fn exchange<T: Exchange + Send>(
    t: &mut T,
    apdu: &[u8],
    timeout: Duration,
    user: bool,
) -> Result<Vec<u8>, Error> {
    trace!("tx: {}", hex::encode(apdu));

    let resp = match tokio::time::timeout(timeout, t.exchange(apdu, timeout)).await {
        Ok(r) => r?,
        Err(_) if user => return Err(Error::UserTimeout),
        Err(e) => return Err(e.into()),
    };

    trace!("rx: {}", hex::encode(&resp));

    let (data, sw) = split_status(&resp).map_err(|_| Error::UnexpectedResponse)?;

    if sw != SW_OK {
        warn!("Device returned status 0x{sw:04x}");
        return Err(Error::from_status(sw));
    }

    Ok(data.to_vec())
}

/// Forward [Exchange] through the [DeviceHandle] lock
#[async_trait]
impl<T: Exchange + Send> Exchange for DeviceHandle<T> {
    async fn exchange(
        &mut self,
        command: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, ledger_lib::Error> {
        self.t.lock().await.exchange(command, timeout).await
    }
}
