// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Application version APDUs
//!
//! The version (and app flags) reported here select the capability set used
//! when validating and sequencing a signing ceremony.

use core::{fmt, str::FromStr};

use encdec::{Decode, Encode};

use super::{apdu_frame, ApduError, ApduStatic, Instruction, ADA_APDU_CLA};

/// Fetch application version APDU
#[derive(Copy, Clone, PartialEq, Debug, Default, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct VersionReq;

impl ApduStatic for VersionReq {
    const CLA: u8 = ADA_APDU_CLA;
    const INS: u8 = Instruction::GetVersion as u8;
}

impl VersionReq {
    /// Expected response length
    pub const RESP_LEN: usize = 4;

    /// Build the raw APDU frame for this request
    pub fn to_apdu(&self) -> Result<Vec<u8>, ApduError> {
        apdu_frame(Self::CLA, Self::INS, 0x00, 0x00, &[])
    }
}

/// Application version response APDU
///
/// ## Encoding
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     MAJOR     |     MINOR     |     PATCH     |     FLAGS     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ApduError")]
pub struct VersionResp {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub flags: AppFlags,
}

impl VersionResp {
    /// Create a new version response
    pub fn new(version: Version, flags: AppFlags) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            flags,
        }
    }

    /// Fetch the semantic version from the response
    pub fn version(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }
}

bitflags::bitflags! {
    /// Application flags
    pub struct AppFlags: u8 {
        /// Application is a debug build
        const DEBUG = 1 << 0;

        /// Application is a reduced-size build without some features
        const APP_XS = 1 << 1;
    }
}

crate::encdec_bitflags!(AppFlags);

/// Application (firmware) version, ordered by `(major, minor, patch)`
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Parse a version from `MAJOR.MINOR[.PATCH]` notation
impl FromStr for Version {
    type Err = ApduError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.').map(u8::from_str);

        let major = match parts.next() {
            Some(Ok(v)) => v,
            _ => return Err(ApduError::InvalidEncoding),
        };
        let minor = match parts.next() {
            Some(Ok(v)) => v,
            _ => return Err(ApduError::InvalidEncoding),
        };
        let patch = match parts.next() {
            Some(Ok(v)) => v,
            None => 0,
            Some(Err(_)) => return Err(ApduError::InvalidEncoding),
        };

        if parts.next().is_some() {
            return Err(ApduError::InvalidEncoding);
        }

        Ok(Self::new(major, minor, patch))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::encode_decode_apdu;

    #[test]
    fn version_req_apdu() {
        let mut buff = [0u8; 16];
        let n = encode_decode_apdu(&mut buff, &VersionReq);
        assert_eq!(n, 0);

        let f = VersionReq.to_apdu().unwrap();
        assert_eq!(f, vec![0xd7, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn version_resp_apdu() {
        let apdu = VersionResp::new(Version::new(5, 0, 1), AppFlags::APP_XS);

        let mut buff = [0u8; 16];
        let n = encode_decode_apdu(&mut buff, &apdu);
        assert_eq!(n, VersionReq::RESP_LEN);
        assert_eq!(&buff[..n], &[5, 0, 1, 0x02]);
    }

    #[test]
    fn version_ordering() {
        assert!(Version::new(2, 2, 0) < Version::new(2, 3, 0));
        assert!(Version::new(2, 10, 0) > Version::new(2, 9, 9));
        assert!(Version::new(3, 0, 0) > Version::new(2, 255, 255));
    }

    #[test]
    fn version_parse() {
        assert_eq!("4.1.2".parse::<Version>().unwrap(), Version::new(4, 1, 2));
        assert_eq!("6.0".parse::<Version>().unwrap(), Version::new(6, 0, 0));
        assert!("6".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
        assert!("a.b.c".parse::<Version>().is_err());

        assert_eq!(Version::new(7, 1, 0).to_string(), "7.1.0");
    }
}
