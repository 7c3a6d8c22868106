// crates/devdesc-rs/src/profile.rs

//! Format tag and the union of both profile families.

use crate::diagnostic::Diagnostic;
use crate::eds::EdsProfile;
use crate::iodd::DeviceProfile;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// The two supported description formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "IODD")]
    Iodd,
    #[serde(rename = "EDS")]
    Eds,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Iodd => "IODD",
            FileType::Eds => "EDS",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a file type tag is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownFileType;

impl fmt::Display for UnknownFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown file type (expected IODD or EDS)")
    }
}

impl FromStr for FileType {
    type Err = UnknownFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("iodd") || s.eq_ignore_ascii_case("xml") {
            Ok(FileType::Iodd)
        } else if s.eq_ignore_ascii_case("eds") {
            Ok(FileType::Eds)
        } else {
            Err(UnknownFileType)
        }
    }
}

/// A parsed profile of either family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Profile {
    Iodd(DeviceProfile),
    Eds(EdsProfile),
}

impl Profile {
    pub fn file_type(&self) -> FileType {
        match self {
            Profile::Iodd(_) => FileType::Iodd,
            Profile::Eds(_) => FileType::Eds,
        }
    }

    /// Diagnostics collected while parsing this profile.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Profile::Iodd(p) => &p.diagnostics,
            Profile::Eds(p) => &p.diagnostics,
        }
    }
}

impl From<DeviceProfile> for Profile {
    fn from(p: DeviceProfile) -> Self {
        Profile::Iodd(p)
    }
}

impl From<EdsProfile> for Profile {
    fn from(p: EdsProfile) -> Self {
        Profile::Eds(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_str() {
        assert_eq!("IODD".parse::<FileType>(), Ok(FileType::Iodd));
        assert_eq!("eds".parse::<FileType>(), Ok(FileType::Eds));
        assert_eq!("gsd".parse::<FileType>(), Err(UnknownFileType));
    }

    #[test]
    fn test_profile_file_type() {
        let p: Profile = EdsProfile::default().into();
        assert_eq!(p.file_type(), FileType::Eds);
        assert!(p.diagnostics().is_empty());
    }
}
