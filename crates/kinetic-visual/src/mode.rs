//! Depth visualization mode flags

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// How the depth visualization is drawn
///
/// `NORMAL` is linear grayscale with no tint and no joints.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DepthImageMode(pub u8);

impl DepthImageMode {
    pub const NORMAL: DepthImageMode = DepthImageMode(0);
    /// Intensity wraps every 255 mm instead of stretching over the range
    pub const WRAPPED: DepthImageMode = DepthImageMode(0x01);
    /// Tint pixels by player
    pub const USER_COLOR: DepthImageMode = DepthImageMode(0x02);
    /// Draw the active player's joints
    pub const INCLUDE_JOINTS: DepthImageMode = DepthImageMode(0x04);

    #[inline]
    pub fn contains(self, other: DepthImageMode) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_wrapped(self) -> bool {
        self.contains(Self::WRAPPED)
    }

    #[inline]
    pub fn user_color(self) -> bool {
        self.contains(Self::USER_COLOR)
    }

    #[inline]
    pub fn include_joints(self) -> bool {
        self.contains(Self::INCLUDE_JOINTS)
    }
}

impl BitOr for DepthImageMode {
    type Output = DepthImageMode;

    fn bitor(self, rhs: DepthImageMode) -> DepthImageMode {
        DepthImageMode(self.0 | rhs.0)
    }
}

impl BitOrAssign for DepthImageMode {
    fn bitor_assign(&mut self, rhs: DepthImageMode) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for DepthImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "Normal");
        }
        let names = [
            (Self::WRAPPED, "Wrapped"),
            (Self::USER_COLOR, "UserColor"),
            (Self::INCLUDE_JOINTS, "IncludeJoints"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", set.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mode = DepthImageMode::WRAPPED | DepthImageMode::INCLUDE_JOINTS;
        assert!(mode.is_wrapped());
        assert!(!mode.user_color());
        assert!(mode.include_joints());
        assert_eq!(format!("{:?}", mode), "Wrapped | IncludeJoints");
        assert_eq!(format!("{:?}", DepthImageMode::NORMAL), "Normal");
    }
}
