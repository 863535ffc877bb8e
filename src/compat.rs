//! Tool/package compatibility gate

use semver::{Version, VersionReq};

use crate::descriptor::Descriptor;
use crate::error::{Result, RolloutError};

/// Fail unless `tool_version` satisfies the range declared by `descriptor`
///
/// Packages without a declared range are always compatible.
pub fn check(tool_version: &str, descriptor: &Descriptor) -> Result<()> {
    let Some(range) = descriptor.compatibility.as_deref() else {
        return Ok(());
    };

    let req = VersionReq::parse(range).map_err(|e| RolloutError::InvalidCompatibilityRange {
        range: range.to_string(),
        reason: e.to_string(),
    })?;

    let satisfied = Version::parse(tool_version).is_ok_and(|version| req.matches(&version));

    if satisfied {
        Ok(())
    } else {
        Err(RolloutError::Incompatible {
            tool_version: tool_version.to_string(),
            range: range.to_string(),
        })
    }
}
