//! Concrete variants and the binary records expansion produces.

use std::fmt;
use std::path::PathBuf;

use crate::model::axes::{BuildType, Flavor, Platform};
use crate::model::component::BinaryKind;
use crate::naming::NamingScheme;

/// One concrete combination of axis values for a component, plus the kind
/// of binary built from it.
///
/// Two variants with equal axis tuples but distinct kinds are distinct
/// variants: a library's shared and static binaries share a tuple but are
/// separate artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Name of the component this variant belongs to
    pub component: String,
    /// Selected platform
    pub platform: Platform,
    /// Selected build type
    pub build_type: BuildType,
    /// Selected flavor
    pub flavor: Flavor,
    /// The binary kind built from this tuple
    pub kind: BinaryKind,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}:{}:{}:{}'",
            self.kind,
            self.component,
            self.platform.name(),
            self.build_type.name(),
            self.flavor.name()
        )
    }
}

/// A concrete build artifact implied by one variant.
///
/// Records are produced by expansion in a fixed order (platform, then build
/// type, then flavor, then kind) and collected per component. The output
/// path is derived purely from the expansion inputs:
/// `<buildOutputRoot>/binaries/<outputDirectoryBase>/<outputFileName>`.
/// Downstream incremental-build consumers rely on that exact convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRecord {
    /// The variant this binary is built from
    pub variant: Variant,
    /// Name of the toolchain resolved for the variant's platform
    pub toolchain: String,
    /// Naming scheme shared by all kinds of the variant's axis tuple
    pub naming: NamingScheme,
    /// Where the binary is produced, relative to the build output root
    pub output_path: PathBuf,
}

impl fmt::Display for BinaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variant)
    }
}
