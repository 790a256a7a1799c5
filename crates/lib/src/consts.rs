//! Fixed names shared across the crate.

/// Directory, relative to the project root, that receives every artifact.
pub const BUILD_DIR: &str = "build";

/// Optional dotfile with `KEY=VALUE` environment defaults.
pub const ENV_FILE: &str = "build.env";

/// Required file holding the project version.
pub const VERSION_FILE: &str = "VERSION";

/// Extension of relocatable object files, without the dot.
pub const OBJECT_EXT: &str = "o";

/// Compiler driver used for compiling and linking.
pub const CC: &str = "gcc";

/// Static archiver.
pub const AR: &str = "ar";

pub const ENV_GCC64: &str = "CPBUILDGCC64";
pub const ENV_GCC32: &str = "CPBUILDGCC32";
pub const ENV_BIT: &str = "CPBUILDBIT";
pub const ENV_SKIP_EXIST: &str = "CPBUILDSKIPEXIST";

/// Library sources, relative to the project root.
pub const SRC_DIR: &str = "src";

/// Launcher sources, relative to [`SRC_DIR`].
pub const LAUNCHER_DIR: &str = "cpc";

/// Directory name excluded from library source discovery at any depth.
pub const TEST_DIR: &str = "Test";

/// Source file extension, without the dot.
pub const SOURCE_EXT: &str = "c";
