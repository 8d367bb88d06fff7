/// Builder constants
pub mod builder {
    /// Default buildx builder instance name
    pub const DEFAULT_NAME: &str = "archbake-builder";
}

/// Container image tag constants
pub mod tag {
    /// Tag applied to assembled manifest lists
    pub const LATEST: &str = "latest";

    /// Suffix marking the predownloaded image variant
    pub const PREDOWNLOADED: &str = "predownloaded";
}

/// Registry constants
pub mod registry {
    /// Username used for image references that never leave the machine
    pub const DEFAULT_USERNAME: &str = "local";
}

/// External tool constants
pub mod docker {
    /// Default docker binary name, resolved via PATH
    pub const DEFAULT_BINARY: &str = "docker";
}

/// Release pipeline constants
pub mod release {
    /// Default version built and pushed by `archbake release`
    pub const DEFAULT_VERSION: &str = "1.4.22";

    /// Build-arg carrying the version into the Dockerfile
    pub const VERSION_BUILD_ARG: &str = "VERSION";
}
