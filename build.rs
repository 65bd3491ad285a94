//! Build script for dupescan
//!
//! This build script handles platform-specific configuration:
//! - Windows: Embeds the application manifest for long path support (>260 chars)
//!
//! # Windows Long Path Support
//!
//! By default, Windows limits file paths to 260 characters (MAX_PATH).
//! This causes issues when scanning directories like `node_modules` that
//! often have deeply nested paths exceeding this limit.
//!
//! The manifest file (`dupescan.manifest`) includes `longPathAware=true`
//! which, combined with the Windows 10 v1607+ registry setting, enables
//! paths up to 32,767 characters.

fn main() {
    // Only compile and embed the manifest on Windows
    #[cfg(windows)]
    {
        // The .rc file uses RT_MANIFEST resource type to embed the XML manifest
        embed_resource::compile("dupescan.rc", embed_resource::NONE);

        println!("cargo:rerun-if-changed=dupescan.rc");
        println!("cargo:rerun-if-changed=dupescan.manifest");
    }

    // On non-Windows platforms, nothing to embed
    #[cfg(not(windows))]
    {}
}
