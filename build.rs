// SPDX-License-Identifier: MPL-2.0
//! Build script for compile-time configuration.
//!
//! The Unsplash access key may be baked into the binary through the
//! `UNSPLASH_ACCESS_KEY` environment variable at build time. Cargo does not
//! track `option_env!` inputs on its own, so the variable is declared here.

fn main() {
    println!("cargo:rerun-if-env-changed=UNSPLASH_ACCESS_KEY");
    println!("cargo:rerun-if-changed=assets/i18n");
}
