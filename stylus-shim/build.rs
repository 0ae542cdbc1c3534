// stylus-shim/build.rs
//
// The engine symbols come from libstylus. With STYLUS_LIB_DIR set we link it
// directly; otherwise the cdylib leaves them for the loader to resolve.

use std::env;
use std::path::PathBuf;

const LIB_DIR_ENV: &str = "STYLUS_LIB_DIR";

fn main() {
    println!("cargo:rerun-if-env-changed={LIB_DIR_ENV}");
    println!("cargo:rerun-if-changed=build.rs");

    if let Some(dir) = env::var_os(LIB_DIR_ENV) {
        let dir = PathBuf::from(dir);
        if !dir.is_dir() {
            println!(
                "cargo:warning=build.rs: {LIB_DIR_ENV}={} is not a directory",
                dir.display()
            );
        }
        println!("cargo:rustc-link-search=native={}", dir.display());
        println!("cargo:rustc-link-lib=dylib=stylus");
    }

    // ld64 rejects undefined symbols in dylibs unless told otherwise.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("macos") {
        println!("cargo:rustc-cdylib-link-arg=-Wl,-undefined,dynamic_lookup");
    }
}
