/// efimap kernel build script.
///
/// For the bare-metal target, make `kernel_main` the ELF entry symbol so a
/// loader can jump to it. Host builds (unit tests) are left alone.
fn main() {
    let target = std::env::var("TARGET").unwrap_or_default();
    if !target.ends_with("-none") {
        return;
    }

    println!("cargo:rustc-link-arg-bins=--entry=kernel_main");
    println!("cargo:rustc-link-arg-bins=-static");
    println!("cargo:rustc-link-arg-bins=--gc-sections");
    println!("cargo:rerun-if-changed=build.rs");
}
