fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host-side test builds run with `--no-default-features` and have no
    // ESP-IDF toolchain to describe.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
