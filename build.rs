fn main() {
    println!("cargo:rerun-if-env-changed=DR16_CONFIG_JSON");

    // Host builds (tests, fuzzing) never touch the ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
