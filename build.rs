fn main() {
    // ESP-IDF sysenv propagation only matters when building for the device
    // target; host builds (tests, fuzzing) skip it.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
