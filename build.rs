// SPDX-License-Identifier: Apache-2.0 OR MIT
fn main() {
    // `cargo tarpaulin` sets the `tarpaulin` cfg; the threaded dispatch tests
    // check it to skip timing-sensitive cases under instrumentation.
    println!("cargo:rustc-check-cfg=cfg(tarpaulin)");
}
