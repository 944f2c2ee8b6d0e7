#[cfg(any(target_arch = "wasm32", test))]
mod anchors;
#[cfg(any(target_arch = "wasm32", test))]
mod config;
#[cfg(any(target_arch = "wasm32", test))]
mod error;
#[cfg(any(target_arch = "wasm32", test))]
mod logging;
#[cfg(any(target_arch = "wasm32", test))]
mod metrics;
#[cfg(any(target_arch = "wasm32", test))]
mod reactions;
#[cfg(any(target_arch = "wasm32", test))]
mod reveal;
#[cfg(any(target_arch = "wasm32", test))]
mod ripple;
#[cfg(any(target_arch = "wasm32", test))]
mod shortcuts;
#[cfg(any(target_arch = "wasm32", test))]
mod skills;
#[cfg(any(target_arch = "wasm32", test))]
mod styles;
#[cfg(any(target_arch = "wasm32", test))]
mod timeline;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod landing;
#[cfg(target_arch = "wasm32")]
mod schedule;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
