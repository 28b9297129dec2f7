mod repos;
mod telemetry;

#[cfg(any(target_arch = "wasm32", test))]
mod content;
#[cfg(any(target_arch = "wasm32", test))]
mod motion;
#[cfg(any(target_arch = "wasm32", test))]
mod page;
#[cfg(any(target_arch = "wasm32", test))]
mod press;
#[cfg(any(target_arch = "wasm32", test))]
mod projects;
#[cfg(any(target_arch = "wasm32", test))]
mod toast;

#[cfg(not(target_arch = "wasm32"))]
mod backend;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    backend::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
