#[tokio::main]
async fn main() {
    // Startup failures are already logged by the server bootstrap.
    if omero_proxy::start().await.is_err() {
        std::process::exit(1);
    }
}
