#[tokio::main]
async fn main() {
    if let Err(e) = docfield::run().await {
        eprintln!("docfield: {e}");
        std::process::exit(1);
    }
}
