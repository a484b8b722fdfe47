#[tokio::main]
async fn main() {
    dialplan_lsp::run().await;
}
