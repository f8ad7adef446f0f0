#[tokio::main]
async fn main() -> anyhow::Result<()> {
    translator_service_lib::run().await
}
