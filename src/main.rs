#[actix_web::main]
async fn main() {
    if let Err(e) = age_duel_lib::run().await {
        tracing::error!("Age Duel stopped: {}", e);
        std::process::exit(1);
    }
}
