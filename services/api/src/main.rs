use atlas_admin_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("atlas admin error: {err}");
        std::process::exit(1);
    }
}
