use bizdesk_infra::run_migration;

#[actix_web::main]
async fn main() {
    println!("Starting migration");
    run_migration().await.expect("Expected migration to succeed");
    println!("Completed migration");
}
