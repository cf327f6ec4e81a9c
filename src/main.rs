use dotenvy::dotenv;

use vigia::cli;
use vigia::logging::init_tracing;
use vigia::router::init_router;
use vigia::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Check if this is a CLI command
    if args.len() > 1 && args[1] == "create-superadmin" {
        handle_create_superadmin(args).await;
        return;
    }

    // Normal server startup
    init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind server port");
    println!("🚀 Server running on http://localhost:{port}");
    println!("📚 Swagger UI available at http://localhost:{port}/swagger-ui");
    println!("📖 Scalar UI available at http://localhost:{port}/scalar");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}

async fn handle_create_superadmin(args: Vec<String>) {
    if args.len() != 5 {
        eprintln!("Usage: {} create-superadmin <name> <email> <password>", args[0]);
        std::process::exit(1);
    }

    let name = &args[2];
    let email = &args[3];
    let password = &args[4];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match cli::create_super_admin(&pool, name, email, password).await {
        Ok(id) => {
            println!("✅ Super admin created successfully!");
            println!("   Id: {}", id);
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("❌ Error creating super admin: {:?}", e);
            std::process::exit(1);
        }
    }
}
