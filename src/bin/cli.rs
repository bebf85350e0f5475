use clap::{Parser, Subcommand};
use classtrack::cli::seeder::{clear_seeded_data, seed_database};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "classtrack-cli")]
#[command(about = "ClassTrack CLI - Administrative tools for ClassTrack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with the default roles and known users
    Seed,
    /// Remove the seeded users (roles are kept)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let result = match cli.command {
        Commands::Seed => seed_database(&pool).await,
        Commands::ClearSeed => clear_seeded_data(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
