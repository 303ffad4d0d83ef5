use clap::{Parser, Subcommand};
use coursehub_cli::admin::create_admin;
use coursehub_cli::seeder::{self, SeedConfig};
use coursehub_config::DatabaseConfig;
use coursehub_db::{PgPool, init_db_pool, run_migrations};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coursehub-cli")]
#[command(about = "Coursehub CLI - Administrative tools for Coursehub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake courses, students and enrollments
    Seed {
        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "10")]
        courses: usize,

        /// Number of students to create (each gets a User account)
        #[arg(short = 's', long, default_value = "50")]
        students: usize,

        /// Maximum enrollments per student
        #[arg(long, default_value = "3")]
        enrollments: usize,
    },
    /// Clear all seeded data (keeps admins)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = connect().await;

    match cli.command {
        Commands::CreateAdmin { email, password } => {
            handle_create_admin(&pool, email, password).await
        }
        Commands::Seed {
            courses,
            students,
            enrollments,
        } => handle_seed(&pool, courses, students, enrollments).await,
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

async fn connect() -> PgPool {
    let config = match DatabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => fail("Invalid database configuration", e),
    };

    let pool = match init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => fail("Failed to connect to database", e),
    };

    if config.run_migrations {
        if let Err(e) = run_migrations(&pool).await {
            fail("Failed to run migrations", e);
        }
    }

    pool
}

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, error);
    std::process::exit(1);
}

async fn handle_create_admin(pool: &PgPool, email: Option<String>, password: Option<String>) {
    let email = match email {
        Some(email) => email,
        None => Input::<String>::new()
            .with_prompt("Email address")
            .interact_text()
            .unwrap_or_else(|e| fail("Failed to read email", e)),
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e)),
    };

    match create_admin(pool, &email, &password).await {
        Ok(id) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", email.trim());
            println!("   Id: {}", id);
        }
        Err(e) => fail("Error creating admin", e),
    }
}

async fn handle_seed(pool: &PgPool, courses: usize, students: usize, enrollments: usize) {
    let config = SeedConfig::new(courses, students).with_max_enrollments(enrollments);

    if let Err(e) = seeder::seed_all(pool, config).await {
        fail("Error seeding database", e);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        fail("Error clearing seeded data", e);
    }
}
