use clap::Args;
use shopfront_app::{
    database,
    domain::users::{PgUsersService, UsersService, data::NewUser},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Unique login name
    #[arg(long)]
    username: String,

    /// Plaintext password; stored as a bcrypt hash
    #[arg(long, env = "SHOPFRONT_USER_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,

    /// Grant staff rights (may delete any user)
    #[arg(long)]
    staff: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.username.trim().is_empty() {
        return Err("username cannot be empty".to_string());
    }

    if args.password.is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(pool)
        .create_user(NewUser {
            username: args.username,
            password: args.password,
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
            is_staff: args.staff,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);
    println!("is_staff: {}", user.is_staff);

    Ok(())
}
