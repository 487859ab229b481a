mod cli;
mod infra;
mod recommend;
mod routes;
mod server;

use card_rewards::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
