mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use profit_mix::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
