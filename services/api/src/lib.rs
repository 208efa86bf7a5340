mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use hiring_guru::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
