mod cli;
mod infra;
mod load;
mod routes;
mod server;

use opennpl::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
