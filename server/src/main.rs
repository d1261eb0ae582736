use std::io;

use todo_server_lib::ServerConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    todo_server_lib::init_tracing();

    let config = ServerConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Bad configuration");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    todo_server_lib::run(config).await
}
