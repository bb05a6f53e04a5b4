use actix_web::{App, HttpServer, dev::Server, middleware, web};

use crate::config::ServerConfig;
use crate::judge::Judge;
use crate::routes::{health, json_error_handler, run_code_handler, submit_code_handler};

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_BIND_PORT: u16 = 12345;

pub fn build_server(server_config: ServerConfig, judge: Judge) -> std::io::Result<Server> {
    let judge = web::Data::new(judge);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(judge.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(middleware::Logger::default())
            .service(run_code_handler)
            .service(submit_code_handler)
            .service(health)
    })
    .bind((
        server_config
            .bind_address
            .unwrap_or(DEFAULT_BIND_ADDRESS.to_string()),
        server_config.bind_port.unwrap_or(DEFAULT_BIND_PORT),
    ))?
    .run();

    Ok(server)
}
