pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::index)
        .service(health::health)
        .service(
            web::scope("/users")
                .service(users::sign_up)
                .service(users::sign_in)
                .service(users::me),
        )
        .service(
            web::scope("/tasks")
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::delete_task)
                .service(tasks::get_tasks)
                .service(tasks::get_task),
        );
}
