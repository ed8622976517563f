use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use newsboard::error::json_config;
use newsboard::models::Task;
use newsboard::routes;
use newsboard::store::{InMemoryTaskStore, TaskRepository};
use pretty_assertions::assert_eq;
use serde_json::json;

async fn tasks_app(
    store: InMemoryTaskStore,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let tasks: Arc<dyn TaskRepository> = Arc::new(store);
    test::init_service(
        App::new()
            .app_data(web::Data::from(tasks))
            .app_data(json_config())
            .wrap(Logger::default())
            .configure(routes::tasks_config),
    )
    .await
}

async fn create(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    payload: serde_json::Value,
) -> Task {
    let req = test::TestRequest::post()
        .uri("/tasks")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}

#[actix_rt::test]
async fn test_server_is_up() {
    let app = tasks_app(InMemoryTaskStore::new()).await;
    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "Server is up");
}

#[actix_rt::test]
async fn test_task_crud_flow() {
    let app = tasks_app(InMemoryTaskStore::new()).await;

    // 1. Create
    let created = create(
        &app,
        json!({ "title": "A", "description": "B", "completed": false }),
    )
    .await;
    assert_eq!(
        created,
        Task {
            id: 1,
            title: "A".into(),
            description: "B".into(),
            completed: false,
        }
    );

    // 2. Get by id returns the same object
    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", created.id))
        .to_request();
    let fetched: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    // 3. Update everything
    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", created.id))
        .set_json(&json!({ "title": "A2", "description": "B2", "completed": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.title, "A2");
    assert_eq!(updated.description, "B2");
    assert!(updated.completed);

    // 4. List
    let second = create(
        &app,
        json!({ "title": "C", "description": "D", "completed": true }),
    )
    .await;
    let req = test::TestRequest::get().uri("/tasks").to_request();
    let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tasks, vec![updated.clone(), second.clone()]);

    // 5. Delete, then the task is gone
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());
}

#[actix_rt::test]
async fn test_deleted_ids_are_not_reused() {
    let app = tasks_app(InMemoryTaskStore::new()).await;

    let first = create(&app, json!({ "title": "1", "description": "x", "completed": false })).await;
    let second = create(&app, json!({ "title": "2", "description": "x", "completed": false })).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", first.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let third = create(&app, json!({ "title": "3", "description": "x", "completed": false })).await;
    assert_ne!(third.id, first.id);
    assert_ne!(third.id, second.id);

    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", second.id))
        .to_request();
    let still_there: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(still_there.title, "2");
}

#[actix_rt::test]
async fn test_partial_update_changes_only_supplied_fields() {
    let app = tasks_app(InMemoryTaskStore::new()).await;
    let created = create(
        &app,
        json!({ "title": "Write report", "description": "Quarterly", "completed": false }),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", created.id))
        .set_json(&json!({ "completed": true }))
        .to_request();
    let updated: Task = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        updated,
        Task {
            completed: true,
            ..created
        }
    );
}

#[actix_rt::test]
async fn test_invalid_create_inputs() {
    let app = tasks_app(InMemoryTaskStore::new()).await;

    let test_cases = vec![
        (json!({ "description": "B", "completed": false }), "missing title"),
        (json!({ "title": "A", "completed": false }), "missing description"),
        (json!({ "title": "", "description": "B", "completed": false }), "empty title"),
        (json!({ "title": "A", "description": "B" }), "missing completed"),
        (
            json!({ "title": "A", "description": "B", "completed": "no" }),
            "non-boolean completed",
        ),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            status,
            StatusCode::BAD_REQUEST,
            "Test case failed: {}. Body: {}",
            description,
            body
        );
        assert!(body["error"].is_string(), "{} should carry an error", description);
    }

    let req = test::TestRequest::get().uri("/tasks").to_request();
    let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert!(tasks.is_empty());
}

#[actix_rt::test]
async fn test_invalid_update_inputs() {
    let app = tasks_app(InMemoryTaskStore::new()).await;
    let created = create(&app, json!({ "title": "A", "description": "B", "completed": false })).await;

    for payload in [
        json!({ "title": "" }),
        json!({ "description": "" }),
        json!({ "completed": "yes" }),
        json!({ "title": null }),
        json!({ "description": null }),
        json!({ "completed": null }),
    ] {
        let req = test::TestRequest::put()
            .uri(&format!("/tasks/{}", created.id))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", created.id))
        .to_request();
    let unchanged: Task = test::call_and_read_body_json(&app, req).await;
    assert_eq!(unchanged, created);
}

#[actix_rt::test]
async fn test_unknown_ids() {
    let app = tasks_app(InMemoryTaskStore::new()).await;

    let req = test::TestRequest::get().uri("/tasks/42").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/tasks/not-a-number").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::delete().uri("/tasks/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::put()
        .uri("/tasks/abc")
        .set_json(&json!({ "title": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Task not found");

    let req = test::TestRequest::delete().uri("/tasks/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(test::read_body(resp).await.is_empty());

    let req = test::TestRequest::put()
        .uri("/tasks/42")
        .set_json(&json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Task not found");
}

#[actix_rt::test]
async fn test_seeded_tasks_are_listed_and_ids_continue() {
    let seeded = vec![
        Task {
            id: 1,
            title: "Seeded".into(),
            description: "From file".into(),
            completed: true,
        },
        Task {
            id: 2,
            title: "Seeded 2".into(),
            description: "From file".into(),
            completed: false,
        },
    ];
    let app = tasks_app(InMemoryTaskStore::with_tasks(seeded.clone())).await;

    let req = test::TestRequest::get().uri("/tasks").to_request();
    let tasks: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(tasks, seeded);

    let created = create(&app, json!({ "title": "New", "description": "x", "completed": false })).await;
    assert_eq!(created.id, 3);
}
