//! Handler Tests
//!
//! Full route table, with session cookies, against an in-memory database.

#[cfg(test)]
mod tests {
    use actix_web::cookie::{Cookie, Key};
    use actix_web::dev::ServiceResponse;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use std::path::Path;

    use crate::handlers::api::TaskDto;
    use crate::handlers::config;
    use crate::repository::init_db;
    use crate::{session_middleware, AppState};

    fn app_state() -> web::Data<AppState> {
        let conn = init_db(Path::new(":memory:")).expect("Failed to init test DB");
        web::Data::new(AppState::new(conn))
    }

    fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
        resp.response()
            .cookies()
            .find(|c| c.name() == "id")
            .map(|c| c.into_owned())
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(config)
                    .wrap(session_middleware(Key::generate())),
            )
            .await
        };
    }

    /// Register `$name` and return the session cookie it leaves behind
    macro_rules! sign_up {
        ($app:expr, $name:expr) => {{
            let req = test::TestRequest::post()
                .uri("/register")
                .set_form([("username", $name), ("password", "hunter2")])
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            session_cookie(&resp).expect("No session cookie after register")
        }};
    }

    macro_rules! add_task {
        ($app:expr, $cookie:expr, $content:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/add")
                .cookie($cookie.clone())
                .set_json(json!({ "content": $content }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            assert_eq!(body["result"], "success");
            body["id"].as_u64().unwrap()
        }};
    }

    macro_rules! list_tasks {
        ($app:expr, $cookie:expr) => {{
            let req = test::TestRequest::get()
                .uri("/api/tasks")
                .cookie($cookie.clone())
                .to_request();
            let tasks: Vec<TaskDto> = test::call_and_read_body_json(&$app, req).await;
            tasks
        }};
    }

    #[actix_web::test]
    async fn test_add_returns_success_receipt() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/api/add")
            .cookie(cookie)
            .set_json(json!({ "content": "Buy milk" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["result"], "success");
        assert_eq!(body["content"], "Buy milk");
        assert!(body["id"].as_u64().unwrap() > 0);
        // YYYY-MM-DD
        let date = body["date"].as_str().unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
    }

    #[actix_web::test]
    async fn test_added_task_is_listed() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");

        let first = add_task!(app, cookie, "first");
        let second = add_task!(app, cookie, "");

        let tasks = list_tasks!(app, cookie);
        let contents: Vec<&str> = tasks.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["first", ""]);
        assert_eq!(tasks[0].id as u64, first);
        assert!(first < second);
    }

    #[actix_web::test]
    async fn test_add_without_session_is_error_receipt() {
        let state = app_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/add")
            .set_json(json!({ "content": "Sneaky" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["result"], "error");
        assert!(body["message"].as_str().unwrap().contains("not logged in"));

        // Nothing was stored for anyone
        let cookie = sign_up!(app, "alice");
        assert!(list_tasks!(app, cookie).is_empty());
    }

    #[actix_web::test]
    async fn test_list_without_session_is_unauthorized() {
        let state = app_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/tasks").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_row_actions_without_session_go_to_login() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");
        let id = add_task!(app, cookie, "Keep me");

        for req in [
            test::TestRequest::get().uri(&format!("/delete/{}", id)).to_request(),
            test::TestRequest::get().uri(&format!("/update/{}", id)).to_request(),
            test::TestRequest::post()
                .uri(&format!("/update/{}", id))
                .set_form([("content", "Defaced")])
                .to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
        }

        let tasks = list_tasks!(app, cookie);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].content, "Keep me");
    }

    #[actix_web::test]
    async fn test_users_only_see_their_own_tasks() {
        let state = app_state();
        let app = test_app!(state);
        let alice = sign_up!(app, "alice");
        let bob = sign_up!(app, "bob");

        let alices = add_task!(app, alice, "alice's");
        add_task!(app, bob, "bob's");

        let seen: Vec<String> = list_tasks!(app, bob).into_iter().map(|t| t.content).collect();
        assert_eq!(seen, vec!["bob's"]);

        let req = test::TestRequest::get()
            .uri(&format!("/delete/{}", alices))
            .cookie(bob.clone())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri(&format!("/update/{}", alices))
            .cookie(bob.clone())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/update/{}", alices))
            .cookie(bob.clone())
            .set_form([("content", "bob was here")])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let seen: Vec<String> = list_tasks!(app, alice).into_iter().map(|t| t.content).collect();
        assert_eq!(seen, vec!["alice's"]);
    }

    #[actix_web::test]
    async fn test_login_and_logout() {
        let state = app_state();
        let app = test_app!(state);
        let first = sign_up!(app, "alice");
        add_task!(app, first, "persisted");

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "hunter2")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
        let cookie = session_cookie(&resp).expect("No session cookie after login");

        assert_eq!(list_tasks!(app, cookie)[0].content, "persisted");

        let req = test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");
        let cleared = session_cookie(&resp).expect("Logout should clear the cookie");
        assert_eq!(cleared.value(), "");
    }

    #[actix_web::test]
    async fn test_login_rejects_bad_credentials() {
        let state = app_state();
        let app = test_app!(state);
        sign_up!(app, "alice");

        for (username, password) in [("alice", "wrong"), ("nobody", "hunter2")] {
            let req = test::TestRequest::post()
                .uri("/login")
                .set_form([("username", username), ("password", password)])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            assert!(session_cookie(&resp).is_none());

            let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
            assert!(html.contains("Invalid username or password"));
        }
    }

    #[actix_web::test]
    async fn test_register_rejects_taken_username() {
        let state = app_state();
        let app = test_app!(state);
        sign_up!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form([("username", "alice"), ("password", "other")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Username already exists"));
    }

    #[actix_web::test]
    async fn test_account_pages_render() {
        let state = app_state();
        let app = test_app!(state);

        for (uri, action) in [("/login", "action=\"/login\""), ("/register", "action=\"/register\"")] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
            assert!(html.contains(action));
            assert!(!html.contains("class=\"error\""));
        }
    }

    #[actix_web::test]
    async fn test_add_rejects_bad_json() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/api/add")
            .cookie(cookie)
            .insert_header(header::ContentType::json())
            .set_payload("not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["result"], "error");
    }

    #[actix_web::test]
    async fn test_add_rejects_missing_content() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/api/add")
            .cookie(cookie)
            .set_json(json!({ "text": "wrong field" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["result"], "error");
    }

    #[actix_web::test]
    async fn test_add_rejects_long_content() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");

        let req = test::TestRequest::post()
            .uri("/api/add")
            .cookie(cookie)
            .set_json(json!({ "content": "x".repeat(201) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["result"], "error");
        assert!(body["message"].as_str().unwrap().contains("200"));
    }

    #[actix_web::test]
    async fn test_delete_redirects_and_removes() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");
        let id = add_task!(app, cookie, "To delete");

        let req = test::TestRequest::get()
            .uri(&format!("/delete/{}", id))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        assert!(list_tasks!(app, cookie).is_empty());

        let req = test::TestRequest::get()
            .uri(&format!("/delete/{}", id))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_page_escapes_content() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");
        let id = add_task!(app, cookie, "<b>bold</b>");

        let req = test::TestRequest::get()
            .uri(&format!("/update/{}", id))
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains(&format!("action=\"/update/{}\"", id)));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[actix_web::test]
    async fn test_update_changes_content() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");
        let id = add_task!(app, cookie, "Original");

        let req = test::TestRequest::post()
            .uri(&format!("/update/{}", id))
            .cookie(cookie.clone())
            .set_form([("content", "Edited")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        assert_eq!(list_tasks!(app, cookie)[0].content, "Edited");
    }

    #[actix_web::test]
    async fn test_unknown_ids_are_not_found() {
        let state = app_state();
        let app = test_app!(state);
        let cookie = sign_up!(app, "alice");

        let req = test::TestRequest::get()
            .uri("/update/999")
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/update/999")
            .cookie(cookie.clone())
            .set_form([("content", "nobody")])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/nowhere").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_healthcheck() {
        let state = app_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
