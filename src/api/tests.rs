use super::*;
use crate::error::ClientErrorKind;
use crate::request::tests::MockHttpClient;
use crate::request::{HttpMethod, ReqwestHttpClient};
use std::rc::Rc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const BASE: &str = "http://api.test/api/v1";

fn api() -> (Rc<MockHttpClient>, CourseApi<Rc<MockHttpClient>>) {
    let mock = Rc::new(MockHttpClient::new());
    let api = CourseApi::new(mock.clone(), format!("{}/", BASE));
    (mock, api)
}

// =========================================================
// 集合归一化
// =========================================================

#[test]
fn normalize_accepts_plain_array() {
    let items: Vec<Course> =
        normalize_collection(r#"[{"courseId":1,"title":"Algebra"}]"#, "courses").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Algebra");
}

#[test]
fn normalize_unwraps_string_encoded_array() {
    let body = serde_json::to_string(r#"[{"courseId":2,"title":"Biology"}]"#).unwrap();
    let items: Vec<Course> = normalize_collection(&body, "courses").unwrap();
    assert_eq!(items[0].course_id, 2);
}

#[test]
fn normalize_unwraps_named_wrapper() {
    let items: Vec<Lesson> =
        normalize_collection(r#"{"lessons":[{"lessonId":5,"title":"Cells"}]}"#, "lessons")
            .unwrap();
    assert_eq!(items[0].lesson_id, 5);
}

#[test]
fn normalize_treats_empty_and_null_as_empty() {
    assert!(normalize_collection::<Lesson>("", "lessons").unwrap().is_empty());
    assert!(normalize_collection::<Lesson>("null", "lessons").unwrap().is_empty());
}

#[test]
fn normalize_rejects_other_shapes() {
    let err = normalize_collection::<Course>(r#"{"error":"boom"}"#, "courses").unwrap_err();
    assert!(err.contains("courses"));
    let err = normalize_collection::<Course>("42", "courses").unwrap_err();
    assert!(err.contains("number"));
    assert!(normalize_collection::<Course>(r#""not json""#, "courses").is_err());
}

#[test]
fn normalize_skips_undecodable_elements() {
    let body = r#"[{"courseId":null},{"courseId":7,"title":"Physics"},{"title":"no id"},"oops"]"#;
    let items: Vec<Course> = normalize_collection(body, "courses").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].course_id, 7);

    let wrapped: Vec<Lesson> =
        normalize_collection(r#"{"lessons":[{"lessonId":"x"},{"lessonId":9,"title":"Ions"}]}"#, "lessons")
            .unwrap();
    assert_eq!(wrapped.len(), 1);
    assert_eq!(wrapped[0].lesson_id, 9);
}

// =========================================================
// 请求构造
// =========================================================

#[tokio::test]
async fn list_courses_hits_collection_endpoint_without_credentials() {
    let (mock, api) = api();
    mock.respond(200, r#"[{"courseId":1,"title":"Algebra"}]"#);

    let courses = api.list_courses().await.unwrap();

    assert_eq!(courses.len(), 1);
    let req = mock.last_request();
    assert_eq!(req.url, format!("{}/courses", BASE));
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.header("Authorization"), None);
    assert!(req.body.is_none());
}

#[tokio::test]
async fn malformed_collection_becomes_empty_not_error() {
    let (mock, api) = api();
    mock.respond(200, r#"{"unexpected":true}"#);

    assert_eq!(api.list_courses().await.unwrap(), Vec::<Course>::new());
}

#[tokio::test]
async fn one_bad_course_does_not_empty_the_list() {
    let (mock, api) = api();
    mock.respond(200, r#"[{"courseId":1,"title":"Algebra"},{"courseId":null}]"#);

    let courses = api.list_courses().await.unwrap();

    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Algebra");
}

#[tokio::test]
async fn token_is_sent_as_bearer_credential() {
    let (mock, api) = api();
    let api = api.with_token("jwt-abc");
    mock.respond(200, "[]").respond(200, "[]");

    api.course_lessons(3).await.unwrap();
    let req = mock.last_request();
    assert_eq!(req.url, format!("{}/lessons/course/3", BASE));
    assert_eq!(req.header("Authorization"), Some("Bearer jwt-abc"));

    let api = api.without_token();
    api.list_lessons().await.unwrap();
    assert_eq!(mock.last_request().header("Authorization"), None);
}

#[tokio::test]
async fn delete_ignores_response_body() {
    let (mock, api) = api();
    mock.respond(200, "Course deleted successfully");

    api.delete_course(2).await.unwrap();

    let req = mock.last_request();
    assert_eq!(req.method, HttpMethod::Delete);
    assert_eq!(req.url, format!("{}/courses/2", BASE));
}

#[tokio::test]
async fn non_2xx_maps_to_status_error_with_backend_message() {
    let (mock, api) = api();
    mock.respond(404, r#"{"message":"Demo admin account not found"}"#);

    let err = api.demo_login(AccountType::Admin).await.unwrap_err();

    assert_eq!(err.kind, ClientErrorKind::Status(404));
    assert!(err.message.contains("Demo admin account not found"));
}

#[tokio::test]
async fn demo_login_posts_account_type() {
    let (mock, api) = api();
    mock.respond(200, r#"{"token":"t1","role":"ADMIN","username":"admin"}"#);

    let resp = api.demo_login(AccountType::Admin).await.unwrap();

    assert_eq!(resp.role.as_deref(), Some("ADMIN"));
    let req = mock.last_request();
    assert_eq!(req.url, format!("{}/auth/demo-login", BASE));
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.body.as_deref(), Some(r#"{"accountType":"admin"}"#));
}

#[tokio::test]
async fn update_course_puts_draft_to_item_path() {
    let (mock, api) = api();
    mock.respond(200, r#"{"courseId":4,"title":"Physics"}"#);

    let draft = CourseDraft {
        title: "Physics".to_string(),
        description: Some("Motion".to_string()),
        category: None,
    };
    let course = api.update_course(4, draft).await.unwrap();

    assert_eq!(course.course_id, 4);
    let req = mock.last_request();
    assert_eq!(req.method, HttpMethod::Put);
    assert_eq!(req.url, format!("{}/courses/4", BASE));
    assert_eq!(
        req.body.as_deref(),
        Some(r#"{"title":"Physics","description":"Motion"}"#)
    );
}

#[tokio::test]
async fn transport_failure_propagates() {
    let (mock, api) = api();
    mock.fail("connection refused");

    let err = api.list_courses().await.unwrap_err();
    assert_eq!(err.kind, ClientErrorKind::Transport);
}

// =========================================================
// 真实网络栈 (本地回环)
// =========================================================

#[tokio::test]
async fn bearer_header_reaches_the_wire() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            raw.extend_from_slice(&buf[..n]);
            if n == 0 || raw.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let body = r#"[{"courseId":1,"title":"Algebra"},{"courseId":2,"title":"Biology"}]"#;
        let resp = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(resp.as_bytes()).await.unwrap();
        String::from_utf8_lossy(&raw).to_string()
    });

    let api = CourseApi::new(ReqwestHttpClient::new(), format!("http://{}/api/v1", addr))
        .with_token("tok-123");
    let courses = api.list_courses().await.unwrap();
    let raw = server.await.unwrap().to_ascii_lowercase();

    assert_eq!(courses.len(), 2);
    assert!(raw.starts_with("get /api/v1/courses http/1.1"));
    assert!(raw.contains("authorization: bearer tok-123"));
}
