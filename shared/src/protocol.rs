use crate::{AccountType, Course, CourseDraft, Lesson, LoginResponse};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base.
    fn path(&self) -> String;
}

// =========================================================
// Courses
// =========================================================

/// List all courses
#[derive(Debug, Serialize, Deserialize)]
pub struct ListCoursesRequest;

impl ApiRequest for ListCoursesRequest {
    type Response = Vec<Course>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/courses".to_string()
    }
}

/// Fetch one course (used to preload the edit form)
#[derive(Debug, Serialize, Deserialize)]
pub struct GetCourseRequest {
    #[serde(skip)]
    pub course_id: i64,
}

impl ApiRequest for GetCourseRequest {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/courses/{}", self.course_id)
    }
}

/// Create a course. The draft itself is the body.
impl ApiRequest for CourseDraft {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/courses".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(skip)]
    pub course_id: i64,
    #[serde(flatten)]
    pub draft: CourseDraft,
}

impl ApiRequest for UpdateCourseRequest {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/courses/{}", self.course_id)
    }
}

/// Delete a course. The backend answers with a status only; the body is ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteCourseRequest {
    #[serde(skip)]
    pub course_id: i64,
}

impl ApiRequest for DeleteCourseRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/courses/{}", self.course_id)
    }
}

// =========================================================
// Lessons
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListLessonsRequest;

impl ApiRequest for ListLessonsRequest {
    type Response = Vec<Lesson>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/lessons".to_string()
    }
}

/// Lessons belonging to one course
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseLessonsRequest {
    #[serde(skip)]
    pub course_id: i64,
}

impl ApiRequest for CourseLessonsRequest {
    type Response = Vec<Lesson>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/lessons/course/{}", self.course_id)
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoLoginRequest {
    pub account_type: AccountType,
}

impl ApiRequest for DemoLoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/demo-login".to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_login_body_uses_account_type_key() {
        let req = DemoLoginRequest {
            account_type: AccountType::Admin,
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"accountType":"admin"}"#
        );
        assert_eq!(req.path(), "/auth/demo-login");
    }

    #[test]
    fn update_body_omits_the_path_id() {
        let req = UpdateCourseRequest {
            course_id: 9,
            draft: CourseDraft {
                title: "Chemistry".to_string(),
                ..Default::default()
            },
        };
        assert_eq!(req.path(), "/courses/9");
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"title":"Chemistry"}"#);
    }

    #[test]
    fn lesson_paths() {
        assert_eq!(ListLessonsRequest.path(), "/lessons");
        assert_eq!(CourseLessonsRequest { course_id: 4 }.path(), "/lessons/course/4");
        assert!(!<CourseLessonsRequest as ApiRequest>::METHOD.has_body());
    }
}
