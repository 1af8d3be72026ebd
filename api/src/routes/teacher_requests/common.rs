use serde::Deserialize;
use services::teacher_workflow::TeacherProfile;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequestBody {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    pub image: Option<String>,
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, max = 2000, message = "experience is required"))]
    pub experience: String,
}

impl From<SubmitRequestBody> for TeacherProfile {
    fn from(body: SubmitRequestBody) -> Self {
        TeacherProfile {
            name: body.name,
            image: body.image,
            title: body.title,
            category: body.category,
            experience: body.experience,
        }
    }
}
