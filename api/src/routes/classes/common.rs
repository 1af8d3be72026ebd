use serde::Deserialize;
use services::class_workflow::{ClassEdit, NewClass};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    pub image: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "seats must not be negative"))]
    pub seats: i64,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100, message = "category is required"))]
    pub category: String,
}

impl CreateClassRequest {
    pub fn into_new_class(self, teacher_email: &str) -> NewClass {
        NewClass {
            teacher_email: teacher_email.to_string(),
            name: self.name,
            image: self.image,
            price: self.price,
            seats: self.seats,
            description: self.description,
            category: self.category,
        }
    }
}

/// All fields optional; omitted fields keep their stored values.
#[derive(Debug, Deserialize, Default)]
pub struct EditClassRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub seats: Option<i64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<EditClassRequest> for ClassEdit {
    fn from(req: EditClassRequest) -> Self {
        ClassEdit {
            name: req.name,
            image: req.image,
            price: req.price,
            seats: req.seats,
            description: req.description,
            category: req.category,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListClassesQuery {
    #[serde(default)]
    pub mine: bool,
}
